use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use lib::{
    logging::{init_global_logger, level_from_flags},
    mixers::MIXERS,
    stats::{
        compute_stats, generate_8_random_bits, generate_bit_combinations, generate_counting,
        generate_gray_code, generate_random, generate_single_1_bit, StatsConfig,
    },
};

/// Avalanche and bit independence report for MurmurHash3's mixers and
/// hashes.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Only run mixers whose name contains one of these (case-insensitive).
    #[arg(value_name = "FILTER")]
    name_filters: Vec<String>,

    /// Also compute bit independence criterion stats.  Slow.
    #[arg(long)]
    bic: bool,

    /// Rounds per input pattern, instead of each pattern's default.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    rounds: Option<u64>,

    /// Write an avalanche chart PNG per mixer and pattern into this
    /// directory.
    #[arg(long, value_name = "DIR")]
    png_dir: Option<PathBuf>,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[arg(short, long)]
    quiet: bool,
}

struct BitPattern<'a> {
    name: &'a str,
    gen_function: &'a dyn Fn(usize, &mut [u8]),

    /// Default rounds for this pattern.  Zero means one round per input bit.
    rounds: usize,
}

const PATTERNS: &[BitPattern] = &[
    BitPattern {
        name: "random",
        gen_function: &generate_random,
        rounds: 1 << 14,
    },
    BitPattern {
        name: "counting",
        gen_function: &generate_counting,
        rounds: 1 << 14,
    },
    BitPattern {
        name: "gray code",
        gen_function: &generate_gray_code,
        rounds: 1 << 14,
    },
    BitPattern {
        name: "bit combinations",
        gen_function: &generate_bit_combinations,
        rounds: 1 << 14,
    },
    BitPattern {
        name: "8 random bits",
        gen_function: &generate_8_random_bits,
        rounds: 1 << 14,
    },
    BitPattern {
        name: "single-bit",
        gen_function: &generate_single_1_bit,

        // With only one round per input bit, even a perfect mixer won't get
        // near zero bias here.  Compare mixers against each other instead.
        rounds: 0,
    },
];

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_global_logger(level_from_flags(cli.verbose, cli.quiet)) {
        eprintln!("Failed to set up logging: {:#}", e);
    }

    if let Some(dir) = &cli.png_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            log::error!("Failed to create \"{}\": {}", dir.display(), e);
            return ExitCode::FAILURE;
        }
    }

    let name_filters: Vec<String> = cli.name_filters.iter().map(|f| f.to_lowercase()).collect();
    let mut failed = false;

    for mixer in MIXERS.iter() {
        if !name_filters.is_empty() {
            let lower_name = mixer.name.to_lowercase();

            if !name_filters
                .iter()
                .any(|filter| lower_name.contains(filter))
            {
                continue;
            }
        }

        println!("\n================================");
        println!("{}", mixer.name);
        for pattern in PATTERNS.iter() {
            println!("\nInput bit pattern: {}", pattern.name);
            let rounds = match (cli.rounds, pattern.rounds) {
                (Some(n), _) => n as usize,
                (None, 0) => mixer.input_size * 8,
                (None, n) => n,
            };
            let stats = compute_stats(
                pattern.gen_function,
                mixer.mix_function,
                &StatsConfig {
                    input_size: mixer.input_size,
                    output_size: mixer.output_size,
                    digest_size: mixer.digest_size,
                    rounds,
                    do_avalanche: true,
                    do_bic: cli.bic,
                },
            );
            print!("{}", stats.report());

            if let Some(dir) = &cli.png_dir {
                let path = dir.join(format!("{} - {}.png", mixer.name, pattern.name));
                if let Err(e) = stats.write_avalanche_png(&path) {
                    log::error!("Failed to write \"{}\": {}", path.display(), e);
                    failed = true;
                }
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
