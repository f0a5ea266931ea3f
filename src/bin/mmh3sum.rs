use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{ArgAction, Parser};

use lib::{
    io::{update_from_reader, DEFAULT_CHUNK_SIZE},
    logging::{init_global_logger, level_from_flags},
    parse_seed, Digest, Error, Murmur3Hasher, OutputFormat, Variant,
};

/// Print MurmurHash3 digests of files, or of standard input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files to hash.  With none, or with `-`, standard input is hashed.
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// mmh3_32, mmh3_x64_128 or mmh3_x86_128.
    #[arg(short, long, value_name = "VARIANT", default_value = "mmh3_x64_128")]
    algorithm: Variant,

    /// Decimal or 0x-prefixed hex.  Negative values are taken as their
    /// 32-bit two's complement.
    #[arg(short, long, value_name = "SEED", default_value = "0", value_parser = parse_seed, allow_hyphen_values = true)]
    seed: u32,

    #[arg(
        short,
        long,
        value_name = "FORMAT",
        default_value = "hex",
        help = format!("One of: {}.", OutputFormat::NAMES.join(", "))
    )]
    format: OutputFormat,

    /// Read size used when streaming inputs.
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_CHUNK_SIZE as u64, value_parser = clap::value_parser!(u64).range(1..))]
    chunk_size: u64,

    /// More log output.  Repeat for even more.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

/// Streams one input through a fresh hasher.  Nothing is kept from an input
/// that fails part way.
fn digest_of(cli: &Cli, path: &Path) -> anyhow::Result<Digest> {
    let mut hasher = cli.algorithm.new_hasher(cli.seed);
    let chunk_size = cli.chunk_size as usize;

    let len = if is_stdin(path) {
        update_from_reader(&mut hasher, io::stdin().lock(), chunk_size)
            .context("Failed to read standard input")?
    } else {
        let file = File::open(path)
            .with_context(|| format!("Failed to open \"{}\"", path.display()))?;
        update_from_reader(&mut hasher, file, chunk_size)
            .with_context(|| format!("Failed to read \"{}\"", path.display()))?
    };

    log::info!("{}: {} bytes through {}", path.display(), len, hasher.name());
    Ok(hasher.finish())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_global_logger(level_from_flags(cli.verbose, cli.quiet)) {
        eprintln!("Failed to set up logging: {:#}", e);
    }

    let name = cli.algorithm.name();
    if !cli.format.fits(cli.algorithm.digest_size()) {
        log::error!(
            "{}",
            Error::PairOnNarrowDigest {
                name: name.to_string()
            }
        );
        return ExitCode::from(2);
    }

    let inputs = if cli.files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        cli.files.clone()
    };
    log::debug!(
        "hashing {} input(s) with {}, seed {:#010x}",
        inputs.len(),
        name,
        cli.seed
    );

    let mut out = io::stdout().lock();
    let mut failed = 0usize;
    for path in &inputs {
        let line = digest_of(&cli, path)
            .and_then(|digest| Ok(cli.format.render(&digest, name)?));
        match line {
            Ok(line) => {
                if let Err(e) = writeln!(out, "{}  {}", line, path.display()) {
                    log::error!("Failed to write to standard output: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            Err(e) => {
                log::error!("{:#}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        log::warn!("{} of {} input(s) failed", failed, inputs.len());
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
