//! Avalanche and bit independence statistics for MurmurHash3's building
//! blocks.
//!
//! A mix function here is anything that turns a fixed size input into a fixed
//! size output, `Fn(&[u8], &mut [u8])`.  For every sample input we flip each
//! input bit in turn and record which output bits flip with it.  A perfect
//! mixer flips every output bit with probability 0.5.

use std::fmt::Write as _;
use std::{fs::File, path::Path};

use nanorand::{Rng, WyRand};

use crate::mix::fmix64;

/// Min/avg/max of some per-bit measure.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Summary {
    pub min: f64,
    pub avg: f64,
    pub max: f64,
}

impl Summary {
    fn of(values: impl Iterator<Item = f64>) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut n = 0usize;
        for v in values {
            min = min.min(v);
            max = max.max(v);
            sum += v;
            n += 1;
        }
        if n == 0 {
            return Self {
                min: 0.0,
                avg: 0.0,
                max: 0.0,
            };
        }
        Self {
            min,
            avg: sum / n as f64,
            max,
        }
    }
}

pub struct Stats {
    pub input_bit_len: usize,
    pub output_bit_len: usize,
    pub digest_bit_len: usize,

    // Number of sample inputs accumulated so far.
    pub sample_count: usize,

    // `input_bit_len * output_bit_len` flip counts, one row per input bit.
    // Empty if avalanche tracking is off.
    pub avalanche_chart: Vec<u32>,

    // For every input bit and every ordered pair of distinct output bits,
    // counts of [both flipped, neither flipped, only first, only second].
    // Empty if BIC tracking is off.
    pub bic_chart: Vec<[u32; 4]>,
}

impl Stats {
    pub fn new(
        input_bit_len: usize,
        output_bit_len: usize,
        digest_bit_len: usize,
        do_avalanche: bool,
        do_bic: bool,
    ) -> Self {
        let pairs = output_bit_len * output_bit_len.saturating_sub(1);
        Self {
            input_bit_len,
            output_bit_len,
            digest_bit_len,
            sample_count: 0,
            avalanche_chart: if do_avalanche {
                vec![0; input_bit_len * output_bit_len]
            } else {
                Vec::new()
            },
            bic_chart: if do_bic {
                vec![[0; 4]; input_bit_len * pairs]
            } else {
                Vec::new()
            },
        }
    }

    pub fn get_row(&self, in_bit: usize) -> &[u32] {
        let start = in_bit * self.output_bit_len;
        &self.avalanche_chart[start..start + self.output_bit_len]
    }

    /// Flip probability of each cell of the chart.
    fn probabilities<'a>(&self, flips: &'a [u32]) -> impl Iterator<Item = f64> + 'a {
        let norm = 1.0 / self.sample_count.max(1) as f64;
        flips.iter().map(move |&f| f as f64 * norm)
    }

    /// Bias of every input/output bit pairing. 0 is perfect, 1 is worst.
    pub fn bias(&self) -> Summary {
        Summary::of(self.probabilities(&self.avalanche_chart).map(p_to_bias))
    }

    /// How many output bits, in effect, each input bit affects.
    pub fn row_diffusion(&self, in_bit: usize) -> f64 {
        self.probabilities(self.get_row(in_bit))
            .map(|p| 1.0 - p_to_bias(p))
            .sum()
    }

    pub fn row_entropy(&self, in_bit: usize) -> f64 {
        self.probabilities(self.get_row(in_bit)).map(p_to_entropy).sum()
    }

    pub fn input_bit_diffusion(&self) -> Summary {
        Summary::of((0..self.input_bit_len).map(|i| self.row_diffusion(i)))
    }

    pub fn input_bit_entropy(&self) -> Summary {
        Summary::of((0..self.input_bit_len).map(|i| self.row_entropy(i)))
    }

    fn bic_row(&self, in_bit: usize) -> &[[u32; 4]] {
        let stride = self.output_bit_len * (self.output_bit_len - 1);
        let start = in_bit * stride;
        &self.bic_chart[start..start + stride]
    }

    /// Average, over all output bit pairs, of the four BIC quadrant counts
    /// sorted ascending and normalized.  Ideal is `[0.25; 4]`.
    pub fn row_bic_sorted_quadrants(&self, in_bit: usize) -> [f64; 4] {
        let row = self.bic_row(in_bit);
        let mut sum = [0u64; 4];
        for quadrants in row {
            let mut q = *quadrants;
            q.sort_unstable();
            for (s, v) in sum.iter_mut().zip(q) {
                *s += v as u64;
            }
        }
        let norm = (row.len() * self.sample_count.max(1)) as f64;
        sum.map(|s| s as f64 / norm)
    }

    /// `(worst, average)` sorted BIC quadrants across all input bits.  Worst
    /// takes the smallest of each of the three low quadrants and the largest
    /// high quadrant.
    pub fn bic_sorted_quadrants(&self) -> ([f64; 4], [f64; 4]) {
        let mut worst = [f64::INFINITY, f64::INFINITY, f64::INFINITY, 0.0];
        let mut avg = [0.0; 4];
        for i in 0..self.input_bit_len {
            let q = self.row_bic_sorted_quadrants(i);
            for j in 0..3 {
                worst[j] = worst[j].min(q[j]);
            }
            worst[3] = worst[3].max(q[3]);
            for (a, v) in avg.iter_mut().zip(q) {
                *a += v;
            }
        }
        let n = self.input_bit_len.max(1) as f64;
        (worst, avg.map(|a| a / n))
    }

    /// Human readable summary of everything that was tracked.
    pub fn report(&self) -> String {
        let mut out = String::new();

        if !self.avalanche_chart.is_empty() {
            let bias = self.bias();
            let diffusion = self.input_bit_diffusion();
            let entropy = self.input_bit_entropy();
            let _ = writeln!(
                out,
                "    Bias:
        Min: {:0.3}
        Avg: {:0.3}
        Max: {:0.3}
    Input Bit Diffusion (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits
    Input Bit Diffusion Entropy (digest size = {} bits):
        Min: {:0.1} bits
        Avg: {:0.1} bits
        Max: {:0.1} bits",
                bias.min,
                bias.avg,
                bias.max,
                self.digest_bit_len,
                diffusion.min,
                diffusion.avg,
                diffusion.max,
                self.digest_bit_len,
                entropy.min,
                entropy.avg,
                entropy.max,
            );
        }

        if !self.bic_chart.is_empty() {
            let (worst, avg) = self.bic_sorted_quadrants();
            let _ = writeln!(
                out,
                "    BIC quadrants (sorted):
        Wrst: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]
         Avg: [{:0.4}, {:0.4}, {:0.4}, {:0.4}]",
                worst[0], worst[1], worst[2], worst[3], avg[0], avg[1], avg[2], avg[3],
            );
        }

        out
    }

    /// Writes the avalanche chart as a greyscale PNG, one row per input bit.
    /// Black is "never flips", white is "always flips", 50% grey is ideal.
    pub fn write_avalanche_png<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let mut pixels = Vec::with_capacity(self.avalanche_chart.len() * 4);
        let samples = self.sample_count.max(1) as u64;
        for &flips in &self.avalanche_chart {
            let v = (flips as u64 * 255 / samples).min(255) as u8;
            pixels.extend_from_slice(&[v, v, v, 255]);
        }

        png_encode_mini::write_rgba_from_u8(
            &mut File::create(path.as_ref())?,
            &pixels,
            self.output_bit_len as u32,
            self.input_bit_len as u32,
        )?;

        log::info!("wrote avalanche chart to {}", path.as_ref().display());
        Ok(())
    }
}

/// What to measure and how.
pub struct StatsConfig {
    pub input_size: usize,
    pub output_size: usize,
    pub digest_size: usize,
    pub rounds: usize,
    pub do_avalanche: bool,
    pub do_bic: bool,
}

/// Runs `mix` on `config.rounds` inputs from `generate_input` (called with
/// the round index, counting up from zero), and on every single-bit tweak of
/// each of them.
///
/// `mix` must treat its output buffer as write-only.
pub fn compute_stats<F1, F2>(generate_input: F1, mix: F2, config: &StatsConfig) -> Stats
where
    F1: Fn(usize, &mut [u8]),
    F2: Fn(&[u8], &mut [u8]),
{
    let in_bits = config.input_size * 8;
    let out_bits = config.output_size * 8;
    let mut stats = Stats::new(
        in_bits,
        out_bits,
        config.digest_size * 8,
        config.do_avalanche,
        config.do_bic,
    );

    let mut input = vec![0u8; config.input_size];
    let mut output = vec![0u8; config.output_size];
    let mut tweaked_input = vec![0u8; config.input_size];
    let mut tweaked_output = vec![0u8; config.output_size];
    let mut flipped = vec![false; out_bits];
    let progress_every = (config.rounds / 16).max(1);

    for round in 0..config.rounds {
        if round % progress_every == 0 {
            log::debug!("round {}/{}", round, config.rounds);
        }

        generate_input(round, &mut input);
        mix(&input, &mut output);

        for in_bit in 0..in_bits {
            tweaked_input.copy_from_slice(&input);
            tweaked_input[in_bit / 8] ^= 1 << (in_bit % 8);
            mix(&tweaked_input, &mut tweaked_output);

            for (out_bit, f) in flipped.iter_mut().enumerate() {
                let mask = 1 << (out_bit % 8);
                *f = (output[out_bit / 8] ^ tweaked_output[out_bit / 8]) & mask != 0;
            }

            if config.do_avalanche {
                let row = in_bit * out_bits;
                for (out_bit, &f) in flipped.iter().enumerate() {
                    stats.avalanche_chart[row + out_bit] += f as u32;
                }
            }

            if config.do_bic {
                let stride = out_bits * (out_bits - 1);
                for a in 0..out_bits {
                    for j in 0..(out_bits - 1) {
                        let b = (a + j + 1) % out_bits;
                        let quadrant = match (flipped[a], flipped[b]) {
                            (true, true) => 0,
                            (false, false) => 1,
                            (true, false) => 2,
                            (false, true) => 3,
                        };
                        let k = in_bit * stride + a * (out_bits - 1) + j;
                        stats.bic_chart[k][quadrant] += 1;
                    }
                }
            }
        }

        stats.sample_count += 1;
    }

    stats
}

pub fn p_to_bias(p: f64) -> f64 {
    (p * 2.0 - 1.0).abs()
}

/// Shannon entropy, in bits, of a coin that comes up heads with probability
/// `p`.
pub fn p_to_entropy(p: f64) -> f64 {
    if p <= 0.0 || p >= 1.0 {
        0.0
    } else {
        let q = 1.0 - p;
        -(p * p.log2()) - (q * q.log2())
    }
}

//-------------------------------------------------------------
// Input generators.  All of them are deterministic in their index/seed.

fn rng_for(seed: u64) -> WyRand {
    // fmix64(0) == 0, so offset first.
    WyRand::new_seed(fmix64(seed ^ 0x7be355f7c2e736d2))
}

/// Random bytes.
pub fn generate_random(seed: usize, bytes: &mut [u8]) {
    rng_for(seed as u64).fill_bytes(bytes);
}

/// All zero bits except one, walking through the bit positions.
pub fn generate_single_1_bit(index: usize, bytes: &mut [u8]) {
    let bit = index % (bytes.len() * 8);
    bytes.fill(0);
    bytes[bit / 8] = 1 << (bit % 8);
}

/// Roughly `n` random bits set (fewer when positions repeat).
pub fn generate_n_random_bits(seed: usize, bytes: &mut [u8], n: usize) {
    let mut rng = rng_for(seed as u64 ^ fmix64(n as u64 + 1));
    bytes.fill(0);
    for _ in 0..n {
        let bit = rng.generate_range(0..(bytes.len() * 8));
        bytes[bit / 8] |= 1 << (bit % 8);
    }
}

pub fn generate_8_random_bits(seed: usize, bytes: &mut [u8]) {
    generate_n_random_bits(seed, bytes, 8);
}

/// The low bytes count up as a little-endian integer, the rest stays zero.
pub fn generate_counting(index: usize, bytes: &mut [u8]) {
    let counter = (index as u64).to_le_bytes();
    let n = bytes.len().min(8);
    bytes.fill(0);
    bytes[..n].copy_from_slice(&counter[..n]);
}

/// Like `generate_counting()`, but through gray codes.
pub fn generate_gray_code(index: usize, bytes: &mut [u8]) {
    generate_counting(index ^ (index >> 1), bytes);
}

/// All inputs with zero bits set, then one, then two, and so on.
pub fn generate_bit_combinations(index: usize, bytes: &mut [u8]) {
    let bit_len = bytes.len() * 8;

    // Find how many bits are set at this index, and the index within the
    // combinations of that many bits.
    let mut n = index;
    let mut bits = 0;
    let mut combos = binomial(bit_len, bits);
    while n >= combos && bits < bit_len {
        n -= combos;
        bits += 1;
        combos = binomial(bit_len, bits);
    }
    n %= combos.max(1);

    // Unrank the combination, highest bit first.
    bytes.fill(0);
    let mut t = bit_len;
    while t > 0 && bits > 0 {
        let y = if t > bits { binomial(t - 1, bits) } else { 0 };
        if n >= y {
            bytes[(t - 1) / 8] |= 1 << ((t - 1) % 8);
            n -= y;
            bits -= 1;
        }
        t -= 1;
    }
}

/// `n` choose `k`, saturating at `usize::MAX`.
pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u128 / (i + 1) as u128;
        if acc > usize::MAX as u128 {
            return usize::MAX;
        }
    }
    acc as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mix::fmix32;

    #[test]
    fn bias_and_entropy() {
        assert_eq!(p_to_bias(0.5), 0.0);
        assert_eq!(p_to_bias(0.0), 1.0);
        assert_eq!(p_to_bias(1.0), 1.0);
        assert_eq!(p_to_entropy(0.5), 1.0);
        assert_eq!(p_to_entropy(0.0), 0.0);
        assert_eq!(p_to_entropy(1.0), 0.0);
    }

    #[test]
    fn binomials() {
        assert_eq!(binomial(5, 0), 1);
        assert_eq!(binomial(5, 2), 10);
        assert_eq!(binomial(5, 6), 0);
        assert_eq!(binomial(64, 32), 1832624140942590534);
        assert_eq!(binomial(512, 256), usize::MAX);
    }

    #[test]
    fn bit_combinations_order() {
        let mut bytes = [0u8; 1];
        generate_bit_combinations(0, &mut bytes);
        assert_eq!(bytes, [0]);
        // Then the eight single-bit inputs.
        let mut singles = Vec::new();
        for i in 1..=8 {
            generate_bit_combinations(i, &mut bytes);
            assert_eq!(bytes[0].count_ones(), 1);
            singles.push(bytes[0]);
        }
        singles.sort_unstable();
        singles.dedup();
        assert_eq!(singles.len(), 8);
        // Index 9 starts the two-bit inputs.
        generate_bit_combinations(9, &mut bytes);
        assert_eq!(bytes[0].count_ones(), 2);
    }

    #[test]
    fn generators_are_deterministic() {
        let mut a = [0u8; 16];
        let mut b = [0u8; 16];
        generate_random(7, &mut a);
        generate_random(7, &mut b);
        assert_eq!(a, b);
        generate_random(8, &mut b);
        assert_ne!(a, b);

        generate_counting(0x0102, &mut a);
        assert_eq!(&a[..3], &[0x02, 0x01, 0x00]);

        generate_single_1_bit(9, &mut a);
        assert_eq!(a[1], 0b10);
        assert_eq!(a.iter().map(|b| b.count_ones()).sum::<u32>(), 1);

        generate_8_random_bits(3, &mut a);
        let ones: u32 = a.iter().map(|b| b.count_ones()).sum();
        assert!((1..=8).contains(&ones));
    }

    #[test]
    fn fmix32_avalanches_well() {
        let config = StatsConfig {
            input_size: 4,
            output_size: 4,
            digest_size: 4,
            rounds: 2000,
            do_avalanche: true,
            do_bic: true,
        };
        let stats = compute_stats(
            generate_random,
            |input, output| {
                let k = u32::from_le_bytes([input[0], input[1], input[2], input[3]]);
                output.copy_from_slice(&fmix32(k).to_le_bytes());
            },
            &config,
        );

        assert_eq!(stats.sample_count, 2000);
        assert!(stats.bias().avg < 0.05, "{}", stats.report());
        assert!(stats.input_bit_diffusion().min > 28.0, "{}", stats.report());
        let (_, avg) = stats.bic_sorted_quadrants();
        assert!(avg.iter().all(|&q| q > 0.15 && q < 0.35), "{:?}", avg);
        assert!(stats.report().contains("Bias:"));
    }

    #[test]
    fn fmix64_avalanches_well() {
        let config = StatsConfig {
            input_size: 8,
            output_size: 8,
            digest_size: 8,
            rounds: 1000,
            do_avalanche: true,
            do_bic: false,
        };
        let stats = compute_stats(
            generate_random,
            |input, output| {
                let mut k = [0u8; 8];
                k.copy_from_slice(input);
                output.copy_from_slice(&fmix64(u64::from_le_bytes(k)).to_le_bytes());
            },
            &config,
        );

        assert!(stats.bias().avg < 0.05, "{}", stats.report());
        assert!(stats.input_bit_diffusion().min > 56.0, "{}", stats.report());
        assert!(stats.input_bit_entropy().avg > 60.0, "{}", stats.report());
    }

    #[test]
    fn identity_does_not_avalanche() {
        let config = StatsConfig {
            input_size: 2,
            output_size: 2,
            digest_size: 2,
            rounds: 10,
            do_avalanche: true,
            do_bic: false,
        };
        let stats = compute_stats(generate_counting, |i, o| o.copy_from_slice(i), &config);
        // Each input bit flips exactly its own output bit.
        assert_eq!(stats.bias().max, 1.0);
        assert_eq!(stats.bias().min, 1.0);
        let diffusion = stats.input_bit_diffusion();
        assert_eq!((diffusion.min, diffusion.max), (0.0, 0.0));
        assert!(stats.bic_chart.is_empty());
        assert!(!stats.report().contains("BIC"));
    }
}
