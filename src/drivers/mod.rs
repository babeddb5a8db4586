//! Benchmark drivers, one per rabe scheme. Every driver sweeps the
//! configured attribute counts, measures the scheme operations and upserts
//! each data point into the per-scheme result tables
//! (`rabe_<scheme>.csv` for timings, `rabe_<scheme>_ct.csv` for sizes).
//!
//! CSV and i/o failures propagate as [`BenchError`]; failures inside the
//! cryptographic library abort the run, a sweep has no partial-failure
//! recovery.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::error::BenchError;
use crate::results;

pub mod ac17;
pub mod bdabe;
pub mod bsw;
pub mod mke08;

/// Attribute counts every sweep runs over.
pub const ATTRIBUTE_COUNTS: [usize; 11] = [1, 5, 10, 15, 20, 25, 30, 35, 40, 45, 50];

/// Measurement repeats per data point.
pub const REPEATS: usize = 10;

/// Plaintext doublings of the storage sweeps: `2^0 .. 2^(SIZE_STEPS-1)` bytes.
pub const SIZE_STEPS: usize = 25;

/// Row key for timings without an attribute dimension (setup, authority setup).
pub const SETUP_ROW: &str = "0";

/// Payload of the timing sweeps.
pub const PLAINTEXT: &str = "dance like no one's watching, encrypt like everyone is!";

/// Sweep configuration shared by all drivers.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Attribute counts to sweep.
    pub attribute_counts: Vec<usize>,
    /// Measurement repeats per data point.
    pub repeats: usize,
    /// Directory the result tables are written to.
    pub out_dir: PathBuf,
    /// Whether to run the storage sweeps (slow for large plaintext steps).
    pub with_sizes: bool,
    /// Plaintext doublings of the storage sweeps.
    pub size_steps: usize,
}

impl Default for Settings {
    fn default() -> Settings {
        Settings {
            attribute_counts: ATTRIBUTE_COUNTS.to_vec(),
            repeats: REPEATS,
            out_dir: PathBuf::from("."),
            with_sizes: false,
            size_steps: SIZE_STEPS,
        }
    }
}

/// Runs every driver with the given settings.
pub fn run_all(settings: &Settings) -> Result<(), BenchError> {
    bsw::benchmark(settings)?;
    ac17::benchmark(settings)?;
    mke08::benchmark(settings)?;
    bdabe::benchmark(settings)
}

/// Upserts one measurement and echoes it to stdout.
pub(crate) fn record(
    path: &Path,
    index: &str,
    column: &str,
    value: impl Display,
) -> Result<(), BenchError> {
    let value = value.to_string();
    results::update_csv(path, index, column, &value)?;
    println!("  {} [{}]: {}", column, index, value);
    Ok(())
}
