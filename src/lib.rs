//! `abe-bench` measures wall-clock timing and ciphertext/key sizes of the
//! attribute based encryption schemes implemented in [`rabe`], accumulates
//! the measurements in CSV result tables and renders comparative charts.
//!
//! The crate does no cryptographic work of its own: every scheme operation
//! is a call into [`rabe`], and everything around it is orchestration.
//!
//! * [`drivers`] - one sweep driver per scheme (BSW07, FAME/AC17, MKE08 and
//!   BDABE), writing `rabe_<scheme>.csv` / `rabe_<scheme>_ct.csv` tables
//! * [`results`] - the sparse CSV result tables and the [`results::update_csv`]
//!   upsert the drivers accumulate into
//! * [`utils`] - access policy builders and measurement helpers
//! * [`plot`] - SVG charts rendered from one or more result tables
//!
//! ```
//! use abe_bench::results::{update_csv, Table};
//!
//! let file = std::env::temp_dir().join("abe_bench_doc.csv");
//! # let _ = std::fs::remove_file(&file);
//! update_csv(&file, "5", "keygen", "0.012").unwrap();
//! update_csv(&file, "5", "encrypt", "0.031").unwrap();
//!
//! let table = Table::load(&file).unwrap();
//! assert_eq!(table.get("5", "encrypt"), Some("0.031"));
//! # std::fs::remove_file(&file).unwrap();
//! ```
pub mod drivers;
pub mod error;
pub mod plot;
pub mod results;
pub mod utils;
