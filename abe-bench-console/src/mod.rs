//! an abe-bench console application.
//!
// clap 2.x's `crate_authors!` macro expands to code that trips the
// deny-by-default `dangerous_implicit_autorefs` lint on newer compilers.
// The generated code is sound; allow the lint so the dependency macro builds.
#![allow(dangerous_implicit_autorefs)]
#[macro_use]
extern crate clap;

use clap::{App, Arg, ArgMatches, SubCommand};

use std::path::PathBuf;
use std::process;

use abe_bench::drivers::{self, Settings};
use abe_bench::error::BenchError;
use abe_bench::plot;

// Object names
const SCHEME: &str = "s";
const KIND: &str = "k";
const COLUMN: &str = "c";
const ROW: &str = "r";
const OUTPUT: &str = "o";
const ATTRIBUTES: &str = "a";
const REPEATS: &str = "n";
const SIZES: &str = "sizes";
const SIZE_STEPS: &str = "size-steps";
const FILES: &str = "f";

// Application commands
const CMD_BENCH: &str = "bench";
const CMD_PLOT: &str = "plot";

// Default plot parameters
const DEFAULT_COLUMN: &str = "and encrypt";
const DEFAULT_ROW: &str = "10";
const DEFAULT_OUTPUT: &str = "plot.svg";

fn main() {
    arg_enum! {
        #[derive(Debug)]
        enum Scheme {
            BSW07,
            FAME,
            MKE08,
            BDABE,
            ALL
        }
    }
    arg_enum! {
        #[derive(Debug)]
        enum Kind {
            Performance,
            Sizes,
            Startup
        }
    }
    let _abe_app = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!("\n"))
        .about(crate_description!())
        .subcommand(
            SubCommand::with_name(CMD_BENCH)
                .about("runs the timing (and optionally storage) sweeps of a scheme")
                .arg(
                    Arg::with_name(SCHEME)
                        .long("scheme")
                        .short(SCHEME)
                        .required(true)
                        .takes_value(true)
                        .possible_values(&Scheme::variants())
                        .help("scheme(s) to benchmark."),
                )
                .arg(
                    Arg::with_name(OUTPUT)
                        .long("output")
                        .short(OUTPUT)
                        .takes_value(true)
                        .help("directory the result CSV files are written to."),
                )
                .arg(
                    Arg::with_name(ATTRIBUTES)
                        .long("attributes")
                        .short(ATTRIBUTES)
                        .takes_value(true)
                        .help("comma separated attribute counts to sweep."),
                )
                .arg(
                    Arg::with_name(REPEATS)
                        .long("repeats")
                        .short(REPEATS)
                        .takes_value(true)
                        .help("measurement repeats per data point."),
                )
                .arg(
                    Arg::with_name(SIZES)
                        .long(SIZES)
                        .help("also run the ciphertext/key storage sweeps."),
                )
                .arg(
                    Arg::with_name(SIZE_STEPS)
                        .long(SIZE_STEPS)
                        .takes_value(true)
                        .help("plaintext doublings of the storage sweeps (implies --sizes)."),
                ),
        )
        .subcommand(
            SubCommand::with_name(CMD_PLOT)
                .about("renders an SVG chart from result CSV files")
                .arg(
                    Arg::with_name(KIND)
                        .long("kind")
                        .short(KIND)
                        .required(true)
                        .takes_value(true)
                        .possible_values(&Kind::variants())
                        .help("chart to render."),
                )
                .arg(
                    Arg::with_name(COLUMN)
                        .long("column")
                        .short(COLUMN)
                        .takes_value(true)
                        .help("operation column of the performance chart."),
                )
                .arg(
                    Arg::with_name(ROW)
                        .long("row")
                        .short(ROW)
                        .takes_value(true)
                        .help("attribute row of the sizes chart."),
                )
                .arg(
                    Arg::with_name(OUTPUT)
                        .long("output")
                        .short(OUTPUT)
                        .takes_value(true)
                        .help("SVG file to write."),
                )
                .arg(
                    Arg::with_name(FILES)
                        .multiple(true)
                        .required(true)
                        .help("result CSV files to read."),
                ),
        );
    if let Err(e) = run(_abe_app.get_matches()) {
        println!("Application Error: {}", e);
        process::exit(1);
    }
}

fn run(argument_matches: ArgMatches) -> Result<(), BenchError> {
    match argument_matches.subcommand() {
        (CMD_BENCH, Some(arguments)) => run_bench(arguments),
        (CMD_PLOT, Some(arguments)) => run_plot(arguments),
        _ => {
            println!("Application error: subcommand missing, try --help");
            process::exit(1);
        }
    }
}

fn run_bench(arguments: &ArgMatches) -> Result<(), BenchError> {
    let mut settings = Settings::default();
    if let Some(directory) = arguments.value_of(OUTPUT) {
        settings.out_dir = PathBuf::from(directory);
    }
    if let Some(list) = arguments.value_of(ATTRIBUTES) {
        settings.attribute_counts = parse_counts(list)?;
    }
    if let Some(repeats) = arguments.value_of(REPEATS) {
        settings.repeats = repeats
            .parse()
            .map_err(|_| BenchError::new(&format!("invalid repeat count {:?}", repeats)))?;
    }
    settings.with_sizes = arguments.is_present(SIZES);
    if let Some(steps) = arguments.value_of(SIZE_STEPS) {
        settings.size_steps = steps
            .parse()
            .map_err(|_| BenchError::new(&format!("invalid size step count {:?}", steps)))?;
        settings.with_sizes = true;
    }
    std::fs::create_dir_all(&settings.out_dir)?;
    match arguments.value_of(SCHEME) {
        Some("BSW07") => drivers::bsw::benchmark(&settings),
        Some("FAME") => drivers::ac17::benchmark(&settings),
        Some("MKE08") => drivers::mke08::benchmark(&settings),
        Some("BDABE") => drivers::bdabe::benchmark(&settings),
        Some("ALL") => drivers::run_all(&settings),
        _ => Err(BenchError::new("sorry, unknown scheme")),
    }
}

fn run_plot(arguments: &ArgMatches) -> Result<(), BenchError> {
    let files: Vec<PathBuf> = arguments
        .values_of(FILES)
        .map(|values| values.map(PathBuf::from).collect())
        .unwrap_or_default();
    let output = PathBuf::from(arguments.value_of(OUTPUT).unwrap_or(DEFAULT_OUTPUT));
    match arguments.value_of(KIND) {
        Some("Performance") => plot::performance_chart(
            &files,
            arguments.value_of(COLUMN).unwrap_or(DEFAULT_COLUMN),
            &output,
        ),
        Some("Sizes") => plot::size_chart(
            &files,
            arguments.value_of(ROW).unwrap_or(DEFAULT_ROW),
            &output,
        ),
        Some("Startup") => plot::startup_chart(&files, &output),
        _ => Err(BenchError::new("sorry, unknown chart kind")),
    }
}

fn parse_counts(list: &str) -> Result<Vec<usize>, BenchError> {
    let counts: Result<Vec<usize>, BenchError> = list
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(|part| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| BenchError::new(&format!("invalid attribute count {:?}", part)))
        })
        .collect();
    let counts = counts?;
    if counts.is_empty() {
        return Err(BenchError::new("empty attribute count list"));
    }
    if counts.iter().any(|&count| count == 0) {
        return Err(BenchError::new("attribute counts must be positive"));
    }
    Ok(counts)
}
