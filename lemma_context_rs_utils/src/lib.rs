//! Shared command line plumbing of the transformation and scoring tools.

use std::str::FromStr;

use clap::{App, AppSettings, Arg, ArgMatches};
use lemma_context_rs::Config;
use stderrlog::{LogLevelNum, Timestamp};
use stdinout::OrExit;

pub static DEFAULT_CLAP_SETTINGS: &[AppSettings] = &[
    AppSettings::DontCollapseArgsInUsage,
    AppSettings::UnifiedHelpMessage,
];

/// Adds the config file and logging arguments.
pub fn common_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app.arg(
        Arg::with_name("CONFIG")
            .help("Config in toml format.")
            .long_help(
                "Option tables in toml format. Options that are missing in the file fall back to \
                 their defaults, command line options take precedence over the file.",
            )
            .long("config")
            .takes_value(true)
            .required(false),
    )
    .arg(
        Arg::with_name("VERBOSE")
            .help("Increases logging verbosity (-v, -vv, -vvv).")
            .short("v")
            .long("verbose")
            .multiple(true)
            .required(false),
    )
    .arg(
        Arg::with_name("QUIET")
            .help("Silences log messages.")
            .short("q")
            .long("quiet")
            .required(false),
    )
}

/// Sets up logging to stderr, warnings are shown by default.
pub fn setup_logging(args: &ArgMatches) {
    let log_level = match args.occurrences_of("VERBOSE") {
        0 => LogLevelNum::Warn,
        1 => LogLevelNum::Info,
        2 => LogLevelNum::Debug,
        _ => LogLevelNum::Trace,
    };

    stderrlog::new()
        .quiet(args.is_present("QUIET"))
        .verbosity(log_level)
        .timestamp(Timestamp::Off)
        .init()
        .or_exit("Setting up logging failed", 1);
}

/// Reads the config file if one is given, the defaults otherwise.
pub fn read_config(args: &ArgMatches) -> Config {
    match args.value_of("CONFIG") {
        Some(path) => Config::read(path).or_exit("Reading the config failed", 1),
        None => Config::default(),
    }
}

/// Parses an optional argument, exits if it cannot be parsed.
pub fn parse_arg<T>(args: &ArgMatches, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    args.value_of(name).map(|value| {
        value
            .parse::<T>()
            .or_exit(format!("Invalid value '{}' for {}", value, name), 1)
    })
}

/// Parses all values of an argument, exits if one cannot be parsed.
pub fn parse_args<T>(args: &ArgMatches, name: &str) -> Option<Vec<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    args.values_of(name).map(|values| {
        values
            .map(|value| {
                value
                    .parse::<T>()
                    .or_exit(format!("Invalid value '{}' for {}", value, name), 1)
            })
            .collect()
    })
}
