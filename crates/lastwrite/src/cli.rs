//! Command-line surface
//!
//! Flags override values from the config file and `LASTWRITE_*`
//! environment variables.

use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use lastwrite_core::{
    config::{parse_dir_list, DEFAULT_LISTEN_ADDRESS, DEFAULT_TELEMETRY_PATH},
    load_config, Config, Error, Result, SetupFailurePolicy,
};

pub fn build_cli() -> Command {
    Command::new("lastwrite")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Export the last write time of watched directories as Prometheus metrics")
        .arg(
            Arg::new("dirs")
                .long("dirs")
                .value_name("LIST")
                .help("Colon-separated list of directories to watch"),
        )
        .arg(
            Arg::new("recursive")
                .long("recursive")
                .action(ArgAction::SetTrue)
                .help("Watch directories recursively"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("TOML config file (default: the global lastwrite config, if present)"),
        )
        .arg(
            Arg::new("listen-address")
                .long("web.listen-address")
                .value_name("ADDR")
                .help(format!(
                    "Address to serve metrics on [default: {DEFAULT_LISTEN_ADDRESS}]"
                )),
        )
        .arg(
            Arg::new("telemetry-path")
                .long("web.telemetry-path")
                .value_name("PATH")
                .help(format!(
                    "Path under which to expose metrics [default: {DEFAULT_TELEMETRY_PATH}]"
                )),
        )
        .arg(
            Arg::new("refresh-interval")
                .long("refresh-interval")
                .value_name("SECS")
                .value_parser(value_parser!(u64))
                .help("Seconds between age recomputations [default: 10]"),
        )
        .arg(
            Arg::new("setup-failure")
                .long("setup-failure")
                .value_name("POLICY")
                .value_parser(["isolate", "abort"])
                .help("On a directory that cannot be watched: skip it, or abort startup"),
        )
}

/// Load config from file and environment, apply flags, then validate.
///
/// # Errors
///
/// Returns error if loading fails or the merged config is invalid
pub fn resolve_config(matches: &ArgMatches) -> Result<Config> {
    let config = load_config(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    let config = apply_flags(config, matches)?;
    config.validate()?;
    Ok(config)
}

fn apply_flags(mut config: Config, matches: &ArgMatches) -> Result<Config> {
    if let Some(dirs) = matches.get_one::<String>("dirs") {
        config.dirs = parse_dir_list(dirs);
    }

    if matches.get_flag("recursive") {
        config.recursive = true;
    }

    if let Some(address) = matches.get_one::<String>("listen-address") {
        config.web.listen_address.clone_from(address);
    }

    if let Some(path) = matches.get_one::<String>("telemetry-path") {
        config.web.telemetry_path.clone_from(path);
    }

    if let Some(secs) = matches.get_one::<u64>("refresh-interval") {
        config.refresh_interval_secs = *secs;
    }

    if let Some(policy) = matches.get_one::<String>("setup-failure") {
        config.setup_failure = policy
            .parse::<SetupFailurePolicy>()
            .map_err(|e| Error::parse_error(format!("--setup-failure {policy}: {e}")))?;
    }

    Ok(config)
}
