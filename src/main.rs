use clap::Parser;
use memory_roster::catalog::BuiltinCatalog;
use memory_roster::config::{Config, ConfigError};
use memory_roster::export::{write_export_to_json, RosterExport};
use memory_roster::roster::Roster;
use std::path::{Path, PathBuf};
use std::process;

const DEFAULT_CONFIG_PATH: &str = "roster.toml";

/// Roster builder command line arguments.
#[derive(Parser, Debug)]
#[command(name = "memory_roster")]
#[command(about = "Builds the memory-one strategy roster and its payoff games")]
struct Args {
    /// TOML config file (falls back to roster.toml, then built-in defaults)
    #[arg(value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the built roster as JSON
    #[arg(long, value_name = "PATH")]
    export: Option<PathBuf>,
}

/// Loads the explicit config, or `roster.toml` when present, or the defaults.
fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => {
            log::info!("Loading configuration from '{}'...", path.display());
            Config::load(path)
        }
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            log::info!("Loading configuration from '{}'...", DEFAULT_CONFIG_PATH);
            Config::load(Path::new(DEFAULT_CONFIG_PATH))
        }
        None => {
            log::info!("No configuration file found, using built-in defaults.");
            Ok(Config::default())
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Building strategy roster...");

    let args = Args::parse();

    // 1. Load Configuration
    let config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // 2. Build Roster from the built-in catalog
    let catalog = BuiltinCatalog::new();
    let roster = match Roster::build(&catalog, &config) {
        Ok(r) => r,
        Err(e) => {
            log::error!("Roster initialization failed: {}", e);
            process::exit(1);
        }
    };

    // 3. Report
    println!("{:>4}  {:<28} {:>6}  stochastic", "code", "name", "memory");
    for (name, code) in roster.name_to_code() {
        if let Some(instance) = roster.instance(name) {
            let classifier = instance.classifier();
            println!(
                "{:>4}  {:<28} {:>6}  {}",
                code,
                name,
                classifier.memory_depth.to_string(),
                classifier.stochastic
            );
        }
    }
    let stag = roster.stag();
    let high_t = roster.high_temptation();
    println!(
        "\nstag:   r={} s={} t={} p={}\nhigh_t: r={} s={} t={} p={}",
        stag.r, stag.s, stag.t, stag.p, high_t.r, high_t.s, high_t.t, high_t.p
    );

    // 4. Optional export
    if let Some(path) = args.export {
        let export = RosterExport::new(&roster, config.filter);
        if let Err(e) = write_export_to_json(&export, &path) {
            log::error!("Failed to write export to '{}': {}", path.display(), e);
            process::exit(1);
        }
        log::info!("Roster exported to '{}'.", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_config_and_export() {
        let args = Args::try_parse_from(["memory_roster", "custom.toml", "--export", "out.json"])
            .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(args.export, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_args_help_is_not_a_config_path() {
        let err = Args::try_parse_from(["memory_roster", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_args_reject_extra_positional() {
        assert!(Args::try_parse_from(["memory_roster", "a.toml", "b.toml"]).is_err());
        assert!(Args::try_parse_from(["memory_roster", "--export"]).is_err());
    }
}
