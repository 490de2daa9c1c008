//! Application orchestrator.
//! Loads/merges config, initializes logging, validates the destination and
//! runs the collector against the real filesystem.

use std::process::ExitCode;
use tracing::debug;

use media_collect::cli::{Args, USAGE};
use media_collect::config::load_config_from_xml;
use media_collect::output as out;
use media_collect::{CollectError, Collector, Config, RealFs, default_config_path};

use crate::logging::init_tracing;

/// Exit status for configuration errors (the classic `exit(-1)`).
const EXIT_CONFIG: u8 = 255;

/// Run the CLI application.
pub fn run(args: Args) -> ExitCode {
    // Handle --print-config before logging init
    if args.print_config {
        match default_config_path() {
            Some(p) => {
                out::print_info(&format!("media_collect config path:\n  {}", p.display()));
                if !p.exists() {
                    out::print_info("No config file exists there; built-in defaults are used.");
                }
            }
            None => out::print_error("Could not determine a config path"),
        }
        return ExitCode::SUCCESS;
    }

    // Config file first, CLI flags win.
    let settings = match load_config_from_xml() {
        Ok(s) => s,
        Err(e) => {
            out::print_error(&format!("{e:#}"));
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    let mut cfg = Config::default();
    settings.apply_to(&mut cfg);
    args.apply_overrides(&mut cfg);

    let guard = match init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json) {
        Ok(g) => g,
        Err(e) => {
            out::print_error(&format!("Failed to initialize logging: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let code = run_with(&cfg);

    // Ensure logs are flushed before exit
    drop(guard);
    code
}

fn run_with(cfg: &Config) -> ExitCode {
    if let Err(e) = cfg.validate() {
        if let CollectError::MissingFlag(_) = e {
            out::print_plain(USAGE);
        }
        if e.is_config() {
            return ExitCode::from(EXIT_CONFIG);
        }
        return ExitCode::FAILURE;
    }

    debug!("Source: {}", cfg.source_dir.display());
    debug!("Destination: {}", cfg.dest_dir.display());

    match Collector::new(cfg, &RealFs).run() {
        Ok(_) => {
            debug!("Done");
            ExitCode::SUCCESS
        }
        // Already logged by the collector.
        Err(_) => ExitCode::FAILURE,
    }
}
