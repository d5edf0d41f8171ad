// SPDX-FileCopyrightText: 2026 Adserve Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! adserve-plugins - inspect Adserve plugin trees.
//!
//! This is the binary entry point: it loads configuration, builds the loader
//! over the compiled-in component registry, and runs one subcommand.

mod check;
mod inspect;

use std::path::PathBuf;

use adserve_config::AdserveConfig;
use adserve_core::ScanDepth;
use clap::{Parser, Subcommand};

/// adserve-plugins - inspect Adserve plugin trees.
#[derive(Parser, Debug)]
#[command(name = "adserve-plugins", version, about, long_about = None)]
struct Cli {
    /// Load configuration from this file instead of the standard locations.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List the components of an extension.
    List {
        /// Extension directory name, e.g. `deliveryLog`.
        extension: String,
        /// Only list one group.
        #[arg(long)]
        group: Option<String>,
        /// Key entries by `group:component` instead of component name.
        #[arg(long)]
        full_keys: bool,
        /// Include disabled components.
        #[arg(long)]
        all: bool,
        /// Directory levels to descend below the scanned directory.
        #[arg(long, conflicts_with = "recursive")]
        depth: Option<usize>,
        /// Descend without a depth limit.
        #[arg(long)]
        recursive: bool,
    },
    /// Load one component by `extension:group:component` and describe it.
    Show { identifier: String },
    /// Load an extension's fallback handler and describe it.
    Fallback { extension: String },
    /// Verify that every component in the plugin tree loads.
    Check {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => adserve_config::load_and_validate_path(path),
        None => adserve_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            adserve_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level);
    tracing::debug!(root = %config.extensions_root().display(), "configuration loaded");

    if let Err(message) = run(cli.command, &config) {
        eprintln!("adserve-plugins: {message}");
        std::process::exit(1);
    }
}

fn run(command: Commands, config: &AdserveConfig) -> Result<(), String> {
    let loader = inspect::builtin_loader();

    match command {
        Commands::List {
            extension,
            group,
            full_keys,
            all,
            depth,
            recursive,
        } => {
            let options = inspect::ListOptions {
                group,
                full_keys,
                all,
                depth: scan_depth(depth, recursive),
            };
            for line in inspect::list_components(&loader, config, &extension, &options) {
                println!("{line}");
            }
        }
        Commands::Show { identifier } => {
            let lines = inspect::show(&loader, config, &identifier).map_err(|e| e.to_string())?;
            for line in lines {
                println!("{line}");
            }
        }
        Commands::Fallback { extension } => {
            let lines =
                inspect::fallback(&loader, config, &extension).map_err(|e| e.to_string())?;
            for line in lines {
                println!("{line}");
            }
        }
        Commands::Check { plain } => {
            if !check::run_check(&loader, config, plain) {
                return Err("check failed".to_string());
            }
        }
    }

    Ok(())
}

fn scan_depth(depth: Option<usize>, recursive: bool) -> ScanDepth {
    match (depth, recursive) {
        (_, true) => ScanDepth::Unlimited,
        (Some(levels), false) => ScanDepth::Levels(levels),
        (None, false) => ScanDepth::default(),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("adserve={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn list_flags_parse() {
        let cli = Cli::try_parse_from([
            "adserve-plugins",
            "--config",
            "/tmp/adserve.toml",
            "list",
            "deliveryLimitations",
            "--group",
            "Site",
            "--full-keys",
            "--all",
            "--depth",
            "0",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/adserve.toml")));
        match cli.command {
            Commands::List {
                extension,
                group,
                full_keys,
                all,
                depth,
                recursive,
            } => {
                assert_eq!(extension, "deliveryLimitations");
                assert_eq!(group.as_deref(), Some("Site"));
                assert!(full_keys && all && !recursive);
                assert_eq!(depth, Some(0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn depth_and_recursive_conflict() {
        let parsed = Cli::try_parse_from(["adserve-plugins", "list", "x", "--depth", "2", "--recursive"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn scan_depth_selection() {
        assert_eq!(scan_depth(None, false), ScanDepth::Levels(1));
        assert_eq!(scan_depth(Some(3), false), ScanDepth::Levels(3));
        assert_eq!(scan_depth(None, true), ScanDepth::Unlimited);
    }

    #[test]
    fn binary_loads_config_defaults() {
        let config = adserve_config::load_and_validate_str("").expect("default config should be valid");
        assert_eq!(config.plugin_paths.extensions, "plugins");
    }
}
