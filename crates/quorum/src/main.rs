// SPDX-FileCopyrightText: 2026 Quorum Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Quorum - a multi-provider AI chat gateway with 2-of-3 consensus.
//!
//! This is the binary entry point for the Quorum gateway.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod serve;

/// Quorum - a multi-provider AI chat gateway with 2-of-3 consensus.
#[derive(Parser, Debug)]
#[command(name = "quorum", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Quorum gateway server.
    Serve {
        /// Path to a TOML config file (overrides the standard hierarchy).
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { config }) => {
            let config = match load(config.as_deref()) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("quorum: invalid configuration: {e}");
                    std::process::exit(1);
                }
            };
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("quorum: {e}");
                std::process::exit(1);
            }
        }
        None => {
            println!("quorum: use --help for available commands");
        }
    }
}

fn load(
    path: Option<&std::path::Path>,
) -> Result<quorum_config::QuorumConfig, quorum_config::ConfigError> {
    match path {
        Some(path) => quorum_config::load_config_from_path(path),
        None => quorum_config::load_config(),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads from a TOML string with no file needed.
        let config = quorum_config::load_config_from_str("")
            .expect("default config should be valid");
        assert_eq!(config.server.port, 8787);
    }
}
