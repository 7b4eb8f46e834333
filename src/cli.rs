// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - serve [--bind ADDR] [--backend URL]: run the web server (default)
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults
// - config --update: Rewrite config file with the current structure, keeping values

use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;

/// Repository trust score browser
#[derive(Parser)]
#[command(name = "criticality-web")]
#[command(version = VERSION)]
#[command(about = "Web front end for repository criticality scores", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the web server (default)
    Serve {
        /// Address to bind, e.g. 0.0.0.0:3000
        #[arg(long)]
        bind: Option<String>,

        /// Scoring backend origin, e.g. http://localhost:5000
        #[arg(long)]
        backend: Option<String>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Update config with new defaults (preserves user values)
        #[arg(long)]
        update: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Command-line overrides for `serve`
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ServeOverrides {
    pub bind: Option<String>,
    pub backend: Option<String>,
}

impl ServeOverrides {
    /// Apply on top of the loaded config (flags beat env and file)
    pub fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(bind) = &self.bind {
            config.bind_addr = bind
                .parse()
                .with_context(|| format!("Invalid --bind address: {}", bind))?;
        }
        if let Some(backend) = &self.backend {
            config.backend.url = backend.trim_end_matches('/').to_string();
        }
        Ok(())
    }
}

/// Handle CLI commands
///
/// Returns the serve overrides when the server should start, or `None` when
/// a config command was handled and the process should exit.
pub fn handle_cli() -> Option<ServeOverrides> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            show,
            reset,
            update,
            path,
        }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else if update {
                handle_config_update();
            } else {
                println!("Usage: criticality-web config [--show|--reset|--update|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --update  Update config with new defaults (preserves user values)");
                println!("  --path    Show config file path");
            }
            None
        }
        Some(Commands::Serve { bind, backend }) => Some(ServeOverrides { bind, backend }),
        None => Some(ServeOverrides::default()),
    }
}

fn load_or_exit() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = load_or_exit();

    println!("# Effective configuration (env > file > defaults)");
    println!("# Client API base: {}", config.backend.api_base());
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err() {
            input.clear();
        }

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

fn handle_config_update() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
        return;
    }

    let updated = load_or_exit().to_toml();

    let backup_path = path.with_extension("toml.bak");
    if let Err(e) = std::fs::copy(&path, &backup_path) {
        eprintln!("Warning: Could not create backup: {}", e);
    } else {
        println!("Backup created: {}", backup_path.display());
    }

    if let Err(e) = std::fs::write(&path, updated) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config updated with latest structure: {}", path.display());
    println!("Your values have been preserved.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::parse_from([
            "criticality-web",
            "serve",
            "--bind",
            "0.0.0.0:8080",
            "--backend",
            "http://scores:5000/",
        ]);
        let Some(Commands::Serve { bind, backend }) = cli.command else {
            panic!("Expected serve command");
        };

        let mut config = Config::default();
        ServeOverrides { bind, backend }.apply(&mut config).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.backend.url, "http://scores:5000");
    }

    #[test]
    fn test_no_subcommand_serves() {
        let cli = Cli::parse_from(["criticality-web"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_bad_bind_override() {
        let overrides = ServeOverrides {
            bind: Some("nowhere".to_string()),
            backend: None,
        };
        assert!(overrides.apply(&mut Config::default()).is_err());
    }
}
