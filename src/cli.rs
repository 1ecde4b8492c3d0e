//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// LinkPulse - URL shortener backend with click analytics
#[derive(Parser)]
#[command(name = "linkpulse")]
#[command(version)]
#[command(about = "URL shortener backend with click analytics", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Print an Argon2 hash for `auth.password`
    HashPassword {
        /// Password to hash (prompted without echo when omitted)
        password: Option<String>,
    },
}

/// Configuration management commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Generate a sample configuration file
    Generate {
        /// Output path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_serve() {
        let cli = Cli::try_parse_from(["linkpulse"]).unwrap();
        assert_eq!(cli.config, DEFAULT_CONFIG_PATH);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_generate() {
        let cli = Cli::try_parse_from([
            "linkpulse", "-c", "prod.toml", "config", "generate", "-o", "x.toml",
        ])
        .unwrap();
        assert_eq!(cli.config, "prod.toml");
        assert_eq!(
            cli.command,
            Some(Commands::Config {
                action: ConfigCommands::Generate {
                    output: Some("x.toml".to_string()),
                    force: false,
                }
            })
        );
    }

    #[test]
    fn test_hash_password() {
        let cli = Cli::try_parse_from(["linkpulse", "hash-password", "s3cret"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Commands::HashPassword {
                password: Some("s3cret".to_string())
            })
        );
    }
}
