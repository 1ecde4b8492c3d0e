use std::process;

use clap::Parser;
use colored::Colorize;

use linkpulse::cli::{Cli, Commands};
use linkpulse::config::AppConfig;
use linkpulse::interfaces::cli::run_cli_command;
use linkpulse::runtime::modes::run_server;
use linkpulse::system::logging::init_logging;

fn fatal(message: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", "[FATAL]".red().bold(), message);
    process::exit(1);
}

#[actix_web::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        None | Some(Commands::Serve) => {}
        Some(cmd) => {
            if let Err(e) = run_cli_command(cmd) {
                eprintln!("{}", e.format_colored());
                process::exit(1);
            }
            return;
        }
    }

    let config = match AppConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.format_colored());
            process::exit(1);
        }
    };

    // guard 需要存活到进程退出
    let _log_guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => fatal(format!("{:#}", e)),
    };

    if let Err(e) = run_server(config).await {
        tracing::error!("Server exited with error: {:#}", e);
        fatal(format!("{:#}", e));
    }
}
