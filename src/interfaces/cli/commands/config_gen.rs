//! Generate config command

use std::io::{self, Write};
use std::path::Path;

use colored::Colorize;

use crate::config::AppConfig;
use crate::interfaces::cli::CliError;

/// 生成示例配置；未指定输出路径时打印到 stdout
pub fn config_generate(output_path: Option<String>, force: bool) -> Result<(), CliError> {
    let Some(path) = output_path else {
        let mut stdout = io::stdout().lock();
        stdout
            .write_all(AppConfig::generate_sample_config().as_bytes())
            .map_err(|e| CliError::CommandError(format!("Failed to write to stdout: {}", e)))?;
        return Ok(());
    };

    if !force && Path::new(&path).exists() {
        return Err(CliError::CommandError(format!(
            "{} already exists, use --force to overwrite",
            path
        )));
    }

    AppConfig::default().save_to_file(&path).map_err(|e| {
        CliError::ConfigError(format!("Unable to write configuration file: {}", e))
    })?;

    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {}",
        "Set auth.email / auth.password before starting the server".yellow()
    );
    Ok(())
}
