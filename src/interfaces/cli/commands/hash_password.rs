//! hash-password command

use std::io::{self, Write};

use crate::interfaces::cli::CliError;
use crate::utils::password::hash_password;

/// 交互式输入密码（带确认）
fn prompt_password_with_confirm() -> Result<String, CliError> {
    let read = |prompt: &str| {
        print!("{}", prompt);
        io::stdout()
            .flush()
            .map_err(|e| CliError::CommandError(e.to_string()))?;
        rpassword::read_password()
            .map_err(|e| CliError::CommandError(format!("Failed to read password: {}", e)))
    };

    let password = read("Enter password: ")?;
    let confirm = read("Confirm password: ")?;

    if password != confirm {
        return Err(CliError::CommandError("Passwords do not match".to_string()));
    }
    Ok(password)
}

/// 打印 Argon2 哈希，可直接填入 `auth.password`
pub fn hash_password_command(password: Option<String>) -> Result<(), CliError> {
    let password = match password {
        Some(p) => p,
        None => prompt_password_with_confirm()?,
    };

    if password.is_empty() {
        return Err(CliError::CommandError("Password must not be empty".to_string()));
    }

    let hash = hash_password(&password)?;
    println!("{}", hash);
    Ok(())
}
