//! 过期时间解析
//!
//! 支持的输入：
//! - RFC 3339：`2026-10-01T12:00:00Z`
//! - 日期：`2026-10-01`（按 UTC 零点处理，即前端 date 输入框提交的格式）
//! - 相对时间：`30m`、`12h`、`7d`、`2w`、`1y`，可组合如 `1d12h`

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::errors::{LinkPulseError, Result};

/// 解析可选的过期时间，空字符串视为未设置
pub fn parse_expiration(input: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    match input.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_expire_time(value, Utc::now()).map(Some),
    }
}

pub fn parse_expire_time(input: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
            .ok_or_else(|| LinkPulseError::validation(format!("Invalid date: '{}'", input)));
    }

    let duration = parse_relative(input)?;
    now.checked_add_signed(duration)
        .ok_or_else(|| LinkPulseError::validation("Expiration date is out of range"))
}

fn parse_relative(input: &str) -> Result<Duration> {
    let invalid = || {
        LinkPulseError::validation(format!(
            "Invalid expiration '{}': expected RFC 3339, YYYY-MM-DD or a duration like 7d",
            input
        ))
    };

    let mut total = Duration::zero();
    let mut rest = input;

    while !rest.is_empty() {
        let digits = rest.find(|c: char| !c.is_ascii_digit()).unwrap_or(rest.len());
        if digits == 0 {
            return Err(invalid());
        }
        let amount: i64 = rest[..digits].parse().map_err(|_| invalid())?;
        rest = &rest[digits..];

        let unit_len = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(invalid());
        }
        let unit = &rest[..unit_len];
        rest = &rest[unit_len..];

        let step = match unit.to_ascii_lowercase().as_str() {
            "s" | "sec" | "secs" | "second" | "seconds" => Duration::try_seconds(amount),
            "m" | "min" | "mins" | "minute" | "minutes" => Duration::try_minutes(amount),
            "h" | "hour" | "hours" => Duration::try_hours(amount),
            "d" | "day" | "days" => Duration::try_days(amount),
            "w" | "week" | "weeks" => Duration::try_weeks(amount),
            "y" | "year" | "years" => amount.checked_mul(365).and_then(Duration::try_days),
            _ => return Err(invalid()),
        }
        .ok_or_else(invalid)?;

        total = total.checked_add(&step).ok_or_else(invalid)?;
    }

    if total <= Duration::zero() {
        return Err(invalid());
    }
    Ok(total)
}
