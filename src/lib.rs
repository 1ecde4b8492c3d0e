//! LinkPulse - URL shortener backend with click analytics
//!
//! # Architecture
//! - `storage`: SeaORM persistence for links and click events
//! - `services`: link registry, analytics and login
//! - `analytics`: buffered click event recording and device aggregates
//! - `api`: HTTP routes and middleware
//! - `config`: TOML + environment configuration
//! - `runtime`: startup wiring, server mode and graceful shutdown
//! - `interfaces`: CLI commands

pub mod analytics;
pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
