mod loader;
mod structs;

pub use loader::{DEFAULT_CONFIG_PATH, MAX_ANALYTICS_BATCH_SIZE, MAX_TOKEN_TTL_MINUTES};
pub use structs::*;
