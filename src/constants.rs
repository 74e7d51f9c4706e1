//! Constants used throughout the application
//!
//! This module centralizes defaults, limits and user-facing strings to keep
//! the configuration, service and web layers consistent.

/// Application name, used for config lookup and page titles
pub const APP_NAME: &str = "stitchlog";

// Configuration defaults
pub const CONFIG_FILE_NAME: &str = "stitchlog.toml";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://crochet.db?mode=rwc";
pub const DEFAULT_UPLOAD_DIR: &str = "static/uploads";
pub const DEFAULT_LOG_LEVEL: &str = "info";

// Upload limits
/// Default request body limit for thumbnail uploads (16 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;
pub const MIN_UPLOAD_BYTES: usize = 1024;
pub const MAX_UPLOAD_BYTES: usize = 512 * 1024 * 1024;

// Counter floors
pub const ROUND_FLOOR: i32 = 1;
pub const MADE_COUNT_FLOOR: i32 = 0;

// Search result caps for the JSON endpoints
pub const MATERIAL_SEARCH_LIMIT: u64 = 20;
pub const TAG_SEARCH_LIMIT: u64 = 20;

// Messages
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
pub const SERVER_LISTENING: &str = "Listening on";
