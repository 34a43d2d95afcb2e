pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: i64 = 8080;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_PREFER_REPRESENTATION: bool = false;
pub const DEFAULT_STATUS_DECAY_MS: i64 = 3000;
