/// Base URL of the Travora REST gateway.
/// Configured at compile time:
/// - Development: http://localhost:8080 (default)
/// - Production: via BACKEND_URL in .env or the environment
pub const BACKEND_URL: &str = match option_env!("BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:8080",
};

/// Storage key holding the raw credential token.
pub const TOKEN_STORAGE_KEY: &str = "travora_auth_token";

/// Storage key holding the serialized identity next to the token.
pub const USER_DATA_STORAGE_KEY: &str = "travora_user_data";
