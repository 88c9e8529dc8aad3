pub mod matrix;
pub mod cluster;
pub mod contacts;
pub mod logging;

pub use matrix::MatrixConfig;
pub use cluster::ClusterConfig;
pub use contacts::ContactsConfig;
pub use logging::LoggingConfig;

/// Accepts the usual INI spellings of a boolean.
pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.trim_matches('"').to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}
