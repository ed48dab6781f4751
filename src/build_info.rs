//! Build information
//!
//! Build number and timestamp are stamped by build.rs.

pub const NAME: &str = env!("CARGO_PKG_NAME");
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const BUILD_NUMBER: &str = match option_env!("UNICONVERT_BUILD_NUMBER") {
    Some(s) => s,
    None => "0",
};

pub const BUILD_TIMESTAMP: &str = match option_env!("UNICONVERT_BUILD_TIMESTAMP") {
    Some(s) => s,
    None => "unknown",
};

/// One-line summary used by the `version` command
pub fn summary() -> String {
    format!(
        "{} {} (build {}, compiled {})",
        NAME, VERSION, BUILD_NUMBER, BUILD_TIMESTAMP
    )
}
