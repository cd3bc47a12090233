//! Pieces shared by every crate in the workspace.
//!
//! Currently only logging setup lives here; the binary and the server crate
//! both go through [`utils::logging`] so output format stays uniform.

pub mod utils;

/// Selects the subscriber formatter used by [`utils::logging::init_from_env`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value. Anything other than `json` means compact.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}
