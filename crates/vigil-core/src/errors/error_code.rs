//! VigilErrorCode trait for the CLI envelope boundary.

/// Trait for converting Vigil errors to envelope error codes.
/// Every error enum must implement this to provide a structured
/// code string for the `details.code` field of a failure envelope.
pub trait VigilErrorCode {
    /// Returns the envelope error code string (e.g., "INPUT_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted envelope string: `[ERROR_CODE] message`.
    fn envelope_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the envelope boundary.
pub const INPUT_ERROR: &str = "INPUT_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
