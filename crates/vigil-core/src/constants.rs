//! Shared constants for the Vigil risk auditor.

/// Vigil version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default maximum number of findings kept in a report.
pub const DEFAULT_MAX_FINDINGS: usize = 100;

/// Upper bound of the risk score range.
pub const MAX_RISK_SCORE: u8 = 10;

/// IPv4 all-addresses sentinel for public-exposure rules.
pub const ANY_IPV4: &str = "0.0.0.0/0";

/// IPv6 all-addresses sentinel for public-exposure rules.
pub const ANY_IPV6: &str = "::/0";

/// Project config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "vigil.toml";
