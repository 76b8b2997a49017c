//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.
//! - Exit code 2 is left to clap for usage errors; 3 is not assigned.

use nestconf::ConfigError;

/// Structured exit codes for nestconf.
///
/// These codes enable scripts to distinguish between different failure modes
/// and take appropriate action (supply a default, fix a file, fail fast, etc.).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Key not found in the tree, the defaults, or the environment.
    ///
    /// Scripts may retry with `--fallback` or `--default`.
    NotFound = 4,

    /// Value exists but cannot be read as requested (wrong type, scalar in the path).
    ValidationError = 5,

    /// A `${...}` placeholder could not be expanded.
    ExpansionError = 6,

    /// A configuration file could not be read or parsed.
    LoadError = 7,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingKey(_) => ExitCode::NotFound,

            ConfigError::TypeMismatch { .. }
            | ConfigError::NotAMapping { .. }
            | ConfigError::Deserialize { .. } => ExitCode::ValidationError,

            ConfigError::ExpandMissingKey { .. } | ConfigError::ExpandRecursionExceeded { .. } => {
                ExitCode::ExpansionError
            }

            ConfigError::InvalidDocument(_)
            | ConfigError::Json(_)
            | ConfigError::TextSyntax { .. }
            | ConfigError::ConfigFileRead { .. }
            | ConfigError::ConfigFileParse { .. }
            | ConfigError::Io(_) => ExitCode::LoadError,

            ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no ConfigError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}
