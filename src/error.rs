//! Global error handling for filescan
//!
//! This module provides a centralized error type for walking, metadata
//! extraction and configuration.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Global error type for filescan operations
#[derive(Error, Debug)]
pub enum ScanError {
    /// A directory below the root could not be enumerated
    #[error("Directory unavailable: {}: {source}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Stat of a single file failed
    #[error("Metadata error: {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The walk root itself could not be enumerated
    #[error("Invalid root: {}: {source}", path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON processing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ScanError {
    /// Path the error refers to, if any
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::DirectoryUnavailable { path, .. }
            | Self::Metadata { path, .. }
            | Self::InvalidRoot { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Whether the error ends the current walk rather than a single branch
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::DirectoryUnavailable { .. } | Self::Metadata { .. }
        )
    }
}

/// Specialized Result type for filescan operations
pub type Result<T> = std::result::Result<T, ScanError>;

/// Creates a ScanError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::ScanError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
