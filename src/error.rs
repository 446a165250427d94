//! Error type shared by synthesis and export.

use std::io;

/// Everything that can go wrong while producing a tick asset.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A synthesis or export parameter is outside its valid domain.
    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },

    /// The compressed-format encoder could not run on this host.
    #[error("{encoder} encoder unavailable: {reason}")]
    EncoderUnavailable { encoder: String, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("wav error: {0}")]
    Wav(#[from] hound::Error),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, value: impl ToString) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
        }
    }

    pub(crate) fn unavailable(encoder: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::EncoderUnavailable {
            encoder: encoder.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if a batch may carry on after this error.
    ///
    /// Bad parameters only spoil one preset and a missing encoder only one
    /// output file. Filesystem and container errors mean the output location
    /// is unusable.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::InvalidParameter { .. } | Error::EncoderUnavailable { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
