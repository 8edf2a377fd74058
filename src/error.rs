use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrpError {
    /// The source ended before a fixed-size or declared-length field was read.
    #[error("Truncated input at offset {offset:#x} (need {need} bytes)")]
    TruncatedInput { offset: u64, need: usize },
    #[error("Unsupported page version: {0}")]
    UnsupportedVersion(u32),
    #[error("Class mismatch at offset {offset:#x}: key declares {expected:#06x}, record restates {found:#06x}")]
    ClassMismatch { offset: u64, expected: u16, found: u16 },
    /// No decoder is registered for this class.  Not fatal to the page.
    #[error("Class {0:#06x} is not implemented")]
    UnsupportedClass(u16),
    #[error("Object record at offset {offset:#x} has no identifier")]
    MissingIdentity { offset: u64 },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PrpError {
    /// True when the failure only means "no decoder for this class";
    /// callers may skip the object and carry on.
    pub fn is_unsupported_class(&self) -> bool {
        matches!(self, PrpError::UnsupportedClass(_))
    }
}

pub type Result<T, E = PrpError> = std::result::Result<T, E>;
