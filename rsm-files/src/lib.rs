use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("The file's magic value {magic:#010x} is the known error sentinel")]
    InvalidMagicValue { magic: u32 },

    #[error("The file is violating the expected format, because: {reason}")]
    FormatError { reason: &'static str },

    #[error("The reserved header bytes have to be zero, found {bytes:?}")]
    ReservedBytesViolation { bytes: [u8; 16] },

    #[error("The texture count {count} exceeds the maximum of {max}")]
    TextureCountExceeded { count: u32, max: u32 },

    /// Content the format technically allows, but that is dropped on save and therefore
    /// can't be represented. Callers decide whether this aborts the load or only warns.
    #[error("Unsupported content: {reason} (count: {count})")]
    IntegrityViolation { reason: &'static str, count: u32 },

    /// Represents all other cases of `std::io::Error`, including short reads.
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

pub mod common;
pub mod rsm;
