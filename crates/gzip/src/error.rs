//! Error types for the gzip codec.

use std::ffi::c_int;

use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, GzipError>;

/// Message used when the engine reports a failure without an explanation.
const FALLBACK_MESSAGE: &str = "unknown gzip error";

/// Machine-readable classification of a failed codec operation.
///
/// Mirrors the status codes reported by the underlying zlib engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GzipErrorKind {
    /// Inconsistent stream state or invalid configuration (`Z_STREAM_ERROR`)
    Stream,
    /// Input violates the gzip/zlib/deflate format (`Z_DATA_ERROR`)
    Data,
    /// The engine could not allocate memory (`Z_MEM_ERROR`)
    Memory,
    /// No progress was possible, e.g. a truncated stream (`Z_BUF_ERROR`)
    Buffer,
    /// The linked zlib is incompatible with this binding (`Z_VERSION_ERROR`)
    Version,
    /// A preset dictionary is required to continue (`Z_NEED_DICT`)
    NeedDictionary,
    /// An errno-level failure outside the stream itself (`Z_ERRNO`)
    Errno,
    /// A status code this crate does not recognize
    Unknown(i32),
}

/// Error raised by a failed compress or decompress call.
///
/// `message` comes from the engine when it provides one and doubles as the
/// `Display` rendering, so the structured message and the generic
/// description are always the same string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct GzipError {
    /// Machine-readable classification of the failure.
    pub kind: GzipErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl GzipError {
    /// Classifies an engine status code and optional engine message.
    ///
    /// Known codes map to fixed kinds; anything else becomes
    /// [`GzipErrorKind::Unknown`]. A missing message is replaced with a
    /// fixed fallback rather than an empty string.
    pub(crate) fn classify(code: c_int, message: Option<&str>) -> Self {
        let kind = match code {
            libz_sys::Z_STREAM_ERROR => GzipErrorKind::Stream,
            libz_sys::Z_DATA_ERROR => GzipErrorKind::Data,
            libz_sys::Z_MEM_ERROR => GzipErrorKind::Memory,
            libz_sys::Z_BUF_ERROR => GzipErrorKind::Buffer,
            libz_sys::Z_VERSION_ERROR => GzipErrorKind::Version,
            libz_sys::Z_NEED_DICT => GzipErrorKind::NeedDictionary,
            libz_sys::Z_ERRNO => GzipErrorKind::Errno,
            code => GzipErrorKind::Unknown(code),
        };
        let message = match message {
            Some(text) if !text.is_empty() => text.to_owned(),
            _ => FALLBACK_MESSAGE.to_owned(),
        };

        Self { kind, message }
    }
}
