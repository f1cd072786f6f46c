//! Whole-buffer gzip and deflate compression built directly on zlib.
//!
//! This crate provides:
//! - [`compress`] / [`decompress`] over in-memory byte buffers
//! - Window-bits control for gzip, zlib, and raw-deflate framing
//! - Gzip detection via [`is_gzipped`]
//! - Structured errors classifying the engine's status codes
//!
//! Every call is self-contained: it owns its own engine handle, runs
//! synchronously to completion, and releases the handle on every exit path.
//!
//! # Example
//!
//! ```
//! use gzbuf::{compress, decompress, is_gzipped};
//!
//! let payload = b"hello hello hello hello";
//! let packed = compress(payload)?;
//!
//! assert!(is_gzipped(&packed));
//! assert_eq!(decompress(&packed)?, payload);
//! # Ok::<(), gzbuf::GzipError>(())
//! ```

mod error;
mod session;
mod sniff;

pub use error::{GzipError, GzipErrorKind, Result};
pub use sniff::is_gzipped;

/// Compression level passed to the deflate engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionLevel(i32);

impl CompressionLevel {
    /// Store without compressing.
    pub const NO_COMPRESSION: CompressionLevel = CompressionLevel(0);
    /// Fastest compression, largest output.
    pub const BEST_SPEED: CompressionLevel = CompressionLevel(1);
    /// Smallest output, slowest compression.
    pub const BEST_COMPRESSION: CompressionLevel = CompressionLevel(9);
    /// The engine's default space/speed tradeoff.
    pub const DEFAULT: CompressionLevel = CompressionLevel(-1);

    /// Creates a level from a raw engine value.
    ///
    /// # Arguments
    /// * `level` - Raw zlib level in `-1..=9`
    ///
    /// # Errors
    /// Rejects values outside the engine-accepted range before any work is
    /// done, with a [`GzipErrorKind::Stream`] error.
    pub fn new(level: i32) -> Result<Self> {
        if (-1..=9).contains(&level) {
            Ok(Self(level))
        } else {
            Err(GzipError {
                kind: GzipErrorKind::Stream,
                message: format!("invalid compression level: {level}"),
            })
        }
    }

    /// Raw value handed to the engine.
    pub const fn raw(self) -> i32 {
        self.0
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// History-window size and container framing selector, in zlib's convention.
///
/// The raw value is handed to the engine unchanged: `9..=15` selects zlib
/// framing with the given window, adding 16 selects gzip framing, adding 32
/// (decompression only) enables automatic gzip/zlib header detection, and a
/// negative magnitude selects raw deflate with no header or trailer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowBits(i32);

impl WindowBits {
    /// Largest history window the engine supports (zlib `MAX_WBITS`).
    pub const MAX: i32 = 15;

    /// Gzip framing with the maximum window. Compression default.
    pub const GZIP: WindowBits = WindowBits(Self::MAX + 16);
    /// Automatic gzip/zlib header detection. Decompression default.
    pub const AUTO: WindowBits = WindowBits(Self::MAX + 32);
    /// Raw deflate with no header or trailer.
    pub const RAW: WindowBits = WindowBits(-Self::MAX);
    /// Zlib framing with the maximum window.
    pub const ZLIB: WindowBits = WindowBits(Self::MAX);

    /// Creates an explicit window-bits value in zlib's convention.
    ///
    /// Out-of-range magnitudes are rejected by the engine at
    /// initialization, before any data is processed.
    pub const fn new(bits: i32) -> Self {
        Self(bits)
    }

    /// Raw value handed to the engine.
    pub const fn raw(self) -> i32 {
        self.0
    }
}

/// Compresses a buffer into a gzip stream with the default level.
///
/// Empty input is a defined no-op and returns an empty buffer.
///
/// # Errors
/// Returns a [`GzipError`] when the engine rejects the configuration or
/// fails mid-stream. No partial output is returned on failure.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, CompressionLevel::DEFAULT, WindowBits::GZIP)
}

/// Compresses a buffer with an explicit level and framing.
///
/// # Arguments
/// * `data` - Bytes to compress; never mutated
/// * `level` - Space/speed tradeoff for the engine
/// * `window_bits` - Container framing and history-window size
///
/// # Errors
/// Returns a [`GzipError`] when the engine rejects the configuration or
/// fails mid-stream.
pub fn compress_with(
    data: &[u8],
    level: CompressionLevel,
    window_bits: WindowBits,
) -> Result<Vec<u8>> {
    session::deflate_buffer(data, level, window_bits)
}

/// Decompresses a gzip or zlib stream, detecting the framing from its
/// header.
///
/// A buffer formed by concatenating several independently compressed gzip
/// streams decompresses to the concatenation of their payloads. Empty input
/// is a defined no-op and returns an empty buffer.
///
/// # Errors
/// Returns a [`GzipError`] with kind [`GzipErrorKind::Data`] for malformed
/// or non-gzip input, and the engine's classification for any other
/// failure.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, WindowBits::AUTO)
}

/// Decompresses a buffer with explicit framing, e.g. [`WindowBits::RAW`]
/// for a bare deflate stream with no header or trailer.
///
/// # Arguments
/// * `data` - Compressed bytes; never mutated
/// * `window_bits` - Container framing and history-window size
///
/// # Errors
/// Returns a [`GzipError`] when the input does not match the selected
/// framing or the engine fails mid-stream.
pub fn decompress_with(data: &[u8], window_bits: WindowBits) -> Result<Vec<u8>> {
    session::inflate_buffer(data, window_bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compression_level_presets() {
        assert_eq!(CompressionLevel::NO_COMPRESSION.raw(), 0);
        assert_eq!(CompressionLevel::BEST_SPEED.raw(), 1);
        assert_eq!(CompressionLevel::BEST_COMPRESSION.raw(), 9);
        assert_eq!(CompressionLevel::DEFAULT.raw(), -1);
        assert_eq!(CompressionLevel::default(), CompressionLevel::DEFAULT);
    }

    #[test]
    fn test_compression_level_range_check() {
        assert_eq!(CompressionLevel::new(5).unwrap().raw(), 5);
        assert_eq!(CompressionLevel::new(-1).unwrap(), CompressionLevel::DEFAULT);

        let error = CompressionLevel::new(10).unwrap_err();
        assert_eq!(error.kind, GzipErrorKind::Stream);
        assert!(CompressionLevel::new(-2).is_err());
    }

    #[test]
    fn test_window_bits_values() {
        assert_eq!(WindowBits::GZIP.raw(), 31);
        assert_eq!(WindowBits::AUTO.raw(), 47);
        assert_eq!(WindowBits::RAW.raw(), -15);
        assert_eq!(WindowBits::ZLIB.raw(), 15);
        assert_eq!(WindowBits::new(-9).raw(), -9);
    }

    #[test]
    fn test_default_roundtrip() {
        let original = b"The quick brown fox jumps over the lazy dog";
        let compressed = compress(original).unwrap();

        assert_ne!(compressed.as_slice(), original.as_slice());
        assert!(is_gzipped(&compressed));
        assert_eq!(decompress(&compressed).unwrap(), original);
    }

    #[test]
    fn test_zlib_framing_roundtrip() {
        let original = b"zlib framed payload";
        let compressed =
            compress_with(original, CompressionLevel::DEFAULT, WindowBits::ZLIB).unwrap();

        // zlib framing carries no gzip magic but still auto-detects.
        assert!(!is_gzipped(&compressed));
        assert_eq!(decompress(&compressed).unwrap(), original);
    }
}
