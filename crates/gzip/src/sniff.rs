//! Gzip container detection.

/// Leading magic bytes of a gzip member (RFC 1952).
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Returns true if the buffer starts with the gzip magic header.
///
/// This is a cheap heuristic over the first two bytes only; it does not
/// validate flags, checksums, or anything past the magic. Buffers shorter
/// than two bytes are never gzip.
#[inline]
pub fn is_gzipped(data: &[u8]) -> bool {
    data.starts_with(&GZIP_MAGIC)
}
