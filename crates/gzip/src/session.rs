//! Stateful session driving one pass of the zlib engine.

use std::ffi::{CStr, c_int, c_uint};
use std::mem;

use libz_sys::{self as zlib, z_stream};
use tracing::trace;

use crate::error::{GzipError, Result};
use crate::{CompressionLevel, WindowBits};

/// Output is drained from the engine in chunks of this size.
const CHUNK: usize = 16 * 1024;

/// zlib's default memLevel for deflate state.
const MEM_LEVEL: c_int = 8;

enum Direction {
    Deflate,
    Inflate,
}

/// Exclusive owner of one engine stream handle for one whole-buffer pass.
///
/// A session never outlives the call that created it; the handle is
/// released in `Drop`, covering error and panic paths as well as success.
struct CodecSession {
    stream: Box<z_stream>,
    direction: Direction,
}

/// Compresses a whole buffer with the given level and framing.
///
/// Empty input returns an empty buffer without touching the engine.
pub(crate) fn deflate_buffer(
    input: &[u8],
    level: CompressionLevel,
    window_bits: WindowBits,
) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let output = CodecSession::new_deflate(level, window_bits)?.compress(input)?;
    trace!(input = input.len(), output = output.len(), "deflate pass complete");
    Ok(output)
}

/// Decompresses a whole buffer with the given framing.
///
/// Empty input returns an empty buffer without touching the engine.
pub(crate) fn inflate_buffer(input: &[u8], window_bits: WindowBits) -> Result<Vec<u8>> {
    if input.is_empty() {
        return Ok(Vec::new());
    }

    let output = CodecSession::new_inflate(window_bits)?.decompress(input)?;
    trace!(input = input.len(), output = output.len(), "inflate pass complete");
    Ok(output)
}

impl CodecSession {
    fn new_deflate(level: CompressionLevel, window_bits: WindowBits) -> Result<Self> {
        let mut session = Self {
            stream: Box::new(unsafe { mem::MaybeUninit::zeroed().assume_init() }),
            direction: Direction::Deflate,
        };

        let status = unsafe {
            zlib::deflateInit2_(
                session.stream.as_mut(),
                level.raw() as c_int,
                zlib::Z_DEFLATED,
                window_bits.raw() as c_int,
                MEM_LEVEL,
                zlib::Z_DEFAULT_STRATEGY,
                zlib::zlibVersion(),
                mem::size_of::<z_stream>() as c_int,
            )
        };
        if status != zlib::Z_OK {
            return Err(session.classify(status));
        }

        Ok(session)
    }

    fn new_inflate(window_bits: WindowBits) -> Result<Self> {
        let mut session = Self {
            stream: Box::new(unsafe { mem::MaybeUninit::zeroed().assume_init() }),
            direction: Direction::Inflate,
        };

        let status = unsafe {
            zlib::inflateInit2_(
                session.stream.as_mut(),
                window_bits.raw() as c_int,
                zlib::zlibVersion(),
                mem::size_of::<z_stream>() as c_int,
            )
        };
        if status != zlib::Z_OK {
            return Err(session.classify(status));
        }

        Ok(session)
    }

    /// Runs the whole input through deflate, draining into a growable buffer
    /// until the engine signals the end of the stream.
    fn compress(mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 2 + 64);
        let mut remaining = input;

        loop {
            // avail_in is 32-bit; re-arm the input slice as the engine
            // consumes it so buffers beyond u32::MAX still feed correctly.
            if self.stream.avail_in == 0 && !remaining.is_empty() {
                let fed = remaining.len().min(c_uint::MAX as usize);
                self.stream.next_in = remaining.as_ptr() as *mut u8;
                self.stream.avail_in = fed as c_uint;
                remaining = &remaining[fed..];
            }
            let flush = if remaining.is_empty() {
                zlib::Z_FINISH
            } else {
                zlib::Z_NO_FLUSH
            };

            let used = output.len();
            output.resize(used + CHUNK, 0);
            self.stream.next_out = output[used..].as_mut_ptr();
            self.stream.avail_out = CHUNK as c_uint;

            let status = unsafe { zlib::deflate(self.stream.as_mut(), flush) };
            output.truncate(used + CHUNK - self.stream.avail_out as usize);

            match status {
                zlib::Z_STREAM_END => break,
                zlib::Z_OK => continue,
                code => return Err(self.classify(code)),
            }
        }

        Ok(output)
    }

    /// Runs the whole input through inflate. A stream end with input left
    /// over means the buffer concatenates several independent members;
    /// the engine is reset and decoding continues, appending each payload.
    fn decompress(mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() * 2);
        let mut remaining = input;

        loop {
            if self.stream.avail_in == 0 && !remaining.is_empty() {
                let fed = remaining.len().min(c_uint::MAX as usize);
                self.stream.next_in = remaining.as_ptr() as *mut u8;
                self.stream.avail_in = fed as c_uint;
                remaining = &remaining[fed..];
            }

            let used = output.len();
            output.resize(used + CHUNK, 0);
            self.stream.next_out = output[used..].as_mut_ptr();
            self.stream.avail_out = CHUNK as c_uint;

            let status = unsafe { zlib::inflate(self.stream.as_mut(), zlib::Z_NO_FLUSH) };
            output.truncate(used + CHUNK - self.stream.avail_out as usize);

            match status {
                zlib::Z_STREAM_END => {
                    if self.stream.avail_in == 0 && remaining.is_empty() {
                        break;
                    }
                    let reset = unsafe { zlib::inflateReset(self.stream.as_mut()) };
                    if reset != zlib::Z_OK {
                        return Err(self.classify(reset));
                    }
                }
                zlib::Z_OK => continue,
                code => return Err(self.classify(code)),
            }
        }

        Ok(output)
    }

    /// Builds a [`GzipError`] from a status code and the engine's message
    /// slot. Must be called before the handle is torn down.
    fn classify(&self, code: c_int) -> GzipError {
        let message = unsafe {
            let msg = self.stream.msg;
            if msg.is_null() {
                None
            } else {
                CStr::from_ptr(msg).to_str().ok()
            }
        };
        GzipError::classify(code, message)
    }
}

impl Drop for CodecSession {
    fn drop(&mut self) {
        unsafe {
            match self.direction {
                Direction::Deflate => zlib::deflateEnd(self.stream.as_mut()),
                Direction::Inflate => zlib::inflateEnd(self.stream.as_mut()),
            }
        };
    }
}
