//! Lossy conversion between 2-byte little-endian text units and
//! single-byte text.
//!
//! Text columns in Jet4 databases are stored as UTF-16LE. The parser only
//! needs a narrow rendering, so units outside one byte collapse to `'?'`.
//! The bounded primitives never write past the destination slice and
//! always leave it NUL-terminated when it has any room at all.

use crate::config::Config;
use byteorder::{ByteOrder, LittleEndian};
use log::trace;
use std::borrow::Cow;

/// Replacement for units that do not fit in one byte.
pub const REPLACEMENT: u8 = b'?';

/// Convert UTF-16LE units in `src` to single bytes in `dst`.
///
/// A unit whose high byte is zero and low byte is non-zero is copied as its
/// low byte; every other unit (including an embedded zero unit) becomes
/// [`REPLACEMENT`]. A trailing odd byte is treated as a unit with a zero
/// high byte. At most `dst.len() - 1` bytes are produced, followed by a
/// NUL; excess input is dropped. Returns the number of bytes produced,
/// terminator excluded.
pub fn wide_to_narrow(src: &[u8], dst: &mut [u8]) -> usize {
    let Some(limit) = dst.len().checked_sub(1) else {
        return 0;
    };
    let pairs = src.chunks_exact(2);
    let odd = pairs.remainder().first().map(|&lo| u16::from(lo));
    let units = pairs.map(LittleEndian::read_u16).chain(odd);
    let mut written = 0;
    for (code, out) in units.zip(dst[..limit].iter_mut()) {
        *out = match code {
            1..=0xFF => code as u8,
            _ => REPLACEMENT,
        };
        written += 1;
    }
    dst[written] = 0;
    trace!("narrowed {} source bytes to {written}", src.len());
    written
}

/// Promote each byte of `src` to a UTF-16LE unit in `dst`.
///
/// Room for one zero terminator unit is always reserved, so at most
/// `dst.len() / 2 - 1` units are written. Returns the number of bytes
/// written, terminator excluded.
pub fn narrow_to_wide(src: &[u8], dst: &mut [u8]) -> usize {
    let units = (dst.len() / 2).saturating_sub(1);
    let mut written = 0;
    for (&b, out) in src.iter().zip(dst.chunks_exact_mut(2).take(units)) {
        LittleEndian::write_u16(out, u16::from(b));
        written += 2;
    }
    let tail = (dst.len() - written).min(2);
    dst[written..written + tail].fill(0);
    trace!("widened {} source bytes to {written}", src.len());
    written
}

/// Owned form of [`wide_to_narrow`] sized to hold all of `src`.
pub fn decode_wide(src: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; src.len().div_ceil(2) + 1];
    let n = wide_to_narrow(src, &mut out);
    out.truncate(n);
    out
}

/// Owned form of [`narrow_to_wide`] sized to hold all of `src`.
pub fn encode_wide(src: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; src.len() * 2 + 2];
    let n = narrow_to_wide(src, &mut out);
    out.truncate(n);
    out
}

/// Narrow a single character: ASCII passes through, anything else is
/// [`REPLACEMENT`].
pub fn unichar_to_narrow(c: char) -> u8 {
    if c.is_ascii() {
        c as u8
    } else {
        REPLACEMENT
    }
}

/// Decode single-byte text in the configured source code page to UTF-8.
/// Unmappable bytes become U+FFFD.
pub fn narrow_to_utf8<'a>(config: &Config, src: &'a [u8]) -> Cow<'a, str> {
    let (text, had_errors) = config
        .source_encoding()
        .decode_without_bom_handling(src);
    if had_errors {
        config.debug(
            crate::config::Options::DEBUG_ROW,
            format_args!("replacement characters while decoding {} bytes", src.len()),
        );
    }
    text
}
