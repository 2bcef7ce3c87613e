//! Free-standing string helpers used by the catalog and SQL layers.
//!
//! Each function is independent and allocation-exact where that is
//! cheap to arrange: formatting and concatenation size their output in a
//! first pass and fill it in a second.

use crate::error::{Result, RuntimeError};
use core::fmt::{self, Write};

/// Default delimiter set for [`strdelimit`].
pub const DEFAULT_DELIMITERS: &str = "_-|> <.";

/// Token cap meaning "split on every delimiter".
pub const UNLIMITED: usize = 0;

/// String-key equality predicate for [`crate::assoc::AssocTable`].
pub fn str_equal(a: &str, b: &str) -> bool {
    a == b
}

/// Owned copy of `src`.
pub fn strdup(src: &str) -> String {
    src.to_owned()
}

/// Owned copy of at most `max_len` bytes of `src`.
///
/// If the cut would fall inside a multi-byte character it moves back to the
/// previous character boundary, so the result may be shorter than
/// `max_len`.
pub fn strndup(src: &str, max_len: usize) -> String {
    if max_len >= src.len() {
        return src.to_owned();
    }
    let mut end = max_len;
    while !src.is_char_boundary(end) {
        end -= 1;
    }
    src[..end].to_owned()
}

struct LenCounter(usize);

impl Write for LenCounter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

/// Render `args` into a `String` whose capacity is exactly the rendered
/// length. The arguments are formatted twice: once to measure, once to
/// write.
pub fn format_exact(args: fmt::Arguments<'_>) -> String {
    if let Some(s) = args.as_str() {
        return s.to_owned();
    }
    let mut counter = LenCounter(0);
    // Counting never fails; a Display impl that errors yields an empty result.
    if counter.write_fmt(args).is_err() {
        return String::new();
    }
    let mut out = String::with_capacity(counter.0);
    if out.write_fmt(args).is_err() {
        return String::new();
    }
    out
}

/// `format!` with an exactly-sized result. See [`format_exact`].
#[macro_export]
macro_rules! format_exact {
    ($($arg:tt)*) => {
        $crate::strutil::format_exact(::core::format_args!($($arg)*))
    };
}

/// Concatenate `parts` into one exactly-sized string.
pub fn concat(parts: &[&str]) -> String {
    let total = parts.iter().map(|p| p.len()).sum();
    let mut out = String::with_capacity(total);
    for p in parts {
        out.push_str(p);
    }
    out
}

/// Split `haystack` on every occurrence of `delimiter`.
///
/// With `max_tokens > 0` at most that many tokens are produced and the last
/// one carries the rest of the input, delimiters included. Empty tokens
/// between adjacent delimiters, and a trailing empty token after a final
/// delimiter, are kept.
pub fn split(haystack: &str, delimiter: &str, max_tokens: usize) -> Result<Vec<String>> {
    if delimiter.is_empty() {
        return Err(RuntimeError::EmptyDelimiter);
    }
    let tokens = if max_tokens == UNLIMITED {
        haystack.split(delimiter).map(str::to_owned).collect()
    } else {
        haystack
            .splitn(max_tokens, delimiter)
            .map(str::to_owned)
            .collect()
    };
    Ok(tokens)
}

/// Inverse of [`split`]: join `tokens` with `delimiter` between each pair.
pub fn join<S: AsRef<str>>(tokens: &[S], delimiter: &str) -> String {
    let total = tokens.iter().map(|t| t.as_ref().len()).sum::<usize>()
        + delimiter.len() * tokens.len().saturating_sub(1);
    let mut out = String::with_capacity(total);
    for (i, t) in tokens.iter().enumerate() {
        if i > 0 {
            out.push_str(delimiter);
        }
        out.push_str(t.as_ref());
    }
    out
}

/// Lowercase ASCII letters; every other byte is copied unchanged.
pub fn casefold(src: &str) -> String {
    src.to_ascii_lowercase()
}

/// Alias of [`casefold`]; lowering is ASCII-only.
pub fn strdown(src: &str) -> String {
    casefold(src)
}

/// Replace, in place, every character of `s` that appears in `delimiters`
/// (or in [`DEFAULT_DELIMITERS`] when `None`) with `new_delimiter`.
/// Only ASCII characters are considered delimiters.
pub fn strdelimit<'a>(
    s: &'a mut String,
    delimiters: Option<&str>,
    new_delimiter: char,
) -> &'a mut String {
    let set = delimiters.unwrap_or(DEFAULT_DELIMITERS);
    if s.chars().any(|c| c.is_ascii() && set.contains(c)) {
        *s = s
            .chars()
            .map(|c| {
                if c.is_ascii() && set.contains(c) {
                    new_delimiter
                } else {
                    c
                }
            })
            .collect();
    }
    s
}
