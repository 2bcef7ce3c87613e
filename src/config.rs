//! Runtime options carried as an explicit value.
//!
//! Options are a bitmask the parser consults per call (`get_option`) and
//! a pair of charset labels. Nothing here is process-global: each database
//! handle owns its own [`Config`].

use crate::error::{Result, RuntimeError};
use bitflags::bitflags;
use core::fmt;
use encoding_rs::{Encoding, WINDOWS_1252};
use log::debug;

bitflags! {
    /// Parser options, bit-compatible with the classic MDB option mask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Options: u32 {
        const USE_INDEX   = 1 << 0;
        const DEBUG_LIKE  = 1 << 1;
        const DEBUG_WRITE = 1 << 2;
        const DEBUG_USAGE = 1 << 3;
        const DEBUG_OLE   = 1 << 4;
        const DEBUG_ROW   = 1 << 5;
        const DEBUG_PROPS = 1 << 6;
        const NO_MEMO     = 1 << 7;
    }
}

impl Options {
    /// Parse names like `"use_index:debug_row"`. Names are separated by
    /// `:` or `,`, matched case-insensitively, and `all` selects every
    /// option. Blank segments are ignored.
    pub fn parse(spec: &str) -> Result<Self> {
        let mut opts = Options::empty();
        for name in spec.split(|c: char| c == ':' || c == ',').map(str::trim) {
            if name.is_empty() {
                continue;
            }
            if name.eq_ignore_ascii_case("all") {
                opts = Options::all();
                continue;
            }
            let flag = Options::all()
                .iter_names()
                .find(|(n, _)| n.eq_ignore_ascii_case(name))
                .map(|(_, f)| f)
                .ok_or_else(|| RuntimeError::UnknownOption(name.to_string()))?;
            opts |= flag;
        }
        Ok(opts)
    }
}

/// Output charset assumed by the narrow text helpers.
pub const DEFAULT_TARGET_CHARSET: &str = "UTF-8";

/// Code page of single-byte text stored in the database.
pub const DEFAULT_SOURCE_CHARSET: &str = "windows-1252";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    options: Options,
    target_charset: String,
    source_charset: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            options: Options::empty(),
            target_charset: DEFAULT_TARGET_CHARSET.to_string(),
            source_charset: DEFAULT_SOURCE_CHARSET.to_string(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn with_target_charset(mut self, charset: &str) -> Self {
        self.target_charset = charset.to_string();
        self
    }

    pub fn with_source_charset(mut self, charset: &str) -> Self {
        self.source_charset = charset.to_string();
        self
    }

    /// Build a config from option names held in environment variable `var`.
    /// A missing or non-Unicode variable yields the defaults.
    pub fn from_env_var(var: &str) -> Result<Self> {
        let options = match std::env::var(var) {
            Ok(spec) => Options::parse(&spec)?,
            Err(_) => Options::empty(),
        };
        Ok(Self::new().with_options(options))
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// True if any bit of `option` is enabled.
    pub fn get_option(&self, option: Options) -> bool {
        self.options.intersects(option)
    }

    pub fn set_option(&mut self, option: Options) {
        self.options.insert(option);
    }

    pub fn clear_option(&mut self, option: Options) {
        self.options.remove(option);
    }

    pub fn target_charset(&self) -> &str {
        &self.target_charset
    }

    pub fn source_charset(&self) -> &str {
        &self.source_charset
    }

    /// Encoding for the source charset label; unknown labels fall back to
    /// Windows-1252.
    pub fn source_encoding(&self) -> &'static Encoding {
        Encoding::for_label(self.source_charset.as_bytes()).unwrap_or(WINDOWS_1252)
    }

    /// Emit a debug record for diagnostic class `class` if it is enabled.
    pub fn debug(&self, class: Options, args: fmt::Arguments<'_>) {
        if self.get_option(class) {
            debug!(target: "mdb_runtime::diag", "[{:?}] {}", class, args);
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("options", &self.options)
            .field("target_charset", &self.target_charset)
            .field("source_charset", &self.source_charset)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let c = Config::default();
        assert_eq!(c.options(), Options::empty());
        assert_eq!(c.target_charset(), "UTF-8");
        assert_eq!(c.source_encoding(), WINDOWS_1252);
        assert!(!c.get_option(Options::USE_INDEX));
    }

    #[test]
    fn option_bits_match_classic_mask() {
        assert_eq!(Options::USE_INDEX.bits(), 0x01);
        assert_eq!(Options::DEBUG_ROW.bits(), 0x20);
        assert_eq!(Options::NO_MEMO.bits(), 0x80);
    }

    #[test]
    fn set_and_clear() {
        let mut c = Config::new();
        c.set_option(Options::DEBUG_ROW | Options::NO_MEMO);
        assert!(c.get_option(Options::DEBUG_ROW));
        assert!(c.get_option(Options::NO_MEMO | Options::USE_INDEX));
        c.clear_option(Options::DEBUG_ROW);
        assert!(!c.get_option(Options::DEBUG_ROW));
        assert!(c.get_option(Options::NO_MEMO));
    }

    #[test]
    fn parse_names() {
        assert_eq!(
            Options::parse("use_index:DEBUG_ROW").unwrap(),
            Options::USE_INDEX | Options::DEBUG_ROW
        );
        assert_eq!(Options::parse(" no_memo , ").unwrap(), Options::NO_MEMO);
        assert_eq!(Options::parse("").unwrap(), Options::empty());
        assert_eq!(Options::parse("all").unwrap(), Options::all());
    }

    #[test]
    fn parse_rejects_unknown() {
        match Options::parse("use_index:verbose") {
            Err(RuntimeError::UnknownOption(name)) => assert_eq!(name, "verbose"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn missing_env_var_means_defaults() {
        let c = Config::from_env_var("MDB_RUNTIME_TEST_UNSET_VARIABLE").unwrap();
        assert_eq!(c, Config::new());
    }

    #[test]
    fn unknown_source_label_falls_back() {
        let c = Config::new().with_source_charset("no-such-codepage");
        assert_eq!(c.source_encoding(), WINDOWS_1252);
        let c = Config::new().with_target_charset("ISO-8859-1");
        assert_eq!(c.target_charset(), "ISO-8859-1");
    }

    #[test]
    fn debug_is_silent_when_disabled() {
        // Must not panic or require a logger either way.
        let c = Config::new().with_options(Options::DEBUG_LIKE);
        c.debug(Options::DEBUG_LIKE, format_args!("like {}", "%acct%"));
        c.debug(Options::DEBUG_OLE, format_args!("never shown"));
    }
}
