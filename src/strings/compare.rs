//! `ini_string_match_*` equivalents: byte-by-byte comparison that folds
//! case when the format is case-insensitive and collapses whitespace runs
//! inside names to a single space unless `no_spaces_in_names`.

use crate::classify::is_plain_whitespace;
use crate::format::{Format, FormatFlags};

fn fold(b: u8, fmt: Format) -> u8 {
    if fmt.case_sensitive {
        b
    } else {
        b.to_ascii_lowercase()
    }
}

/// Normalized-comparison iterator: folds case and collapses whitespace
/// runs to a single space (unless `no_spaces_in_names`), without
/// allocating.
struct Normalized<'a> {
    bytes: &'a [u8],
    pos: usize,
    fmt: Format,
}

impl<'a> Iterator for Normalized<'a> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let b = *self.bytes.get(self.pos)?;
        if !self.fmt.flags.contains(FormatFlags::NO_SPACES_IN_NAMES) && is_plain_whitespace(b) {
            while self
                .bytes
                .get(self.pos)
                .copied()
                .map(is_plain_whitespace)
                .unwrap_or(false)
            {
                self.pos += 1;
            }
            return Some(b' ');
        }
        self.pos += 1;
        Some(fold(b, self.fmt))
    }
}

fn normalized(s: &[u8], fmt: Format) -> Normalized<'_> {
    Normalized {
        bytes: s,
        pos: 0,
        fmt,
    }
}

/// Compares two plain (already-unquoted) strings under `fmt`'s case/space
/// rules.
pub fn string_match_ss(a: &[u8], b: &[u8], fmt: Format) -> bool {
    normalized(a, fmt).eq(normalized(b, fmt))
}

/// Compares a plain string against a raw `.ini`-formatted string, unquoting
/// the latter lazily before comparison.
pub fn string_match_si(simple: &[u8], ini: &[u8], fmt: Format) -> bool {
    let mut owned = ini.to_vec();
    let n = crate::strings::unquote(&mut owned, fmt);
    string_match_ss(simple, &owned[..n], fmt)
}

/// Compares two raw `.ini`-formatted strings, unquoting both lazily.
pub fn string_match_ii(a: &[u8], b: &[u8], fmt: Format) -> bool {
    let mut oa = a.to_vec();
    let na = crate::strings::unquote(&mut oa, fmt);
    let mut ob = b.to_vec();
    let nb = crate::strings::unquote(&mut ob, fmt);
    string_match_ss(&oa[..na], &ob[..nb], fmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;

    #[test]
    fn case_insensitive_by_default() {
        assert!(string_match_ss(b"Key", b"key", Format::DEFAULT));
    }

    #[test]
    fn case_sensitive_when_flagged() {
        let mut fmt = Format::DEFAULT;
        fmt.case_sensitive = true;
        assert!(!string_match_ss(b"Key", b"key", fmt));
    }

    #[test]
    fn whitespace_collapses_in_names() {
        assert!(string_match_ss(b"a  b", b"a b", Format::DEFAULT));
    }

    #[test]
    fn whitespace_literal_when_no_spaces_in_names() {
        let mut fmt = Format::DEFAULT;
        fmt.flags |= FormatFlags::NO_SPACES_IN_NAMES;
        assert!(!string_match_ss(b"a  b", b"a b", fmt));
    }

    #[test]
    fn ini_variant_unquotes_first() {
        assert!(string_match_si(b"a b", b"\"a b\"", Format::DEFAULT));
    }
}
