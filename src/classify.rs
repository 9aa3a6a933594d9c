//! Pure character-classification predicates, parameterized by [`Format`].
//!
//! These mirror `IniOptions`'s `is_*` method family in spirit (one small
//! predicate per dialect decision) but operate on bytes rather than `char`,
//! since the core parser works over a raw byte buffer (see `DESIGN.md`).

use crate::format::{Format, MarkerMode, ANY_SPACE};

/// Horizontal tab, space, vertical tab, form feed - always forgettable.
/// CR/LF count too, but only when preceded by a continuation backslash;
/// that case is handled by the scanner, not this predicate, since it needs
/// lookbehind the classifier alone can't see.
pub fn is_plain_whitespace(b: u8) -> bool {
    matches!(b, b'\t' | b' ' | 0x0b | 0x0c)
}

/// `\r` or `\n`.
pub fn is_newline(b: u8) -> bool {
    matches!(b, b'\r' | b'\n')
}

/// Is `b` a metacharacter for this format: backslash, an active quote
/// delimiter, a newline, or an active comment marker?
pub fn is_metachar(b: u8, fmt: Format) -> bool {
    b == b'\\'
        || (b == b'"' && !fmt.flags.contains(crate::format::FormatFlags::NO_DOUBLE_QUOTES))
        || (b == b'\'' && !fmt.flags.contains(crate::format::FormatFlags::NO_SINGLE_QUOTES))
        || is_newline(b)
        || is_comment_marker_byte(b, fmt)
}

/// Is `b` one of the two comment-marker bytes configured as *some* marker
/// (regardless of which mode), irrespective of position?
fn is_comment_marker_byte(b: u8, fmt: Format) -> bool {
    (b == b';' && fmt.semicolon_marker != MarkerMode::NotAMarker)
        || (b == b'#' && fmt.hash_marker != MarkerMode::NotAMarker)
}

/// Is the byte at `pos` in `s` a comment opener, given the preceding byte
/// must be whitespace or start-of-buffer?
pub fn is_comment_opener(s: &[u8], pos: usize, fmt: Format) -> bool {
    let b = match s.get(pos) {
        Some(&b) => b,
        None => return false,
    };
    let marker = match b {
        b';' => fmt.semicolon_marker,
        b'#' => fmt.hash_marker,
        _ => return false,
    };
    if marker == MarkerMode::NotAMarker {
        return false;
    }
    let preceded_ok = match pos.checked_sub(1) {
        None => true,
        Some(prev) => is_plain_whitespace(s[prev]),
    };
    preceded_ok
}

/// Is the byte at `pos` a disabled-entry opener (a comment marker that
/// additionally introduces a disabled key/section rather than a plain
/// comment)?
pub fn is_disabled_opener(s: &[u8], pos: usize, fmt: Format) -> bool {
    let b = match s.get(pos) {
        Some(&b) => b,
        None => return false,
    };
    let marker = match b {
        b';' => fmt.semicolon_marker,
        b'#' => fmt.hash_marker,
        _ => return false,
    };
    if marker != MarkerMode::OpensCommentOrDisabled {
        return false;
    }
    if !is_comment_opener(s, pos, fmt) {
        return false;
    }
    if fmt.flags.contains(crate::format::FormatFlags::DISABLED_AFTER_SPACE) {
        match s.get(pos + 1) {
            Some(&next) => !is_plain_whitespace(next) && !is_newline(next),
            None => false,
        }
    } else {
        true
    }
}

/// Is `b` the configured delimiter byte? `ANY_SPACE` matches any run of
/// plain whitespace (the caller is expected to test via
/// [`is_delimiter_run_start`] in that case).
pub fn is_delimiter(b: u8, fmt: Format) -> bool {
    if fmt.delimiter_symbol == ANY_SPACE {
        is_plain_whitespace(b)
    } else {
        b == fmt.delimiter_symbol
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Format, MarkerMode};

    #[test]
    fn comment_opener_requires_leading_whitespace() {
        let fmt = Format::DEFAULT;
        assert!(is_comment_opener(b";x", 0, fmt));
        assert!(is_comment_opener(b" ;x", 1, fmt));
        assert!(!is_comment_opener(b"a;x", 1, fmt));
    }

    #[test]
    fn disabled_after_space_gate() {
        let mut fmt = Format::DEFAULT;
        fmt.flags |= crate::format::FormatFlags::DISABLED_AFTER_SPACE;
        assert!(is_disabled_opener(b";k=v", 0, fmt));
        assert!(!is_disabled_opener(b"; k=v", 0, fmt));
    }

    #[test]
    fn not_a_marker_disables_everything() {
        let mut fmt = Format::DEFAULT;
        fmt.semicolon_marker = MarkerMode::NotAMarker;
        assert!(!is_comment_opener(b";x", 0, fmt));
        assert!(!is_disabled_opener(b";x", 0, fmt));
        assert!(!is_metachar(b';', fmt));
    }

    #[test]
    fn any_space_delimiter() {
        let fmt = Format::UNIX_LIKE;
        assert!(is_delimiter(b' ', fmt));
        assert!(!is_delimiter(b'=', fmt));
    }
}
