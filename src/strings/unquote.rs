//! `unquote` and `parse` (unquote + whitespace collapse), the two
//! normalization primitives the core parser applies to each dispatched
//! node's bytes.

use crate::classify::{is_newline, is_plain_whitespace};
use crate::format::{Format, FormatFlags};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    Single,
    Double,
}

/// Shared cursor walk behind both [`unquote`] and [`parse`]: strips
/// unescaped matching quote pairs, resolves escape sequences, and
/// optionally collapses runs of plain whitespace outside quotes into a
/// single space. Operates in place; returns the new length.
///
/// When `preserve_empty_quotes` and `collapse` are both active, an embedded
/// empty quote pair's literal bytes are kept untouched rather than
/// collapsed - this function never distinguishes a comment body from any
/// other buffer, so that falls out of the rule below (empty quote pairs are
/// copied literally, never run through the collapse step), resolved in
/// `DESIGN.md`.
fn normalize(buf: &mut [u8], fmt: Format, collapse: bool) -> usize {
    let len = buf.len();
    let no_esc = fmt.has_no_esc();
    let mut quote: Option<Quote> = None;
    let mut read = 0usize;
    let mut write = 0usize;
    let mut pending_space = false;

    let quote_enabled = |q: Quote, fmt: Format| match q {
        Quote::Single => !fmt.flags.contains(FormatFlags::NO_SINGLE_QUOTES),
        Quote::Double => !fmt.flags.contains(FormatFlags::NO_DOUBLE_QUOTES),
    };

    while read < len {
        let c = buf[read];

        // Quote delimiters (only meaningful when not already inside the
        // *other* kind of quote; a non-matching quote byte is literal
        // content).
        if quote.is_none() && c == b'"' && quote_enabled(Quote::Double, fmt) {
            if read + 1 < len && buf[read + 1] == b'"' {
                // Empty pair.
                if fmt.flags.contains(FormatFlags::PRESERVE_EMPTY_QUOTES) {
                    buf[write] = b'"';
                    buf[write + 1] = b'"';
                    write += 2;
                }
                read += 2;
                continue;
            }
            quote = Some(Quote::Double);
            read += 1;
            continue;
        }
        if quote.is_none() && c == b'\'' && quote_enabled(Quote::Single, fmt) {
            if read + 1 < len && buf[read + 1] == b'\'' {
                if fmt.flags.contains(FormatFlags::PRESERVE_EMPTY_QUOTES) {
                    buf[write] = b'\'';
                    buf[write + 1] = b'\'';
                    write += 2;
                }
                read += 2;
                continue;
            }
            quote = Some(Quote::Single);
            read += 1;
            continue;
        }
        if quote == Some(Quote::Double) && c == b'"' {
            quote = None;
            read += 1;
            continue;
        }
        if quote == Some(Quote::Single) && c == b'\'' {
            quote = None;
            read += 1;
            continue;
        }

        // Escape sequences.
        if c == b'\\' && !no_esc {
            if read + 1 >= len {
                buf[write] = c;
                write += 1;
                read += 1;
                continue;
            }
            let next = buf[read + 1];
            if is_newline(next) {
                // Multiline continuation escape: `\LF`, `\CR`, `\LF CR`, `\CR LF`.
                read += 2;
                if read < len && is_newline(buf[read]) && buf[read] != next {
                    read += 1;
                }
                continue;
            }
            let resolved: u8 = match next {
                b'\\' => b'\\',
                b'\'' => b'\'',
                b'"' => b'"',
                b'n' => b'\n',
                b'r' => b'\r',
                b't' => b'\t',
                b'0' => 0,
                other => other,
            };
            if collapse && is_plain_whitespace(resolved) {
                pending_space = true;
            } else {
                if pending_space {
                    buf[write] = b' ';
                    write += 1;
                    pending_space = false;
                }
                buf[write] = resolved;
                write += 1;
            }
            read += 2;
            continue;
        }

        if collapse && quote.is_none() && is_plain_whitespace(c) {
            pending_space = true;
            read += 1;
            continue;
        }

        if pending_space {
            buf[write] = b' ';
            write += 1;
            pending_space = false;
        }
        buf[write] = c;
        write += 1;
        read += 1;
    }

    // Trailing whitespace never survives a collapse (collapse's contract:
    // "collapse trailing whitespace"); a pending space here was always
    // trailing, so it is simply dropped.
    write
}

/// Removes unescaped `"`/`'` quote pairs and resolves escape sequences in
/// place. Returns the new length of `buf`.
pub fn unquote(buf: &mut [u8], fmt: Format) -> usize {
    normalize(buf, fmt, false)
}

/// Full dispatch-time normalization: [`unquote`] plus collapsing runs of
/// forgettable whitespace outside preserved quotes into a single space.
/// When `is_value` and `do_not_collapse_values`, collapsing is skipped
/// entirely (interior whitespace in values is preserved verbatim).
pub fn parse(buf: &mut [u8], fmt: Format, is_value: bool) -> usize {
    let collapse = !(is_value && fmt.flags.contains(FormatFlags::DO_NOT_COLLAPSE_VALUES));
    normalize(buf, fmt, collapse)
}
