//! Pass A: a single walk over the working buffer that recognizes node
//! boundaries, performs the in-place rewrites a node's body may call for
//! (continuation sequences collapse to a single space; `IGNORE_SILENTLY`
//! comment bodies are dropped entirely), and records one [`RawNode`] per
//! recognized node.
//!
//! Because every byte *not* copied to the write cursor is simply absent
//! from the compacted buffer, the [`RawNode`] ranges this pass produces
//! never overlap and always fall within the compacted length - Pass B
//! ([`super::run`]) relies on that to index straight into the buffer
//! without re-scanning it.

use std::ops::Range;

use crate::classify::{is_comment_opener, is_disabled_opener, is_newline, is_plain_whitespace};
use crate::format::{Format, MarkerMode, MultilineNodes, SectionPaths};

use super::state::{LexState, NodeClass};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum RawKind {
    Key,
    DisabledKey,
    Section,
    DisabledSection,
    Comment,
    InlineComment,
    Unknown,
}

/// One recognized node, as ranges into the *compacted* buffer (i.e. after
/// Pass A's rewrites; `scan`'s return value also yields the new length).
#[derive(Clone, Debug)]
pub(crate) struct RawNode {
    pub kind: RawKind,
    pub data: Range<usize>,
    /// `Some` for keys with an explicit delimiter (possibly an empty
    /// range, e.g. `key=`); `None` for implicit keys (no delimiter found)
    /// and for every non-key node.
    pub value: Option<Range<usize>>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum BodyEnd {
    Newline,
    Comment,
    Delimiter,
    Bracket,
    Eof,
}

fn newline_len(buf: &[u8], i: usize) -> usize {
    match buf.get(i) {
        Some(b'\r') if buf.get(i + 1) == Some(&b'\n') => 2,
        Some(b'\n') if buf.get(i + 1) == Some(&b'\r') => 2,
        Some(b'\r') | Some(b'\n') => 1,
        _ => 0,
    }
}

fn allows_multiline(fmt: Format, class: NodeClass) -> bool {
    use MultilineNodes::*;
    match (fmt.multiline_nodes, class) {
        (Everywhere, _) => true,
        (ButComments, NodeClass::Comment) => false,
        (ButComments, _) => true,
        (ButDisabledAndComments, NodeClass::Active) => true,
        (ButDisabledAndComments, _) => false,
        (None, _) => false,
    }
}

/// Consumes bytes from `*read`, copying them (compacted) to `*write`,
/// until a node-ending condition is reached. Tracks quoting/escaping via
/// [`LexState`]. Returns why it stopped; `*read`/`*write` are left exactly
/// at the stopping point (the triggering byte(s) are not consumed, except
/// for continuation sequences, which are fully consumed and replaced by a
/// single space).
fn scan_until(
    buf: &mut [u8],
    read: &mut usize,
    write: &mut usize,
    len: usize,
    fmt: Format,
    class: NodeClass,
    stop_at_delim: bool,
    in_comment_body: bool,
    stop_at_bracket: bool,
) -> BodyEnd {
    let mut state = LexState::Outside;
    let no_esc = fmt.has_no_esc();
    let multiline_ok = allows_multiline(fmt, class);

    loop {
        if *read >= len {
            return BodyEnd::Eof;
        }
        let c = buf[*read];

        match state {
            LexState::Outside => {
                if c == b'\\' && !no_esc {
                    let nl = newline_len(buf, *read + 1);
                    if nl > 0 {
                        *read += 1;
                        state = LexState::InContinuation;
                        continue;
                    }
                    state = LexState::InEscape;
                    continue;
                }
                if is_newline(c) {
                    return BodyEnd::Newline;
                }
                if !in_comment_body && is_comment_opener(buf, *read, fmt) {
                    return BodyEnd::Comment;
                }
                if stop_at_delim && crate::classify::is_delimiter(c, fmt) {
                    if fmt.delimiter_symbol == crate::format::ANY_SPACE {
                        while *read < len && is_plain_whitespace(buf[*read]) {
                            *read += 1;
                        }
                    } else {
                        *read += 1;
                    }
                    return BodyEnd::Delimiter;
                }
                if stop_at_bracket && c == b']' {
                    *read += 1;
                    return BodyEnd::Bracket;
                }
                if c == b'"' && !fmt.flags.contains(crate::format::FormatFlags::NO_DOUBLE_QUOTES) {
                    buf[*write] = c;
                    *write += 1;
                    *read += 1;
                    state = LexState::InDoubleQuote;
                    continue;
                }
                if c == b'\'' && !fmt.flags.contains(crate::format::FormatFlags::NO_SINGLE_QUOTES)
                {
                    buf[*write] = c;
                    *write += 1;
                    *read += 1;
                    state = LexState::InSingleQuote;
                    continue;
                }
                buf[*write] = c;
                *write += 1;
                *read += 1;
            }
            LexState::InDoubleQuote => {
                buf[*write] = c;
                *write += 1;
                *read += 1;
                if c == b'"' {
                    state = LexState::Outside;
                } else if c == b'\\' && !no_esc && *read < len {
                    buf[*write] = buf[*read];
                    *write += 1;
                    *read += 1;
                }
            }
            LexState::InSingleQuote => {
                buf[*write] = c;
                *write += 1;
                *read += 1;
                if c == b'\'' {
                    state = LexState::Outside;
                } else if c == b'\\' && !no_esc && *read < len {
                    buf[*write] = buf[*read];
                    *write += 1;
                    *read += 1;
                }
            }
            LexState::InEscape => {
                // `*read` still points at the byte right after the
                // backslash; copy backslash + this byte verbatim, Pass B's
                // `unquote` resolves the meaning later.
                buf[*write] = b'\\';
                *write += 1;
                buf[*write] = c;
                *write += 1;
                *read += 1;
                state = LexState::Outside;
            }
            LexState::InContinuation => {
                let nl = newline_len(buf, *read);
                debug_assert!(nl > 0);
                if multiline_ok {
                    buf[*write] = b' ';
                    *write += 1;
                    *read += nl;
                    state = LexState::Outside;
                } else {
                    // Not honored: keep the backslash as literal content,
                    // then let the loop re-examine the newline normally.
                    buf[*write] = b'\\';
                    *write += 1;
                    state = LexState::Outside;
                }
            }
        }
    }
}

fn trim_plain_ws(buf: &[u8], r: Range<usize>) -> Range<usize> {
    let mut start = r.start;
    let mut end = r.end;
    while start < end && is_plain_whitespace(buf[start]) {
        start += 1;
    }
    while end > start && is_plain_whitespace(buf[end - 1]) {
        end -= 1;
    }
    start..end
}

/// Parses a key-or-implicit-key body already isolated in `buf[range]`,
/// recursing the same delimiter search `scan` uses for active keys. Used
/// both directly and for the body of a disabled entry.
fn split_key_value(buf: &[u8], range: Range<usize>, fmt: Format) -> (Range<usize>, Option<Range<usize>>) {
    let mut i = range.start;
    let mut quote: Option<u8> = None;
    let no_esc = fmt.has_no_esc();
    while i < range.end {
        let c = buf[i];
        if c == b'\\' && !no_esc {
            i += 2;
            continue;
        }
        if quote.is_none() && (c == b'"' || c == b'\'') {
            quote = Some(c);
            i += 1;
            continue;
        }
        if quote == Some(c) {
            quote = None;
            i += 1;
            continue;
        }
        if quote.is_none() && crate::classify::is_delimiter(c, fmt) {
            let key = trim_plain_ws(buf, range.start..i);
            let mut value_start = i + 1;
            if fmt.delimiter_symbol == crate::format::ANY_SPACE {
                while value_start < range.end && is_plain_whitespace(buf[value_start]) {
                    value_start += 1;
                }
            }
            let value = trim_plain_ws(buf, value_start..range.end);
            return (key, Some(value));
        }
        i += 1;
    }
    (trim_plain_ws(buf, range), None)
}

/// Runs Pass A over `buf`, returning the recognized nodes and the new
/// (compacted) length of `buf`.
pub(crate) fn scan(buf: &mut [u8], fmt: Format) -> (Vec<RawNode>, usize) {
    let mut nodes = Vec::new();
    let len = buf.len();
    let mut read = 0usize;
    let mut write = 0usize;

    while read < len {
        while read < len && is_plain_whitespace(buf[read]) {
            read += 1;
        }
        if read >= len {
            break;
        }
        let nl = newline_len(buf, read);
        if nl > 0 {
            // Blank line: no node dispatched.
            read += nl;
            continue;
        }

        if is_comment_opener(buf, read, fmt) {
            let marker = buf[read];
            let marker_mode = if marker == b';' {
                fmt.semicolon_marker
            } else {
                fmt.hash_marker
            };
            let disabled = is_disabled_opener(buf, read, fmt);
            read += 1;
            if read < len && buf[read] == b' ' {
                read += 1;
            }
            let body_start = write;
            let class = if disabled {
                NodeClass::Disabled
            } else {
                NodeClass::Comment
            };
            let end = scan_until(buf, &mut read, &mut write, len, fmt, class, false, true, false);
            debug_assert!(matches!(end, BodyEnd::Newline | BodyEnd::Eof));

            if disabled {
                let body = body_start..write;
                let trimmed = trim_plain_ws(buf, body.clone());
                if trimmed.is_empty() {
                    nodes.push(RawNode {
                        kind: RawKind::Comment,
                        data: trimmed,
                        value: None,
                    });
                } else if buf[trimmed.start] == b'['
                    && fmt.section_paths != SectionPaths::NoSections
                {
                    let inner = (trimmed.start + 1)..trimmed.end;
                    let inner = if !inner.is_empty() && buf[inner.end - 1] == b']' {
                        inner.start..(inner.end - 1)
                    } else {
                        inner
                    };
                    nodes.push(RawNode {
                        kind: RawKind::DisabledSection,
                        data: trim_plain_ws(buf, inner),
                        value: None,
                    });
                } else {
                    let (key, value) = split_key_value(buf, trimmed, fmt);
                    nodes.push(RawNode {
                        kind: RawKind::DisabledKey,
                        data: key,
                        value,
                    });
                }
            } else {
                match marker_mode {
                    MarkerMode::IgnoreSilently => {
                        write = body_start;
                    }
                    _ => {
                        nodes.push(RawNode {
                            kind: RawKind::Comment,
                            data: body_start..write,
                            value: None,
                        });
                    }
                }
            }

            read += newline_len(buf, read);
            continue;
        }

        if buf[read] == b'[' && fmt.section_paths != SectionPaths::NoSections {
            read += 1;
            let body_start = write;
            let end = scan_until(
                buf,
                &mut read,
                &mut write,
                len,
                fmt,
                NodeClass::Active,
                false,
                false,
                true,
            );
            if end == BodyEnd::Bracket {
                let data = body_start..write;
                nodes.push(RawNode {
                    kind: RawKind::Section,
                    data,
                    value: None,
                });
                // Discard anything trailing on the line (including a
                // possible inline comment): exact byte preservation of a
                // line's trailer is out of scope, so a malformed trailer
                // after `]` is simply not dispatched.
                let trailer_end = {
                    let mut r = read;
                    while r < len && newline_len(buf, r) == 0 {
                        r += 1;
                    }
                    r
                };
                read = trailer_end;
            } else {
                // No closing bracket before the line ended: malformed.
                nodes.push(RawNode {
                    kind: RawKind::Unknown,
                    data: body_start..write,
                    value: None,
                });
            }
            read += newline_len(buf, read);
            continue;
        }

        // Key, implicit key, or inline-comment-terminated key.
        let body_start = write;
        let end = scan_until(
            buf,
            &mut read,
            &mut write,
            len,
            fmt,
            NodeClass::Active,
            true,
            false,
            false,
        );
        match end {
            BodyEnd::Delimiter => {
                let key = trim_plain_ws(buf, body_start..write);
                let value_start = write;
                let vend = scan_until(
                    buf,
                    &mut read,
                    &mut write,
                    len,
                    fmt,
                    NodeClass::Active,
                    false,
                    false,
                    false,
                );
                let value = trim_plain_ws(buf, value_start..write);
                push_key(&mut nodes, key, Some(value));
                if vend == BodyEnd::Comment {
                    push_inline_comment(buf, &mut read, &mut write, len, fmt, &mut nodes);
                }
            }
            BodyEnd::Comment => {
                let key = trim_plain_ws(buf, body_start..write);
                push_key(&mut nodes, key, None);
                push_inline_comment(buf, &mut read, &mut write, len, fmt, &mut nodes);
            }
            BodyEnd::Newline | BodyEnd::Eof | BodyEnd::Bracket => {
                let key = trim_plain_ws(buf, body_start..write);
                push_key(&mut nodes, key, None);
            }
        }
        read += newline_len(buf, read);
    }

    (nodes, write)
}

fn push_key(nodes: &mut Vec<RawNode>, data: Range<usize>, value: Option<Range<usize>>) {
    let kind = if data.is_empty() {
        RawKind::Unknown
    } else {
        RawKind::Key
    };
    nodes.push(RawNode { kind, data, value });
}

fn push_inline_comment(
    buf: &mut [u8],
    read: &mut usize,
    write: &mut usize,
    len: usize,
    fmt: Format,
    nodes: &mut Vec<RawNode>,
) {
    debug_assert!(is_comment_opener(buf, *read, fmt));
    let marker = buf[*read];
    let marker_mode = if marker == b';' {
        fmt.semicolon_marker
    } else {
        fmt.hash_marker
    };
    *read += 1;
    if *read < len && buf[*read] == b' ' {
        *read += 1;
    }
    let body_start = *write;
    scan_until(
        buf,
        read,
        write,
        len,
        fmt,
        NodeClass::Comment,
        false,
        true,
        false,
    );
    match marker_mode {
        MarkerMode::IgnoreSilently => {
            *write = body_start;
        }
        _ => {
            nodes.push(RawNode {
                kind: RawKind::InlineComment,
                data: body_start..*write,
                value: None,
            });
        }
    }
}
