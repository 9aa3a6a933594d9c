//! The `array_*` family: iteration, splitting and collapsing of
//! delimiter-separated fragments within a single `.ini` value, honoring
//! quoting/escaping the same way the rest of the string primitives do.

use crate::classify::is_plain_whitespace;
use crate::format::{Format, ANY_SPACE};

/// Is `b` an (unquoted, unescaped) occurrence of delimiter `d`, given `d`
/// may be `ANY_SPACE`?
fn matches_delim(b: u8, d: u8) -> bool {
    if d == ANY_SPACE {
        is_plain_whitespace(b)
    } else {
        b == d
    }
}

/// Scans `s` for unescaped/unquoted delimiter occurrences, returning the
/// byte offset immediately after each delimiter run (i.e. the start of the
/// next fragment). Honors quoting (delimiters inside a quoted span are
/// literal) and a trailing backslash escape (the following byte, whatever
/// it is, is never treated as a delimiter).
fn split_offsets(s: &[u8], d: u8, fmt: Format) -> Vec<usize> {
    let mut offsets = Vec::new();
    let mut quote: Option<u8> = None;
    let mut i = 0usize;
    let no_esc = fmt.has_no_esc();

    while i < s.len() {
        let c = s[i];
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
        if quote.is_none() && matches_delim(c, d) {
            let mut j = i + 1;
            if d == ANY_SPACE {
                while j < s.len() && matches_delim(s[j], d) {
                    j += 1;
                }
            }
            offsets.push(j);
            i = j;
            continue;
        }
        i += 1;
    }
    offsets
}

/// Returns `(start, end)` byte ranges for each fragment of `s`, split on
/// unescaped/unquoted occurrences of `d`.
fn fragments(s: &[u8], d: u8, fmt: Format) -> Vec<(usize, usize)> {
    let offsets = split_offsets(s, d, fmt);
    let mut ranges = Vec::with_capacity(offsets.len() + 1);
    let mut start = 0usize;
    for &off in &offsets {
        // `off` points just past the delimiter run; the fragment end is
        // just before the delimiter that introduced this offset.
        let delim_len = if d == ANY_SPACE {
            // Find where the whitespace run (that ends at `off`) began.
            let mut k = off;
            while k > start && is_plain_whitespace(s[k - 1]) {
                k -= 1;
            }
            off - k
        } else {
            1
        };
        ranges.push((start, off - delim_len));
        start = off;
    }
    ranges.push((start, s.len()));
    ranges
}

/// Counts `1 + ` the number of unescaped/unquoted delimiter occurrences
/// (an empty trailing fragment is still counted).
pub fn array_get_length(s: &[u8], d: u8, fmt: Format) -> usize {
    fragments(s, d, fmt).len()
}

/// Invokes `f(offset, length, index)` once per fragment in order. Returns
/// the first non-zero value `f` returns, or `0` if it never returns
/// non-zero.
pub fn array_foreach<F>(s: &[u8], d: u8, fmt: Format, mut f: F) -> i32
where
    F: FnMut(usize, usize, usize) -> i32,
{
    for (index, (start, end)) in fragments(s, d, fmt).into_iter().enumerate() {
        let rc = f(start, end - start, index);
        if rc != 0 {
            return rc;
        }
    }
    0
}

/// Advances `*s` past the next fragment and its delimiter. Returns the
/// fragment's length. `*s` becomes the start of the following fragment,
/// or an empty slice at end of input.
pub fn array_shift<'a>(s: &mut &'a [u8], d: u8, fmt: Format) -> usize {
    let offsets = split_offsets(s, d, fmt);
    match offsets.first() {
        Some(&off) => {
            let delim_len = if d == ANY_SPACE {
                let mut k = off;
                while k > 0 && is_plain_whitespace(s[k - 1]) {
                    k -= 1;
                }
                off - k
            } else {
                1
            };
            let frag_len = off - delim_len;
            *s = &s[off..];
            frag_len
        }
        None => {
            let frag_len = s.len();
            *s = &s[s.len()..];
            frag_len
        }
    }
}

/// Rewrites `s` in place so each fragment is trimmed of plain whitespace
/// and fragments are joined by a single literal delimiter byte (a single
/// space if `d == ANY_SPACE`). Returns the new length. Idempotent.
pub fn array_collapse(s: &mut [u8], d: u8, fmt: Format) -> usize {
    let ranges = fragments(s, d, fmt);
    let joiner = if d == ANY_SPACE { b' ' } else { d };

    // Trim each fragment (in the original buffer) of leading/trailing
    // plain whitespace, collect the trimmed ranges, then compact.
    let trimmed: Vec<(usize, usize)> = ranges
        .iter()
        .map(|&(mut start, mut end)| {
            while start < end && is_plain_whitespace(s[start]) {
                start += 1;
            }
            while end > start && is_plain_whitespace(s[end - 1]) {
                end -= 1;
            }
            (start, end)
        })
        .collect();

    let mut write = 0usize;
    for (i, &(start, end)) in trimmed.iter().enumerate() {
        if i > 0 {
            s[write] = joiner;
            write += 1;
        }
        // `start >= write` always holds since fragments only shrink and
        // are processed left to right, so this in-place copy never reads
        // from a byte it already overwrote.
        for r in start..end {
            s[write] = s[r];
            write += 1;
        }
    }
    write
}

/// Destructive: replaces the first unescaped/unquoted delimiter with a
/// split point and returns `(head, Some(remainder))`, or `(s, None)` if
/// there is no such delimiter. Unlike the C original (which returns a raw
/// pointer into a NUL-terminated buffer), this returns disjoint byte-slice
/// views since Rust slices carry their own length.
pub fn array_break<'a>(s: &'a mut [u8], d: u8, fmt: Format) -> (&'a [u8], Option<&'a [u8]>) {
    let offsets = split_offsets(s, d, fmt);
    match offsets.first() {
        Some(&off) => {
            let delim_len = if d == ANY_SPACE {
                let mut k = off;
                while k > 0 && is_plain_whitespace(s[k - 1]) {
                    k -= 1;
                }
                off - k
            } else {
                1
            };
            let head_end = off - delim_len;
            let (head, rest) = s.split_at(off);
            (&head[..head_end], Some(rest))
        }
        None => (s, None),
    }
}

/// Like [`array_break`], but advances `*s` past the split point itself,
/// giving an iteration idiom: repeatedly call this until the returned head
/// is `None`.
pub fn array_release<'a>(s: &mut &'a [u8], d: u8, fmt: Format) -> Option<&'a [u8]> {
    if s.is_empty() {
        return None;
    }
    let (head, rest) = array_break(s, d, fmt);
    let head_len = head.len();
    match rest {
        Some(rest) => {
            *s = rest;
        }
        None => {
            *s = &s[head_len..];
        }
    }
    Some(head)
}

/// Invokes `f(fragment)` once per fragment, handing over mutable,
/// independent byte-slice views (the in-place analogue of the C
/// original's destructive NUL-splitting).
pub fn array_split<F>(s: &mut [u8], d: u8, fmt: Format, mut f: F) -> i32
where
    F: FnMut(&mut [u8], usize) -> i32,
{
    let ranges = fragments(s, d, fmt);
    let mut offset = 0usize;
    let mut rest = s;
    for (index, (start, end)) in ranges.into_iter().enumerate() {
        let skip = start - offset;
        let (_, tail) = rest.split_at_mut(skip);
        let (frag, new_rest) = tail.split_at_mut(end - start);
        let rc = f(frag, index);
        offset = end;
        rest = new_rest;
        if rc != 0 {
            return rc;
        }
    }
    0
}

/// Compares two delimited arrays fragment-by-fragment using
/// [`crate::strings::string_match_ii`] semantics on each pair.
pub fn array_match(a: &[u8], b: &[u8], d: u8, fmt: Format) -> bool {
    let fa = fragments(a, d, fmt);
    let fb = fragments(b, d, fmt);
    if fa.len() != fb.len() {
        return false;
    }
    fa.iter()
        .zip(fb.iter())
        .all(|(&(sa, ea), &(sb, eb))| crate::strings::string_match_ii(&a[sa..ea], &b[sb..eb], fmt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Format;

    #[test]
    fn get_length_counts_trailing_empty_fragment() {
        assert_eq!(array_get_length(b"a,b,", b',', Format::DEFAULT), 3);
        assert_eq!(array_get_length(b"a,b", b',', Format::DEFAULT), 2);
        assert_eq!(array_get_length(b"", b',', Format::DEFAULT), 1);
    }

    #[test]
    fn foreach_matches_get_length() {
        let s = b"a,b,c";
        let len = array_get_length(s, b',', Format::DEFAULT);
        let mut count = 0;
        array_foreach(s, b',', Format::DEFAULT, |_, _, _| {
            count += 1;
            0
        });
        assert_eq!(len, count);
    }

    #[test]
    fn shift_walks_fragments() {
        let mut rest: &[u8] = b"a,b,c";
        let mut lens = Vec::new();
        loop {
            let len = array_shift(&mut rest, b',', Format::DEFAULT);
            lens.push(len);
            if rest.is_empty() {
                break;
            }
        }
        assert_eq!(lens, vec![1, 1, 1]);
    }

    #[test]
    fn collapse_trims_and_joins() {
        let mut buf = b"  a  , b ,c  ".to_vec();
        let n = array_collapse(&mut buf, b',', Format::DEFAULT);
        assert_eq!(&buf[..n], b"a,b,c");
    }

    #[test]
    fn collapse_is_idempotent() {
        let mut buf = b"a,b,c".to_vec();
        let n1 = array_collapse(&mut buf, b',', Format::DEFAULT);
        let once = buf[..n1].to_vec();
        let mut buf2 = once.clone();
        let n2 = array_collapse(&mut buf2, b',', Format::DEFAULT);
        assert_eq!(once, buf2[..n2]);
    }

    #[test]
    fn split_then_rejoin_recovers_collapsed_form() {
        let mut buf = b"a,b,c".to_vec();
        let mut rejoined = Vec::new();
        array_split(&mut buf, b',', Format::DEFAULT, |frag, index| {
            if index > 0 {
                rejoined.push(b',');
            }
            rejoined.extend_from_slice(frag);
            0
        });
        assert_eq!(rejoined, b"a,b,c");
    }

    #[test]
    fn any_space_delimiter_counts_single_run() {
        assert_eq!(array_get_length(b"a   b", ANY_SPACE, Format::DEFAULT), 2);
    }
}
