//! The core parser: Pass A ([`scan`]) measures and compacts the working
//! buffer into [`scan::RawNode`] records, Pass B (this module's [`run`])
//! normalizes each node's bytes and dispatches it.
//!
//! Two passes share one traversal of the buffer rather than re-scanning it,
//! structurally guaranteeing `Statistics::members` equals the number of
//! [`crate::dispatch::Dispatch`] records a run actually produces.

mod scan;
mod state;

use crate::config::{implicit_value, lowercase_mode, ParseError};
use crate::dispatch::{Dispatch, NodeType, Statistics};
use crate::format::{Format, FormatFlags, SectionPaths};
use crate::strings::parse as normalize;

use scan::RawKind;

// All ranges this module slices with are produced by `scan`, which only
// ever splits the input at byte boundaries it itself classified as
// structural (quotes, escapes, markers, delimiters, newlines - all ASCII).
// Interior content byte ranges are therefore always valid UTF-8 boundaries
// whenever the input buffer was; see `CasualX-ini_core`'s identical
// `from_utf8` helper for the same reasoning.
#[inline]
fn from_utf8(v: &[u8]) -> &str {
    #[cfg(debug_assertions)]
    return std::str::from_utf8(v).expect("node bytes are not on a UTF-8 boundary");
    #[cfg(not(debug_assertions))]
    return unsafe { std::str::from_utf8_unchecked(v) };
}

fn lowercase_inplace(buf: &mut [u8]) {
    for b in buf.iter_mut() {
        b.make_ascii_lowercase();
    }
}

/// Runs the core parser over `buf` (consumed and compacted in place),
/// calling `f_init` once with the final [`Statistics`] and then `f_foreach`
/// once per dispatched node, in order.
///
/// A non-zero return from either callback aborts the parse immediately
/// `f_init`'s code surfaces as [`ParseError::InitAborted`], `f_foreach`'s
/// as [`ParseError::ForeachAborted`].
pub(crate) fn run<FInit, FEach>(
    buf: &mut Vec<u8>,
    fmt: Format,
    mut f_init: FInit,
    mut f_foreach: FEach,
) -> Result<(), ParseError>
where
    FInit: FnMut(&Statistics) -> i32,
    FEach: FnMut(&Dispatch) -> i32,
{
    let (nodes, new_len) = scan::scan(buf, fmt);
    buf.truncate(new_len);

    let stats = Statistics {
        format: fmt,
        bytes: new_len,
        members: nodes.len(),
    };
    let init_code = f_init(&stats);
    if init_code != 0 {
        return Err(ParseError::InitAborted(init_code));
    }

    let implicit_is_not_empty = fmt.flags.contains(FormatFlags::IMPLICIT_IS_NOT_EMPTY);
    let fold = !fmt.case_sensitive && lowercase_mode();
    let mut path = String::new();

    for (dispatch_id, node) in nodes.iter().enumerate() {
        if dispatch_id >= stats.members {
            return Err(ParseError::DispatchOverrun);
        }

        let (node_type, data_range, value_range, is_section) = match node.kind {
            RawKind::Key => (NodeType::Key, node.data.clone(), node.value.clone(), false),
            RawKind::DisabledKey => (
                NodeType::DisabledKey,
                node.data.clone(),
                node.value.clone(),
                false,
            ),
            RawKind::Section => (NodeType::Section, node.data.clone(), None, true),
            RawKind::DisabledSection => {
                (NodeType::DisabledSection, node.data.clone(), None, true)
            }
            RawKind::Comment => (NodeType::Comment, node.data.clone(), None, false),
            RawKind::InlineComment => (NodeType::InlineComment, node.data.clone(), None, false),
            RawKind::Unknown => (NodeType::Unknown, node.data.clone(), None, false),
        };

        let is_value_side = matches!(node_type, NodeType::Key | NodeType::DisabledKey);

        let data_len = normalize(&mut buf[data_range.clone()], fmt, false);
        let data_slice = data_range.start..(data_range.start + data_len);
        if fold && (is_value_side || is_section) {
            lowercase_inplace(&mut buf[data_slice.clone()]);
        }

        let mut owned_implicit: Option<String> = None;
        let value_str: &str = match &value_range {
            Some(r) => {
                let vlen = normalize(&mut buf[r.clone()], fmt, is_value_side);
                let vslice = r.start..(r.start + vlen);
                from_utf8(&buf[vslice])
            }
            None if is_value_side && implicit_is_not_empty => {
                owned_implicit = implicit_value();
                owned_implicit.as_deref().unwrap_or("")
            }
            None => "",
        };

        let data_str = from_utf8(&buf[data_slice]);

        let append_to: &str = path.as_str();
        let dispatch = Dispatch {
            format: fmt,
            node_type,
            data: data_str,
            value: value_str,
            append_to,
            dispatch_id,
        };
        let code = f_foreach(&dispatch);

        if code != 0 {
            return Err(ParseError::ForeachAborted(code, dispatch_id));
        }

        if node_type == NodeType::Section {
            update_path(&mut path, data_str, fmt.section_paths);
        }
    }

    Ok(())
}

/// Extends (or replaces) the running section path after dispatching an
/// active section header named `name`, per the four `section_paths` modes.
fn update_path(path: &mut String, name: &str, mode: SectionPaths) {
    match mode {
        SectionPaths::AbsoluteAndRelative => {
            if let Some(rest) = name.strip_prefix('.') {
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(rest);
            } else {
                path.clear();
                path.push_str(name);
            }
        }
        SectionPaths::AbsoluteOnly => {
            let rest = name.strip_prefix('.').unwrap_or(name);
            path.clear();
            path.push_str(rest);
        }
        SectionPaths::OneLevelOnly => {
            path.clear();
            path.push_str(name);
        }
        SectionPaths::NoSections => {
            // Unreachable: `scan` never emits a `Section`/`DisabledSection`
            // node when `section_paths` is `NoSections`.
        }
    }
}
