//! The records streamed out of the core parser: one [`Statistics`] snapshot
//! before the first node, then zero or more [`Dispatch`] records, one per
//! recognized node.

use crate::format::Format;

/// Classification of a single dispatched node.
///
/// `Value` is reserved for callers building on top of this crate (e.g. to
/// tag array elements they split out of a dispatched value themselves) and
/// is never produced by the parser.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum NodeType {
    /// Node impossible to categorize.
    Unknown,
    /// Reserved for caller use; never dispatched by the parser.
    Value,
    Key,
    Section,
    Comment,
    InlineComment,
    DisabledKey,
    DisabledSection,
}

/// Immutable snapshot dispatched exactly once, before the first [`Dispatch`].
#[derive(Clone, Copy, Debug)]
pub struct Statistics {
    pub format: Format,
    /// Length of the parser's working buffer, in bytes.
    pub bytes: usize,
    /// Exact count of nodes the parser will dispatch in this run.
    pub members: usize,
}

/// One recognized `.ini` node, valid only for the duration of the
/// `f_foreach` callback invocation that receives it - the bytes it borrows
/// belong to the parser's working buffer (or, for an implicit key's value,
/// to a call-scoped copy of the global implicit value) and may be
/// rewritten or dropped once the callback returns. Callers must copy
/// anything they wish to retain.
#[derive(Clone, Copy, Debug)]
pub struct Dispatch<'a> {
    pub format: Format,
    pub node_type: NodeType,
    /// The node's primary text: key/section name, or comment body.
    pub data: &'a str,
    /// The right-hand side for keys/disabled keys; empty for everything else.
    pub value: &'a str,
    /// The currently open section path; empty at root.
    pub append_to: &'a str,
    /// Zero-based index of this dispatch; bounded by `statistics.members - 1`.
    pub dispatch_id: usize,
}
