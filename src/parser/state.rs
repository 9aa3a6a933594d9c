//! The lexical sub-states [`scan`](super::scan) cycles through while
//! consuming a single node's body. Doc-comment-per-state, naming exactly
//! what is accepted and what the transition target is, in the style of
//! a classic recursive-descent parser state enum.
//!
//! Node-level context (are we inside a key, a section head, a comment, a
//! disabled entry?) is tracked separately by [`super::scan`]'s driver loop;
//! this enum is purely the fine-grained quoting/escaping state, since that
//! is the part that is genuinely orthogonal to which kind of node is being
//! scanned.

/// Lexical state of the byte cursor while scanning one node's body.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum LexState {
    /// Accept any byte; comment markers, newlines (unless continued) and
    /// delimiters (when looked for) are significant (-> `InSingleQuote` /
    /// `InDoubleQuote` / `InEscape` on the relevant trigger bytes).
    Outside,
    /// Accept any byte as literal content; only a matching, unescaped `'`
    /// ends the quote (-> `Outside`).
    InSingleQuote,
    /// Accept any byte as literal content; only a matching, unescaped `"`
    /// ends the quote (-> `Outside`).
    InDoubleQuote,
    /// Entered on an un-suppressed backslash; the next byte is consumed
    /// verbatim as escaped content, whatever it is (-> previous state).
    InEscape,
    /// Entered on a backslash immediately followed by a newline sequence;
    /// resolved immediately by either joining (continuation honored) or
    /// terminating the node at the newline (continuation not honored for
    /// this node class) (-> `Outside` or node end).
    InContinuation,
}

/// Top-level node classification the scanner's driver loop is currently
/// inside. Determines which multiline continuation policy applies, since
/// that policy is keyed off exactly this distinction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(super) enum NodeClass {
    Comment,
    Disabled,
    Active,
}
