//! Process-wide parser knobs and the parser's error type.
//!
//! Mirrors `alex05447-miniconfig`'s `ini/error.rs` split of a plain error
//! enum plus hand-written `Display` (no `thiserror`).

use std::fmt::{self, Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

static LOWERCASE_MODE: AtomicBool = AtomicBool::new(false);

static IMPLICIT_VALUE: RwLock<Option<String>> = RwLock::new(None);

/// Sets the process-wide lowercase-on-dispatch mode. When `true` and a
/// format is case-insensitive, dispatched key/section bytes are folded to
/// lowercase in place. Default: `false`.
///
/// Read locklessly at dispatch time; set this before spawning parsers that
/// depend on it (see the crate's concurrency notes).
pub fn set_lowercase_mode(lowercase: bool) {
    LOWERCASE_MODE.store(lowercase, Ordering::Relaxed);
}

/// Returns the current lowercase-on-dispatch mode.
pub fn lowercase_mode() -> bool {
    LOWERCASE_MODE.load(Ordering::Relaxed)
}

/// Sets the value assigned to implicit keys (a key line with no
/// delimiter, dispatched when `implicit_is_not_empty` is set). The caller
/// owns the string; `None` restores the default (empty value).
pub fn set_implicit_value(value: Option<String>) {
    *IMPLICIT_VALUE.write().unwrap() = value;
}

/// Returns a copy of the current implicit value, if any is set.
pub fn implicit_value() -> Option<String> {
    IMPLICIT_VALUE.read().unwrap().clone()
}

/// Errors the core parser and its facades can report.
#[derive(Debug)]
pub enum ParseError {
    /// The statistics callback (`f_init`) returned a non-zero code, carried
    /// here verbatim.
    InitAborted(i32),
    /// The per-node callback (`f_foreach`) returned a non-zero code at the
    /// given dispatch id, carried here verbatim.
    ForeachAborted(i32, usize),
    /// The requested file does not exist.
    NotFound,
    /// Allocation failure while building the working buffer.
    OutOfMemory,
    /// I/O failure while reading the source.
    Io(std::io::Error),
    /// Pass A and Pass B disagreed on the node count: a parser invariant
    /// was violated. Indicates a bug in this crate, not in the input.
    DispatchOverrun,
}

impl ParseError {
    /// The C-compatible wire code for this error, for callers that need
    /// the raw integer.
    pub fn as_code(&self) -> i32 {
        match self {
            ParseError::InitAborted(_) => 1,
            ParseError::ForeachAborted(_, _) => 2,
            ParseError::NotFound => 4,
            ParseError::OutOfMemory => 5,
            ParseError::Io(_) => 6,
            ParseError::DispatchOverrun => 7,
        }
    }

    /// Is this a caller-originated interruption (as opposed to an
    /// environmental or invariant-violation error)?
    pub fn is_user_interrupt(&self) -> bool {
        matches!(self, ParseError::InitAborted(_) | ParseError::ForeachAborted(_, _))
    }
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ParseError::InitAborted(code) => {
                write!(f, "parse aborted by the statistics callback (code {})", code)
            }
            ParseError::ForeachAborted(code, dispatch_id) => write!(
                f,
                "parse aborted by the per-node callback at dispatch {} (code {})",
                dispatch_id, code
            ),
            ParseError::NotFound => write!(f, "the requested .ini file does not exist"),
            ParseError::OutOfMemory => write!(f, "allocation failure while parsing"),
            ParseError::Io(err) => write!(f, "I/O error while reading the .ini source: {}", err),
            ParseError::DispatchOverrun => write!(
                f,
                "internal error: dispatch count exceeded the measured statistics"
            ),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            ParseError::NotFound
        } else {
            ParseError::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_codes_match_spec() {
        assert_eq!(ParseError::InitAborted(1).as_code(), 1);
        assert_eq!(ParseError::ForeachAborted(1, 0).as_code(), 2);
        assert_eq!(ParseError::NotFound.as_code(), 4);
        assert_eq!(ParseError::OutOfMemory.as_code(), 5);
        assert_eq!(
            ParseError::Io(std::io::Error::new(std::io::ErrorKind::Other, "x")).as_code(),
            6
        );
        assert_eq!(ParseError::DispatchOverrun.as_code(), 7);
    }

    #[test]
    fn lowercase_mode_roundtrip() {
        set_lowercase_mode(true);
        assert!(lowercase_mode());
        set_lowercase_mode(false);
        assert!(!lowercase_mode());
    }

    #[test]
    fn implicit_value_roundtrip() {
        set_implicit_value(Some("true".to_string()));
        assert_eq!(implicit_value().as_deref(), Some("true"));
        set_implicit_value(None);
        assert_eq!(implicit_value(), None);
    }
}
