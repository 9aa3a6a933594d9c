//! `iniform`: a configurable, single-pass, in-place `.ini`/`.conf` parsing
//! engine.
//!
//! A [`Format`] descriptor selects a dialect (delimiter, comment markers,
//! quoting, section-path nesting, multiline continuation); the core parser
//! ([`parser`], reached through [`strip_ini_cache`]/[`load_ini_file`]/
//! [`load_ini_path`]) walks a byte buffer exactly once to measure it, then
//! once more to normalize and dispatch each recognized node as a borrow
//! into that same buffer. There is no owned tree: callers that want one
//! build it themselves out of the dispatched [`Dispatch`] records.
//!
//! Grounded on `alex05447-miniconfig`'s `ini` module; see `DESIGN.md` for
//! the file-by-file provenance.

mod classify;
mod config;
mod dispatch;
mod facade;
mod format;
mod numeric;
mod parser;
mod strings;

pub use config::{implicit_value, lowercase_mode, set_implicit_value, set_lowercase_mode, ParseError};
pub use dispatch::{Dispatch, NodeType, Statistics};
pub use facade::{load_ini_file, load_ini_path, strip_ini_cache};
pub use format::{Format, FormatFlags, MarkerMode, MultilineNodes, SectionPaths, ANY_SPACE};
pub use numeric::{get_bool, get_double, get_int, get_long, get_longlong};
pub use strings::{
    array_break, array_collapse, array_foreach, array_get_length, array_match, array_release,
    array_shift, array_split, parse, string_match_ii, string_match_si, string_match_ss, unquote,
};

#[cfg(test)]
mod tests;
