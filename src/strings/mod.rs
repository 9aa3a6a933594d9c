//! In-place string transformation primitives over a [`Format`](crate::Format)-typed
//! byte buffer: unescaping, value collapsing, array iteration, and
//! case-insensitive comparison.
//!
//! Every function here is deterministic and side-effect-free on anything
//! but the buffer it is handed; none of them allocate, except where the
//! `alloc`-leaning `array_split`/`array_collapse` convenience wrappers
//! plainly say so in their docs.

mod array;
mod compare;
mod unquote;

pub use array::{
    array_break, array_collapse, array_foreach, array_get_length, array_match, array_release,
    array_shift, array_split,
};
pub use compare::{string_match_ii, string_match_si, string_match_ss};
pub use unquote::{parse, unquote};
