//! The streaming entry points: an in-memory buffer you already own
//! ([`strip_ini_cache`]), anything implementing [`std::io::Read`]
//! ([`load_ini_file`]), or a path ([`load_ini_path`]) - the idiomatic Rust
//! substitutes for `confini.h`'s `FILE*`/path-string pair of public
//! entry points.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::config::ParseError;
use crate::dispatch::{Dispatch, Statistics};
use crate::format::Format;
use crate::parser;

/// Parses `buf` in place as `.ini`/`.conf` text under dialect `fmt`.
///
/// Calls `f_init` exactly once, with the final [`Statistics`]; then calls
/// `f_foreach` once per recognized node, in source order. Either callback
/// returning non-zero aborts the parse and surfaces the code via
/// [`ParseError::InitAborted`]/[`ParseError::ForeachAborted`].
///
/// `buf` is truncated to the compacted length Pass A produces; its
/// contents past that point are unspecified.
pub fn strip_ini_cache<FInit, FEach>(
    buf: &mut Vec<u8>,
    fmt: Format,
    f_init: FInit,
    f_foreach: FEach,
) -> Result<(), ParseError>
where
    FInit: FnMut(&Statistics) -> i32,
    FEach: FnMut(&Dispatch) -> i32,
{
    parser::run(buf, fmt, f_init, f_foreach)
}

/// Reads `source` to completion, then parses it exactly as
/// [`strip_ini_cache`] would.
pub fn load_ini_file<R, FInit, FEach>(
    source: &mut R,
    fmt: Format,
    f_init: FInit,
    f_foreach: FEach,
) -> Result<(), ParseError>
where
    R: Read,
    FInit: FnMut(&Statistics) -> i32,
    FEach: FnMut(&Dispatch) -> i32,
{
    let mut buf = Vec::new();
    source.read_to_end(&mut buf).map_err(ParseError::from)?;
    strip_ini_cache(&mut buf, fmt, f_init, f_foreach)
}

/// Opens `path` and parses it exactly as [`load_ini_file`] would.
///
/// A missing file surfaces as [`ParseError::NotFound`] rather than the raw
/// `std::io::Error`, matching `confini.h`'s dedicated `CONFINI_ENOENT` code.
pub fn load_ini_path<P, FInit, FEach>(
    path: P,
    fmt: Format,
    f_init: FInit,
    f_foreach: FEach,
) -> Result<(), ParseError>
where
    P: AsRef<Path>,
    FInit: FnMut(&Statistics) -> i32,
    FEach: FnMut(&Dispatch) -> i32,
{
    let mut file = File::open(path).map_err(ParseError::from)?;
    load_ini_file(&mut file, fmt, f_init, f_foreach)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::NodeType;

    #[test]
    fn strip_ini_cache_dispatches_in_order() {
        let mut buf = b"[a]\nk=v\n".to_vec();
        let mut seen = Vec::new();
        strip_ini_cache(
            &mut buf,
            Format::DEFAULT,
            |_stats| 0,
            |d: &Dispatch| {
                seen.push((d.node_type, d.data.to_string(), d.value.to_string()));
                0
            },
        )
        .unwrap();
        assert_eq!(
            seen,
            vec![
                (NodeType::Section, "a".to_string(), String::new()),
                (NodeType::Key, "k".to_string(), "v".to_string()),
            ]
        );
    }

    #[test]
    fn load_ini_file_reads_from_a_reader() {
        let mut cursor = std::io::Cursor::new(b"k = v\n".to_vec());
        let mut count = 0;
        load_ini_file(&mut cursor, Format::DEFAULT, |_| 0, |_| {
            count += 1;
            0
        })
        .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn load_ini_path_reports_not_found() {
        let err = load_ini_path(
            "/nonexistent/path/does-not-exist.ini",
            Format::DEFAULT,
            |_| 0,
            |_| 0,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::NotFound));
    }

    #[test]
    fn load_ini_path_reads_a_real_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("iniform-facade-test-{}.ini", std::process::id()));
        std::fs::write(&path, b"[s]\nk=v\n").unwrap();

        let mut keys = Vec::new();
        load_ini_path(&path, Format::DEFAULT, |_| 0, |d: &Dispatch| {
            if d.node_type == NodeType::Key {
                keys.push(d.data.to_string());
            }
            0
        })
        .unwrap();

        std::fs::remove_file(&path).ok();
        assert_eq!(keys, vec!["k".to_string()]);
    }
}
