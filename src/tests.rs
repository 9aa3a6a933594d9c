//! Crate-level scenario and property tests, kept separate from the
//! per-module `#[cfg(test)] mod tests` blocks.

use crate::config::ParseError;
use crate::dispatch::{Dispatch, NodeType, Statistics};
use crate::facade::strip_ini_cache;
use crate::format::{Format, FormatFlags, MarkerMode, SectionPaths};

fn record(input: &str, fmt: Format) -> Vec<(NodeType, String, String, String)> {
    let mut buf = input.as_bytes().to_vec();
    let mut out = Vec::new();
    strip_ini_cache(
        &mut buf,
        fmt,
        |_stats: &Statistics| 0,
        |d: &Dispatch| {
            out.push((
                d.node_type,
                d.data.to_string(),
                d.value.to_string(),
                d.append_to.to_string(),
            ));
            0
        },
    )
    .unwrap();
    out
}

#[test]
fn s1_section_then_key() {
    let got = record("[a]\nk = v\n", Format::DEFAULT);
    assert_eq!(
        got,
        vec![
            (NodeType::Section, "a".into(), "".into(), "".into()),
            (NodeType::Key, "k".into(), "v".into(), "a".into()),
        ]
    );
}

#[test]
fn s2_disabled_key() {
    let got = record(";k=v\n", Format::DEFAULT);
    assert_eq!(
        got,
        vec![(NodeType::DisabledKey, "k".into(), "v".into(), "".into())]
    );
}

#[test]
fn s3_semicolon_opens_comment_only() {
    let mut fmt = Format::DEFAULT;
    fmt.semicolon_marker = MarkerMode::OpensCommentOnly;
    let got = record(";k=v\n", fmt);
    assert_eq!(
        got,
        vec![(NodeType::Comment, "k=v".into(), "".into(), "".into())]
    );
}

#[test]
fn s4_nested_section_path() {
    let mut fmt = Format::DEFAULT;
    fmt.section_paths = SectionPaths::AbsoluteAndRelative;
    let got = record("[a]\n[.b]\nk=1\n", fmt);
    assert_eq!(got[0].0, NodeType::Section);
    assert_eq!(got[0].3, "");
    assert_eq!(got[1].0, NodeType::Section);
    assert_eq!(got[1].3, "a");
    assert_eq!(
        got[2],
        (NodeType::Key, "k".into(), "1".into(), "a.b".into())
    );
}

#[test]
fn s5_escaped_newline_in_quoted_value() {
    let got = record("k = \"a\\nb\"\n", Format::DEFAULT);
    assert_eq!(
        got,
        vec![(NodeType::Key, "k".into(), "a\nb".into(), "".into())]
    );
}

#[test]
fn s6_multiline_continuation_collapses_with_surrounding_space() {
    let got = record("a = 1 \\\n  2\n", Format::DEFAULT);
    assert_eq!(
        got,
        vec![(NodeType::Key, "a".into(), "1 2".into(), "".into())]
    );
}

#[test]
fn s7_implicit_key_uses_global_implicit_value() {
    let mut fmt = Format::DEFAULT;
    fmt.flags |= FormatFlags::IMPLICIT_IS_NOT_EMPTY;
    crate::config::set_implicit_value(Some("true".to_string()));
    let got = record("flag\n", fmt);
    crate::config::set_implicit_value(None);
    assert_eq!(
        got,
        vec![(NodeType::Key, "flag".into(), "true".into(), "".into())]
    );
}

#[test]
fn statistics_accuracy() {
    let mut buf = b"[a]\nk=v\n; comment\nm=2\n".to_vec();
    let mut reported_members = 0usize;
    let mut dispatched = 0usize;
    strip_ini_cache(
        &mut buf,
        Format::DEFAULT,
        |stats: &Statistics| {
            reported_members = stats.members;
            0
        },
        |_d: &Dispatch| {
            dispatched += 1;
            0
        },
    )
    .unwrap();
    assert_eq!(reported_members, dispatched);
    assert_eq!(reported_members, 4);
}

#[test]
fn dispatch_id_monotonicity() {
    let mut buf = b"[a]\nk=1\nm=2\nn=3\n".to_vec();
    let mut ids = Vec::new();
    strip_ini_cache(
        &mut buf,
        Format::DEFAULT,
        |_| 0,
        |d: &Dispatch| {
            ids.push(d.dispatch_id);
            0
        },
    )
    .unwrap();
    assert_eq!(ids, vec![0, 1, 2, 3]);
}

#[test]
fn init_abort_yields_code_1_and_no_dispatches() {
    let mut buf = b"k=v\n".to_vec();
    let mut dispatched = 0usize;
    let err = strip_ini_cache(
        &mut buf,
        Format::DEFAULT,
        |_| 1,
        |_d: &Dispatch| {
            dispatched += 1;
            0
        },
    )
    .unwrap_err();
    match err {
        ParseError::InitAborted(code) => assert_eq!(code, 1),
        other => panic!("expected InitAborted, got {:?}", other),
    }
    assert_eq!(dispatched, 0);
}

#[test]
fn foreach_abort_at_k_yields_code_2_and_k_plus_one_calls() {
    let mut buf = b"a=1\nb=2\nc=3\n".to_vec();
    let mut dispatched = 0usize;
    let err = strip_ini_cache(
        &mut buf,
        Format::DEFAULT,
        |_| 0,
        |d: &Dispatch| {
            dispatched += 1;
            if d.dispatch_id == 1 {
                2
            } else {
                0
            }
        },
    )
    .unwrap_err();
    match err {
        ParseError::ForeachAborted(code, dispatch_id) => {
            assert_eq!(code, 2);
            assert_eq!(dispatch_id, 1);
        }
        other => panic!("expected ForeachAborted, got {:?}", other),
    }
    assert_eq!(dispatched, 2);
}

#[test]
fn malformed_content_is_never_an_error() {
    let got = record("[unterminated\nk=v\n", Format::DEFAULT);
    assert!(got.iter().any(|(t, ..)| *t == NodeType::Unknown));
    assert!(got.iter().any(|(t, ..)| *t == NodeType::Key));
}
