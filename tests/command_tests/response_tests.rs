//! Response Parsing Tests
//!
//! Reply normalization per command kind and protocol version.

use pretty_assertions::assert_eq;
use stackcmd::command::{Command, CommandKind};
use stackcmd::protocol::{decode_reply, ProtocolVersion, Reply};
use stackcmd::{args, StackError};

const BOTH: [ProtocolVersion; 2] = [ProtocolVersion::Resp2, ProtocolVersion::Resp3];

fn parse(kind: CommandKind, raw: Reply, protocol: ProtocolVersion) -> Reply {
    Command::new(kind).parse_response(raw, protocol).unwrap()
}

fn cms_info_map() -> Reply {
    Reply::map([
        ("width", Reply::Int(2000)),
        ("depth", Reply::Int(10)),
        ("count", Reply::Int(0)),
    ])
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn test_identity_for_counts_and_acknowledgements() {
    for protocol in BOTH {
        assert_eq!(parse(CommandKind::BfCard, Reply::Int(3), protocol), Reply::Int(3));
        assert_eq!(
            parse(CommandKind::BfReserve, Reply::Status("OK".into()), protocol),
            Reply::Status("OK".into())
        );
    }
}

#[test]
fn test_spellcheck_resp2_scalar_passes_through() {
    assert_eq!(
        parse(CommandKind::FtSpellcheck, Reply::Int(1), ProtocolVersion::Resp2),
        Reply::Int(1)
    );
}

#[test]
fn test_json_get_passes_document_through() {
    let doc = Reply::bulk(r#"[{"a":1}]"#);
    assert_eq!(parse(CommandKind::JsonGet, doc.clone(), ProtocolVersion::Resp3), doc);
}

// =============================================================================
// Flat List to Map
// =============================================================================

#[test]
fn test_cms_info_flat_list_resp2() {
    let raw = Reply::Array(vec![
        Reply::bulk("width"),
        Reply::Int(2000),
        Reply::bulk("depth"),
        Reply::Int(10),
        Reply::bulk("count"),
        Reply::Int(0),
    ]);

    for protocol in BOTH {
        assert_eq!(parse(CommandKind::CmsInfo, raw.clone(), protocol), cms_info_map());
    }
}

#[test]
fn test_cms_info_map_resp3() {
    assert_eq!(
        parse(CommandKind::CmsInfo, cms_info_map(), ProtocolVersion::Resp3),
        cms_info_map()
    );
}

#[test]
fn test_cms_info_odd_list_is_unexpected() {
    let raw = Reply::Array(vec![Reply::bulk("width")]);
    let err = Command::new(CommandKind::CmsInfo)
        .parse_response(raw, ProtocolVersion::Resp2)
        .unwrap_err();
    assert!(matches!(err, StackError::UnexpectedReply(_)));
}

#[test]
fn test_bf_info_full_and_single_field() {
    let raw = Reply::Array(vec![Reply::bulk("Capacity"), Reply::Int(100), Reply::bulk("Size"), Reply::Int(240)]);
    let full = Command::with_arguments(CommandKind::BfInfo, args!["bf"]).unwrap();
    assert_eq!(
        full.parse_response(raw, ProtocolVersion::Resp2).unwrap(),
        Reply::map([("Capacity", Reply::Int(100)), ("Size", Reply::Int(240))])
    );

    let single = Command::with_arguments(CommandKind::BfInfo, args!["bf", "CAPACITY"]).unwrap();
    assert_eq!(
        single
            .parse_response(Reply::Array(vec![Reply::Int(100)]), ProtocolVersion::Resp2)
            .unwrap(),
        Reply::Int(100)
    );
}

// =============================================================================
// Boolean Coercion
// =============================================================================

#[test]
fn test_bf_mexists_by_protocol() {
    let raw = Reply::Array(vec![Reply::Int(1), Reply::Int(1)]);

    assert_eq!(
        parse(CommandKind::BfMexists, raw.clone(), ProtocolVersion::Resp2),
        Reply::Array(vec![Reply::Int(1), Reply::Int(1)])
    );
    assert_eq!(
        parse(CommandKind::BfMexists, raw, ProtocolVersion::Resp3),
        Reply::Array(vec![Reply::Bool(true), Reply::Bool(true)])
    );
}

#[test]
fn test_bf_exists_by_protocol() {
    assert_eq!(parse(CommandKind::BfExists, Reply::Int(0), ProtocolVersion::Resp2), Reply::Int(0));
    assert_eq!(
        parse(CommandKind::BfExists, Reply::Int(0), ProtocolVersion::Resp3),
        Reply::Bool(false)
    );
    assert_eq!(
        parse(CommandKind::BfAdd, Reply::Bool(true), ProtocolVersion::Resp3),
        Reply::Bool(true)
    );
}

#[test]
fn test_bf_insert_keeps_per_item_errors() {
    let raw = Reply::Array(vec![Reply::Int(1), Reply::Error("ERR non scaling filter is full".into())]);
    assert_eq!(
        parse(CommandKind::BfInsert, raw, ProtocolVersion::Resp3),
        Reply::Array(vec![Reply::Bool(true), Reply::Error("ERR non scaling filter is full".into())])
    );
}

// =============================================================================
// Spellcheck
// =============================================================================

fn spellcheck_resp2() -> Reply {
    Reply::Array(vec![Reply::Array(vec![
        Reply::bulk("TERM"),
        Reply::bulk("held"),
        Reply::Array(vec![
            Reply::Array(vec![Reply::bulk("0"), Reply::bulk("hello")]),
            Reply::Array(vec![Reply::bulk("0"), Reply::bulk("help")]),
        ]),
    ])])
}

fn spellcheck_expected_resp3() -> Reply {
    Reply::map([(
        "results",
        Reply::map([(
            "held",
            Reply::Array(vec![
                Reply::map([("hello", Reply::Double(0.0))]),
                Reply::map([("help", Reply::Double(0.0))]),
            ]),
        )]),
    )])
}

#[test]
fn test_spellcheck_resp2_keeps_triplets() {
    assert_eq!(
        parse(CommandKind::FtSpellcheck, spellcheck_resp2(), ProtocolVersion::Resp2),
        spellcheck_resp2()
    );
}

#[test]
fn test_spellcheck_resp2_rejects_malformed_entry() {
    let raw = Reply::Array(vec![Reply::Array(vec![Reply::bulk("TERM"), Reply::bulk("held")])]);
    let err = Command::new(CommandKind::FtSpellcheck)
        .parse_response(raw, ProtocolVersion::Resp2)
        .unwrap_err();
    assert!(matches!(err, StackError::UnexpectedReply(_)));
}

#[test]
fn test_spellcheck_resp3_map() {
    assert_eq!(
        parse(CommandKind::FtSpellcheck, spellcheck_expected_resp3(), ProtocolVersion::Resp3),
        spellcheck_expected_resp3()
    );
}

#[test]
fn test_spellcheck_resp3_from_wire() {
    let wire = b"%1\r\n$7\r\nresults\r\n%1\r\n$4\r\nheld\r\n*2\r\n%1\r\n$5\r\nhello\r\n,0\r\n%1\r\n$4\r\nhelp\r\n,0\r\n";
    let (raw, _) = decode_reply(wire).unwrap();

    assert_eq!(
        parse(CommandKind::FtSpellcheck, raw, ProtocolVersion::Resp3),
        spellcheck_expected_resp3()
    );
}

#[test]
fn test_spellcheck_resp3_reshapes_flat_arrays_and_text_scores() {
    let raw = Reply::Array(vec![
        Reply::bulk("results"),
        Reply::Array(vec![
            Reply::bulk("held"),
            Reply::Array(vec![
                Reply::Array(vec![Reply::bulk("hello"), Reply::bulk("0")]),
                Reply::Array(vec![Reply::bulk("help"), Reply::bulk("0")]),
            ]),
        ]),
    ]);

    assert_eq!(
        parse(CommandKind::FtSpellcheck, raw, ProtocolVersion::Resp3),
        spellcheck_expected_resp3()
    );
}

#[test]
fn test_spellcheck_resp3_from_legacy_triplets() {
    assert_eq!(
        parse(CommandKind::FtSpellcheck, spellcheck_resp2(), ProtocolVersion::Resp3),
        spellcheck_expected_resp3()
    );
}

#[test]
fn test_spellcheck_resp3_empty_results() {
    let raw = Reply::map([("results", Reply::Map(Vec::new()))]);
    assert_eq!(
        parse(CommandKind::FtSpellcheck, raw.clone(), ProtocolVersion::Resp3),
        raw
    );
}

// =============================================================================
// Sets
// =============================================================================

#[test]
fn test_dictdump_set_becomes_array() {
    let raw = Reply::Set(vec![Reply::bulk("foo"), Reply::bulk("bar")]);
    assert_eq!(
        parse(CommandKind::FtDictdump, raw, ProtocolVersion::Resp3),
        Reply::Array(vec![Reply::bulk("foo"), Reply::bulk("bar")])
    );
}

// =============================================================================
// Server Errors
// =============================================================================

#[test]
fn test_error_reply_surfaces_server_message() {
    for &kind in CommandKind::ALL {
        let err = Command::new(kind)
            .parse_response(Reply::Error("WRONGTYPE Operation against a key".into()), ProtocolVersion::Resp3)
            .unwrap_err();
        assert_eq!(err.to_string(), "WRONGTYPE Operation against a key");
        assert!(err.is_server());
    }
}
