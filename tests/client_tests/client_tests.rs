//! Client Tests
//!
//! End-to-end behaviour of the client facade over scripted transports.

use std::collections::VecDeque;
use std::io::{Cursor, Read, Write};

use pretty_assertions::assert_eq;
use stackcmd::arguments::SpellcheckArguments;
use stackcmd::protocol::{ProtocolVersion, Reply, Token};
use stackcmd::{args, decode, encode, Client, Command, CommandKind, Config, StackError, StreamTransport, Transport};

/// Records every request and answers from a queue
#[derive(Default)]
struct ScriptedTransport {
    replies: VecDeque<Reply>,
    sent: Vec<(String, Vec<Token>)>,
}

impl ScriptedTransport {
    fn replying(replies: Vec<Reply>) -> Self {
        Self {
            replies: replies.into(),
            sent: Vec::new(),
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, id: &str, tokens: &[Token]) -> stackcmd::Result<Reply> {
        self.sent.push((id.to_string(), tokens.to_vec()));
        self.replies
            .pop_front()
            .ok_or_else(|| StackError::invalid_state("no scripted reply left"))
    }
}

macro_rules! toks {
    ($($t:expr),* $(,)?) => {
        vec![$(Token::from($t)),*]
    };
}

// =============================================================================
// Execution
// =============================================================================

#[test]
fn test_execute_prefixes_once() {
    let transport = ScriptedTransport::replying(vec![Reply::Int(1)]);
    let config = Config::builder().key_prefix("tenant:").build();
    let mut client = Client::new(transport, config);

    client
        .call(CommandKind::BfAdd, args!["filter", "item"])
        .unwrap();

    assert_eq!(
        client.transport().sent,
        vec![("BF.ADD".to_string(), toks!["tenant:filter", "item"])]
    );
}

#[test]
fn test_execute_without_prefix_leaves_keys() {
    let transport = ScriptedTransport::replying(vec![Reply::Int(1)]);
    let mut client = Client::new(transport, Config::default());

    client.call(CommandKind::BfAdd, args!["filter", "item"]).unwrap();
    assert_eq!(client.transport().sent[0].1, toks!["filter", "item"]);
}

#[test]
fn test_execute_parses_with_configured_protocol() {
    let replies = vec![
        Reply::Array(vec![Reply::Int(1), Reply::Int(0)]),
        Reply::Array(vec![Reply::Int(1), Reply::Int(0)]),
    ];

    let mut resp2 = Client::new(ScriptedTransport::replying(replies.clone()), Config::default());
    let mut resp3 = Client::new(
        ScriptedTransport::replying(replies),
        Config::builder().protocol(ProtocolVersion::Resp3).build(),
    );

    assert_eq!(
        resp2.call(CommandKind::BfMexists, args!["f", vec!["a", "b"]]).unwrap(),
        Reply::Array(vec![Reply::Int(1), Reply::Int(0)])
    );
    assert_eq!(
        resp3.call(CommandKind::BfMexists, args!["f", vec!["a", "b"]]).unwrap(),
        Reply::Array(vec![Reply::Bool(true), Reply::Bool(false)])
    );
}

#[test]
fn test_error_reply_becomes_server_error() {
    let transport = ScriptedTransport::replying(vec![Reply::Error(
        "CMS: key does not exist".to_string(),
    )]);
    let mut client = Client::new(transport, Config::default());

    let err = client
        .call(CommandKind::CmsQuery, args!["missing", "foo"])
        .unwrap_err();

    assert!(err.is_server());
    assert_eq!(err.to_string(), "CMS: key does not exist");
}

#[test]
fn test_validation_error_never_reaches_transport() {
    let mut client = Client::new(ScriptedTransport::default(), Config::default());

    let err = client.call(CommandKind::FtCreate, args![]).unwrap_err();
    assert!(matches!(err, StackError::InvalidArgument(_)));
    assert!(client.transport().sent.is_empty());
}

#[test]
fn test_spellcheck_end_to_end_resp3() {
    let raw = Reply::map([(
        "results",
        Reply::map([(
            "held",
            Reply::Array(vec![
                Reply::map([("hello", Reply::Double(0.0))]),
                Reply::map([("help", Reply::Double(0.0))]),
            ]),
        )]),
    )]);
    let transport = ScriptedTransport::replying(vec![raw.clone()]);
    let config = Config::builder().protocol(ProtocolVersion::Resp3).key_prefix("p:").build();
    let mut client = Client::new(transport, config);

    let mut modifiers = SpellcheckArguments::new();
    modifiers.distance(1);
    let parsed = client
        .call(CommandKind::FtSpellcheck, args!["index", "held", modifiers])
        .unwrap();

    assert_eq!(parsed, raw);
    assert_eq!(
        client.transport().sent[0].1,
        toks!["p:index", "held", "DISTANCE", 1, "DIALECT", 2]
    );
}

// =============================================================================
// Boundary Functions
// =============================================================================

#[test]
fn test_encode_returns_verb_and_tokens() {
    let command = Command::with_arguments(CommandKind::JsonGet, args!["doc", "$.a"]).unwrap();
    let (id, tokens) = encode(&command).unwrap();

    assert_eq!(id, "JSON.GET");
    assert_eq!(tokens, &toks!["doc", "$.a"][..]);
}

#[test]
fn test_encode_before_arguments_is_state_error() {
    let command = Command::new(CommandKind::JsonGet);
    assert!(matches!(encode(&command), Err(StackError::InvalidState(_))));
}

#[test]
fn test_decode_uses_given_protocol() {
    let command = Command::with_arguments(CommandKind::BfExists, args!["f", "a"]).unwrap();
    assert_eq!(decode(&command, Reply::Int(1), ProtocolVersion::Resp2).unwrap(), Reply::Int(1));
    assert_eq!(decode(&command, Reply::Int(1), ProtocolVersion::Resp3).unwrap(), Reply::Bool(true));
}

// =============================================================================
// Stream Transport
// =============================================================================

struct Duplex {
    input: Cursor<Vec<u8>>,
    output: Vec<u8>,
}

impl Read for Duplex {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for Duplex {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.output.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_stream_transport_pipelined_replies() {
    let stream = Duplex {
        input: Cursor::new(b"%1\r\n$5\r\nwidth\r\n:10\r\n~1\r\n$3\r\nfoo\r\n".to_vec()),
        output: Vec::new(),
    };
    let config = Config::builder().protocol(ProtocolVersion::Resp3).build();
    let transport = StreamTransport::with_config(stream, &config);
    let mut client = Client::new(transport, config);

    assert_eq!(
        client.call(CommandKind::CmsInfo, args!["sketch"]).unwrap(),
        Reply::map([("width", Reply::Int(10))])
    );
    assert_eq!(
        client.call(CommandKind::FtDictdump, args!["dict"]).unwrap(),
        Reply::Array(vec![Reply::bulk("foo")])
    );

    let sent = client.into_transport().into_inner().output;
    assert_eq!(
        sent,
        b"*2\r\n$8\r\nCMS.INFO\r\n$6\r\nsketch\r\n*2\r\n$11\r\nFT.DICTDUMP\r\n$4\r\ndict\r\n".to_vec()
    );
}

#[test]
fn test_stream_transport_rejects_oversized_bulk() {
    let stream = Duplex {
        input: Cursor::new(b"$10\r\n0123456789\r\n".to_vec()),
        output: Vec::new(),
    };
    let config = Config::builder().max_bulk_len(4).build();
    let mut client = Client::new(StreamTransport::with_config(stream, &config), config);

    let err = client.call(CommandKind::JsonGet, args!["doc"]).unwrap_err();
    assert!(matches!(err, StackError::Protocol(_)));
}
