//! Key Prefix Tests
//!
//! Prefixing must rewrite exactly the key positions of each command kind.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use stackcmd::arguments::SearchArguments;
use stackcmd::command::{Command, CommandKind, KeyPolicy};
use stackcmd::protocol::Token;
use stackcmd::{args, StackError};

macro_rules! toks {
    ($($t:expr),* $(,)?) => {
        vec![$(Token::from($t)),*]
    };
}

fn raw(kind: CommandKind, tokens: Vec<Token>) -> Command {
    let mut command = Command::new(kind);
    command.set_raw_arguments(tokens);
    command
}

// =============================================================================
// Single-Key Commands
// =============================================================================

#[test]
fn test_first_argument_prefixed_for_every_single_key_kind() {
    for &kind in CommandKind::ALL {
        if kind.key_policy() != KeyPolicy::First {
            continue;
        }

        let mut command = raw(kind, toks!["arg1"]);
        command.prefix_keys("prefix:").unwrap();
        assert_eq!(command.arguments().unwrap(), &toks!["prefix:arg1"][..], "{kind}");
    }
}

#[test]
fn test_values_after_key_untouched() {
    let mut command = Command::with_arguments(CommandKind::BfMadd, args!["key", vec!["a", "b"]]).unwrap();
    command.prefix_keys("ns:").unwrap();
    assert_eq!(command.arguments().unwrap(), &toks!["ns:key", "a", "b"][..]);
}

#[test]
fn test_numeric_key_becomes_text() {
    let mut command = raw(CommandKind::BfCard, toks![42]);
    command.prefix_keys("ns:").unwrap();
    assert_eq!(command.arguments().unwrap(), &toks!["ns:42"][..]);
}

// =============================================================================
// Composite Commands
// =============================================================================

#[test]
fn test_search_prefixes_index_only() {
    let mut modifiers = SearchArguments::new();
    modifiers.in_keys(["doc:1", "doc:2"]);

    let mut command = Command::with_arguments(
        CommandKind::FtSearch,
        args!["idx", "@title:hello", modifiers],
    )
    .unwrap();
    command.prefix_keys("tenant:").unwrap();

    assert_eq!(
        command.arguments().unwrap(),
        &toks!["tenant:idx", "@title:hello", "INKEYS", 2, "doc:1", "doc:2", "DIALECT", 2][..]
    );
}

#[test]
fn test_cms_merge_prefixes_destination_and_sources() {
    let mut command = Command::with_arguments(
        CommandKind::CmsMerge,
        args!["dest", 2, vec!["src1", "src2"], "WEIGHTS", vec![1, 2]],
    )
    .unwrap();
    command.prefix_keys("p:").unwrap();

    assert_eq!(
        command.arguments().unwrap(),
        &toks!["p:dest", 2, "p:src1", "p:src2", "WEIGHTS", 1, 2][..]
    );
}

#[test]
fn test_cms_merge_rejects_non_numeric_count() {
    let mut command = raw(CommandKind::CmsMerge, toks!["dest", "two", "src1"]);
    let err = command.prefix_keys("p:").unwrap_err();

    assert!(matches!(err, StackError::InvalidArgument(_)));
    assert_eq!(command.arguments().unwrap(), &toks!["dest", "two", "src1"][..]);
}

#[test]
fn test_cms_merge_count_beyond_arguments_is_clamped() {
    let mut command = raw(CommandKind::CmsMerge, toks!["dest", 100_000_000_000i64, "src"]);
    command.prefix_keys("p:").unwrap();

    assert_eq!(
        command.arguments().unwrap(),
        &toks!["p:dest", 100_000_000_000i64, "p:src"][..]
    );
}

#[test]
fn test_counted_policy_never_exceeds_arguments() {
    let policy = KeyPolicy::CountedAfter { first: 0, count_at: 1 };
    let args = toks!["dest", i64::MAX, "a", "b"];
    assert_eq!(policy.positions(&args).unwrap(), vec![0, 2, 3]);
}

#[test]
fn test_json_mget_leaves_path() {
    let mut command = Command::with_arguments(CommandKind::JsonMget, args![vec!["k1", "k2"], "$..a"]).unwrap();
    command.prefix_keys("p:").unwrap();
    assert_eq!(command.arguments().unwrap(), &toks!["p:k1", "p:k2", "$..a"][..]);
}

#[test]
fn test_list_has_no_keys() {
    let mut command = raw(CommandKind::FtList, toks!["unexpected"]);
    command.prefix_keys("p:").unwrap();
    assert_eq!(command.arguments().unwrap(), &toks!["unexpected"][..]);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_prefix_before_arguments_is_state_error() {
    let mut command = Command::new(CommandKind::BfAdd);
    assert!(matches!(command.prefix_keys("p:"), Err(StackError::InvalidState(_))));
}

#[test]
fn test_prefix_applied_twice_stacks() {
    let mut command = raw(CommandKind::BfAdd, toks!["key", "item"]);
    command.prefix_keys("p:").unwrap();
    command.prefix_keys("p:").unwrap();
    assert_eq!(command.arguments().unwrap(), &toks!["p:p:key", "item"][..]);
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn prop_search_only_rewrites_index(
        index in "[a-z]{1,8}",
        rest in prop::collection::vec("[a-zA-Z0-9@:*]{0,12}", 0..8),
        prefix in "[a-z]{1,6}:",
    ) {
        let mut tokens = vec![Token::from(index.clone())];
        tokens.extend(rest.iter().map(Token::from));
        let mut command = raw(CommandKind::FtSearch, tokens.clone());

        command.prefix_keys(&prefix).unwrap();
        let after = command.arguments().unwrap();

        prop_assert_eq!(&after[0], &Token::from(format!("{prefix}{index}")));
        prop_assert_eq!(&after[1..], &tokens[1..]);
    }

    #[test]
    fn prop_cms_merge_rewrites_counted_sources(
        sources in prop::collection::vec("[a-z]{1,8}", 1..6),
        weights in prop::collection::vec(1i64..100, 0..6),
    ) {
        let mut tokens = vec![Token::from("dest"), Token::from(sources.len())];
        tokens.extend(sources.iter().map(Token::from));
        if !weights.is_empty() {
            tokens.push(Token::from("WEIGHTS"));
            tokens.extend(weights.iter().copied().map(Token::from));
        }
        let mut command = raw(CommandKind::CmsMerge, tokens.clone());

        command.prefix_keys("p:").unwrap();
        let after = command.arguments().unwrap();

        let keys = 2 + sources.len();
        for (i, (before, after)) in tokens.iter().zip(after).enumerate() {
            if i == 0 || (2..keys).contains(&i) {
                prop_assert_eq!(after, &before.with_prefix("p:"));
            } else {
                prop_assert_eq!(after, before);
            }
        }
    }
}
