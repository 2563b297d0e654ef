//! Commands
//!
//! A [`Command`] pairs a [`CommandKind`] with its flattened argument tokens.
//!
//! ## Lifecycle
//! ```text
//! Command::new(kind)
//!     -> set_arguments(Vec<Arg>)       normalize per Layout
//!     -> prefix_keys(prefix)           once per send, KeyPolicy positions only
//!     -> arguments()                   flat tokens for the transport
//!     -> parse_response(reply, proto)  ReplyShape transform
//! ```

mod args;
mod keys;
mod kind;
mod response;

pub use args::Arg;
pub use keys::KeyPolicy;
pub use kind::{CommandKind, Layout};
pub use response::ReplyShape;

use tracing::{debug, trace};

use crate::arguments::DEFAULT_DIALECT;
use crate::error::{Result, StackError};
use crate::protocol::{ProtocolVersion, Reply, Token};

/// One invocation of a supported command
#[derive(Debug, Clone, PartialEq)]
pub struct Command {
    kind: CommandKind,
    arguments: Option<Vec<Token>>,
    raw: bool,
}

impl Command {
    pub fn new(kind: CommandKind) -> Self {
        Self {
            kind,
            arguments: None,
            raw: false,
        }
    }

    /// Creates a command and normalizes `args` in one step
    pub fn with_arguments(kind: CommandKind, args: Vec<Arg>) -> Result<Self> {
        let mut command = Self::new(kind);
        command.set_arguments(args)?;
        Ok(command)
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Protocol verb
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    /// True if the arguments were stored verbatim
    pub fn is_raw(&self) -> bool {
        self.raw
    }

    /// Normalize and store `args`.
    ///
    /// Nested lists are flattened and builders are expanded where they
    /// appear. Query commands get `DIALECT 2` appended unless a dialect was
    /// supplied.
    pub fn set_arguments(&mut self, args: Vec<Arg>) -> Result<()> {
        let tokens = match self.kind.layout() {
            Layout::Plain => Arg::flatten(&args),
            Layout::Query => query_tokens(&args),
            Layout::CreateIndex => create_index_tokens(&args)?,
        };

        trace!(command = self.id(), args = args.len(), tokens = tokens.len(), "Normalized arguments");

        self.arguments = Some(tokens);
        self.raw = false;
        Ok(())
    }

    /// Store already serialized tokens as given
    pub fn set_raw_arguments(&mut self, tokens: Vec<Token>) {
        self.arguments = Some(tokens);
        self.raw = true;
    }

    /// Flat argument tokens
    pub fn arguments(&self) -> Result<&[Token]> {
        self.arguments.as_deref().ok_or_else(|| {
            StackError::invalid_state(format!("arguments of {} read before being set", self.id()))
        })
    }

    /// Prepend `prefix` to the key positions chosen by the kind's
    /// [`KeyPolicy`].
    ///
    /// Each call prefixes again; callers apply it once per send.
    pub fn prefix_keys(&mut self, prefix: &str) -> Result<()> {
        let id = self.id();
        let policy = self.kind.key_policy();
        let args = self.arguments.as_mut().ok_or_else(|| {
            StackError::invalid_state(format!("keys of {id} prefixed before arguments were set"))
        })?;

        let positions = policy.positions(args)?;
        keys::apply_prefix(args, &positions, prefix);

        debug!(command = id, prefix, keys = positions.len(), "Prefixed keys");
        Ok(())
    }

    /// Normalize a reply for this command.
    ///
    /// An error reply becomes [`StackError::Server`] with the server's message.
    pub fn parse_response(&self, raw: Reply, protocol: ProtocolVersion) -> Result<Reply> {
        let args = self.arguments.as_deref().unwrap_or_default();
        self.kind.reply_shape().parse(raw, protocol, args)
    }
}

fn query_tokens(args: &[Arg]) -> Vec<Token> {
    let mut tokens = Arg::flatten(args);

    // An inline dialect is the trailing `DIALECT <n>` pair after index and query
    let inline_dialect = tokens.len() >= 4 && tokens[tokens.len() - 2].eq_keyword("DIALECT");
    let has_dialect = args.iter().any(Arg::carries_dialect) || inline_dialect;
    if !has_dialect {
        tokens.push(Token::from("DIALECT"));
        tokens.push(Token::Int(DEFAULT_DIALECT));
    }
    tokens
}

fn create_index_tokens(args: &[Arg]) -> Result<Vec<Token>> {
    let (index, rest) = args
        .split_first()
        .ok_or_else(|| StackError::invalid_argument("FT.CREATE requires an index name"))?;

    let mut tokens = Vec::new();
    index.flatten_into(&mut tokens);
    for arg in rest.iter().filter(|a| matches!(a, Arg::Create(_))) {
        arg.flatten_into(&mut tokens);
    }
    for arg in rest.iter().filter(|a| !matches!(a, Arg::Create(_))) {
        arg.flatten_into(&mut tokens);
    }
    Ok(tokens)
}
