//! Client facade
//!
//! The boundary with the transport. A [`Transport`] only moves a verb and
//! its tokens to a server and hands back the raw reply; everything
//! command-specific stays in [`Command`].
//!
//! ```text
//! Client::execute(command)
//!     -> prefix_keys (once, when configured)
//!     -> Transport::send(id, tokens) -> Reply
//!     -> Error reply?  StackError::Server
//!     -> parse_response(reply, config.protocol)
//! ```

use std::io::{BufReader, Read, Write};

use tracing::{debug, warn};

use crate::command::{Arg, Command, CommandKind};
use crate::config::Config;
use crate::error::{Result, StackError};
use crate::protocol::{read_reply_with, write_command, ProtocolVersion, Reply, ReplyDecoder, Token};

/// Sends one request and returns its raw reply
pub trait Transport {
    fn send(&mut self, id: &str, tokens: &[Token]) -> Result<Reply>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, id: &str, tokens: &[Token]) -> Result<Reply> {
        (**self).send(id, tokens)
    }
}

/// Verb and flat tokens of a command, ready to send
pub fn encode(command: &Command) -> Result<(&'static str, &[Token])> {
    Ok((command.id(), command.arguments()?))
}

/// Normalize a raw reply for `command`
pub fn decode(command: &Command, raw: Reply, protocol: ProtocolVersion) -> Result<Reply> {
    command.parse_response(raw, protocol)
}

// =============================================================================
// Client
// =============================================================================

/// Runs commands over a transport with a fixed configuration
pub struct Client<T> {
    transport: T,
    config: Config,
}

impl<T: Transport> Client<T> {
    pub fn new(transport: T, config: Config) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Build a command of `kind` from `args`
    pub fn command(&self, kind: CommandKind, args: Vec<Arg>) -> Result<Command> {
        Command::with_arguments(kind, args)
    }

    /// Send `command` and return its normalized reply
    pub fn execute(&mut self, mut command: Command) -> Result<Reply> {
        if let Some(prefix) = &self.config.key_prefix {
            command.prefix_keys(prefix)?;
        }

        let (id, tokens) = encode(&command)?;
        debug!(command = id, args = tokens.len(), "Executing command");

        match self.transport.send(id, tokens)? {
            Reply::Error(message) => {
                warn!(command = id, error = %message, "Server returned error");
                Err(StackError::Server(message))
            }
            raw => command.parse_response(raw, self.config.protocol),
        }
    }

    /// Build and execute in one step
    pub fn call(&mut self, kind: CommandKind, args: Vec<Arg>) -> Result<Reply> {
        let command = self.command(kind, args)?;
        self.execute(command)
    }
}

// =============================================================================
// Stream Transport
// =============================================================================

/// Blocking transport over any byte stream
pub struct StreamTransport<S: Read + Write> {
    /// Stream reader (buffered; writes go to the inner stream)
    stream: BufReader<S>,

    decoder: ReplyDecoder,
}

impl<S: Read + Write> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        Self::with_config(stream, &Config::default())
    }

    /// Uses the decoder limits from `config`
    pub fn with_config(stream: S, config: &Config) -> Self {
        Self {
            stream: BufReader::new(stream),
            decoder: ReplyDecoder::new(config.max_bulk_len),
        }
    }

    pub fn get_ref(&self) -> &S {
        self.stream.get_ref()
    }

    pub fn into_inner(self) -> S {
        self.stream.into_inner()
    }
}

impl<S: Read + Write> Transport for StreamTransport<S> {
    fn send(&mut self, id: &str, tokens: &[Token]) -> Result<Reply> {
        write_command(self.stream.get_mut(), id, tokens)?;
        read_reply_with(&mut self.stream, &self.decoder)
    }
}
