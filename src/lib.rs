//! # stackcmd
//!
//! Command encoding for the module command families of a Redis-protocol
//! client (Bloom filters, Count-Min sketches, JSON documents, search):
//! - Argument normalization with builders spliced in place
//! - Per-command key prefixing for namespaced keys
//! - Reply parsing for both RESP2 and RESP3
//! - Fluent builders for search, spellcheck and index creation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Caller                                │
//! │        (Vec<Arg>: scalars, lists, builders, schema)         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                      Command                                │
//! │     Layout (normalize) · KeyPolicy · ReplyShape per kind    │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌──────────────┐
//!   │   Client    │          │    Codec     │
//!   │  (prefix)   │─────────▶│ (RESP2/3)    │
//!   └─────────────┘          └──────┬───────┘
//!                                   │
//!                                   ▼
//!                           ┌──────────────┐
//!                           │  Transport   │
//!                           │  (external)  │
//!                           └──────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod arguments;
pub mod command;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StackError};
pub use config::Config;
pub use client::{decode, encode, Client, StreamTransport, Transport};
pub use command::{Arg, Command, CommandKind};
pub use protocol::{ProtocolVersion, Reply, Token};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of stackcmd
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
