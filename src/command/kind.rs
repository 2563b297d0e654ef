//! Command kinds
//!
//! The closed set of supported commands. Each kind carries its protocol verb
//! and the three behaviours the generic [`Command`](super::Command) defers
//! to: argument layout, key policy and reply shape.

use std::fmt;
use std::str::FromStr;

use super::keys::KeyPolicy;
use super::response::ReplyShape;
use crate::error::StackError;

/// How `set_arguments` arranges the flattened arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Flatten in call order
    Plain,

    /// Flatten, then append the default dialect unless one was given
    Query,

    /// Index name, then creation options, then the schema
    CreateIndex,
}

macro_rules! command_kinds {
    ($($variant:ident => $id:literal, $slug:literal;)*) => {
        /// Supported command types
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum CommandKind {
            $($variant,)*
        }

        impl CommandKind {
            /// Every supported kind, in table order
            pub const ALL: &'static [CommandKind] = &[$(CommandKind::$variant,)*];

            /// Protocol verb, e.g. `BF.MEXISTS`
            pub fn id(self) -> &'static str {
                match self {
                    $(CommandKind::$variant => $id,)*
                }
            }

            /// Lowercase dotless name, e.g. `bfmexists`
            pub fn slug(self) -> &'static str {
                match self {
                    $(CommandKind::$variant => $slug,)*
                }
            }
        }
    };
}

command_kinds! {
    BfAdd => "BF.ADD", "bfadd";
    BfMadd => "BF.MADD", "bfmadd";
    BfExists => "BF.EXISTS", "bfexists";
    BfMexists => "BF.MEXISTS", "bfmexists";
    BfReserve => "BF.RESERVE", "bfreserve";
    BfInsert => "BF.INSERT", "bfinsert";
    BfInfo => "BF.INFO", "bfinfo";
    BfCard => "BF.CARD", "bfcard";
    BfScandump => "BF.SCANDUMP", "bfscandump";
    BfLoadchunk => "BF.LOADCHUNK", "bfloadchunk";

    CmsInitbydim => "CMS.INITBYDIM", "cmsinitbydim";
    CmsInitbyprob => "CMS.INITBYPROB", "cmsinitbyprob";
    CmsIncrby => "CMS.INCRBY", "cmsincrby";
    CmsQuery => "CMS.QUERY", "cmsquery";
    CmsMerge => "CMS.MERGE", "cmsmerge";
    CmsInfo => "CMS.INFO", "cmsinfo";

    JsonSet => "JSON.SET", "jsonset";
    JsonGet => "JSON.GET", "jsonget";
    JsonDel => "JSON.DEL", "jsondel";
    JsonMget => "JSON.MGET", "jsonmget";
    JsonArrappend => "JSON.ARRAPPEND", "jsonarrappend";
    JsonArrinsert => "JSON.ARRINSERT", "jsonarrinsert";
    JsonType => "JSON.TYPE", "jsontype";

    FtCreate => "FT.CREATE", "ftcreate";
    FtSearch => "FT.SEARCH", "ftsearch";
    FtSpellcheck => "FT.SPELLCHECK", "ftspellcheck";
    FtDictadd => "FT.DICTADD", "ftdictadd";
    FtDictdel => "FT.DICTDEL", "ftdictdel";
    FtDictdump => "FT.DICTDUMP", "ftdictdump";
    FtDropindex => "FT.DROPINDEX", "ftdropindex";
    FtExplain => "FT.EXPLAIN", "ftexplain";
    FtList => "FT._LIST", "ft_list";
}

impl CommandKind {
    /// Positions of routable keys
    pub fn key_policy(self) -> KeyPolicy {
        match self {
            // CMS.MERGE destination numKeys source [source ...] [WEIGHTS ...]
            CommandKind::CmsMerge => KeyPolicy::CountedAfter { first: 0, count_at: 1 },
            // JSON.MGET key [key ...] path
            CommandKind::JsonMget => KeyPolicy::AllButLast,
            CommandKind::FtList => KeyPolicy::None,
            _ => KeyPolicy::First,
        }
    }

    pub fn reply_shape(self) -> ReplyShape {
        match self {
            CommandKind::BfAdd | CommandKind::BfExists => ReplyShape::Boolean,
            CommandKind::BfMadd | CommandKind::BfMexists | CommandKind::BfInsert => {
                ReplyShape::BooleanList
            }
            CommandKind::BfInfo => ReplyShape::InfoField,
            CommandKind::CmsInfo => ReplyShape::FlatMap,
            CommandKind::FtSpellcheck => ReplyShape::Spellcheck,
            CommandKind::FtDictdump | CommandKind::FtList => ReplyShape::SetToArray,
            _ => ReplyShape::Identity,
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            CommandKind::FtSearch | CommandKind::FtSpellcheck => Layout::Query,
            CommandKind::FtCreate => Layout::CreateIndex,
            _ => Layout::Plain,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for CommandKind {
    type Err = StackError;

    /// Accepts the verb (`BF.MEXISTS`) or the slug (`bfmexists`), any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id().eq_ignore_ascii_case(s) || kind.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| StackError::invalid_argument(format!("Unknown command '{s}'")))
    }
}
