//! stackcmd CLI
//!
//! Inspect how commands are encoded and how replies are parsed, without a
//! server.

use std::io::{self, Read};

use clap::{Parser, Subcommand};
use stackcmd::protocol::{encode_command, ReplyDecoder};
use stackcmd::{Arg, Command, CommandKind, Config, ProtocolVersion, Token};
use tracing_subscriber::{fmt, EnvFilter};

/// stackcmd CLI
#[derive(Parser, Debug)]
#[command(name = "stackcmd-cli")]
#[command(about = "Encode module commands and parse their replies")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the normalized tokens and request frame of a command
    Encode {
        /// Command verb or slug, e.g. BF.MADD or bfmadd
        command: String,

        /// Command arguments
        args: Vec<String>,

        /// Prefix applied to key arguments
        #[arg(short, long)]
        prefix: Option<String>,

        /// Send arguments as given, without normalization
        #[arg(long)]
        raw: bool,
    },

    /// Read a raw reply from stdin and print the parsed result as JSON
    Decode {
        /// Command verb or slug the reply belongs to
        command: String,

        /// Arguments the command was sent with
        args: Vec<String>,

        /// Reply protocol version (2 or 3)
        #[arg(long, default_value = "2")]
        protocol: ProtocolVersion,
    },

    /// List supported commands
    List,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,stackcmd=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args.command) {
        tracing::error!(category = e.category(), "{}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> stackcmd::Result<()> {
    match command {
        Commands::Encode {
            command,
            args,
            prefix,
            raw,
        } => {
            let mut command = build(&command, args, raw)?;
            if let Some(prefix) = prefix {
                command.prefix_keys(&prefix)?;
            }

            let tokens = command.arguments()?;
            let words: Vec<String> = tokens.iter().map(Token::to_string).collect();
            println!("{} {}", command.id(), words.join(" "));

            let frame = encode_command(command.id(), tokens);
            println!("{}", frame.escape_ascii());
        }

        Commands::Decode {
            command,
            args,
            protocol,
        } => {
            let command = build(&command, args, false)?;

            let mut input = Vec::new();
            io::stdin().read_to_end(&mut input)?;

            let decoder = ReplyDecoder::new(Config::default().max_bulk_len);
            let (raw, _) = decoder.decode(&input)?;
            let parsed = command.parse_response(raw, protocol)?;

            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }

        Commands::List => {
            for kind in CommandKind::ALL {
                println!(
                    "{:<16} {:<16} keys={}",
                    kind.id(),
                    kind.slug(),
                    kind.key_policy().name()
                );
            }
        }
    }

    Ok(())
}

fn build(name: &str, args: Vec<String>, raw: bool) -> stackcmd::Result<Command> {
    let kind: CommandKind = name.parse()?;
    tracing::info!("Building {} with {} argument(s)", kind, args.len());

    let mut command = Command::new(kind);
    if raw {
        command.set_raw_arguments(args.into_iter().map(Token::from).collect());
    } else {
        command.set_arguments(args.into_iter().map(Arg::from).collect())?;
    }
    Ok(command)
}
