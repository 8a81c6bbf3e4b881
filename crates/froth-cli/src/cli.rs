use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use froth_stash::{CodecKind, ValueKind};

#[derive(Parser)]
#[command(
    name = "froth",
    about = "Froth: persistent typed key-value stashes",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding the stash blobs
    #[arg(short, long, global = true)]
    pub dest: Option<PathBuf>,

    /// Asset name of the stash inside the destination
    #[arg(short, long, global = true)]
    pub asset: Option<String>,

    /// TOML file with destination, asset and codec
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Blob encoding (bincode or json)
    #[arg(long, global = true)]
    pub codec: Option<CodecKind>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every key in the stash
    List,
    /// Print the value stored under a key
    Get(GetArgs),
    /// Store a single value
    Set(SetArgs),
    /// Store several values of one kind in a single write
    SetMany(SetManyArgs),
    /// List the stashes present in the destination
    Assets,
}

/// Value kind selection shared by the read and write commands.
#[derive(Args, Clone, Debug, Default)]
pub struct KindArgs {
    /// Treat values as integers
    #[arg(long, conflicts_with = "list")]
    pub int: bool,
    /// Treat values as comma-separated text lists
    #[arg(long)]
    pub list: bool,
}

impl KindArgs {
    pub fn kind(&self) -> ValueKind {
        if self.int {
            ValueKind::Integer
        } else if self.list {
            ValueKind::TextList
        } else {
            ValueKind::Text
        }
    }
}

#[derive(Args)]
pub struct GetArgs {
    pub key: String,
    /// Require the value to be text
    #[arg(long, conflicts_with_all = ["int", "list"])]
    pub text: bool,
    #[command(flatten)]
    pub kind: KindArgs,
}

impl GetArgs {
    /// The kind the caller asked for, if any.
    pub fn expected_kind(&self) -> Option<ValueKind> {
        if self.text || self.kind.int || self.kind.list {
            Some(self.kind.kind())
        } else {
            None
        }
    }
}

#[derive(Args)]
pub struct SetArgs {
    pub key: String,
    pub value: String,
    #[command(flatten)]
    pub kind: KindArgs,
}

#[derive(Args)]
pub struct SetManyArgs {
    /// Entries as key=value
    #[arg(required = true)]
    pub pairs: Vec<String>,
    #[command(flatten)]
    pub kind: KindArgs,
}
