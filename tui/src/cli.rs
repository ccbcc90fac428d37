use clap::Parser;
use std::path::PathBuf;

use crate::clipboard::ClipboardBackend;

#[derive(Parser, Debug, Default)]
#[command(version, about = "Browse server setup commands and copy them to the clipboard.")]
pub struct Cli {
    /// Where copied commands go. Overrides `clipboard` in config.toml.
    #[arg(long, value_enum)]
    pub clipboard: Option<ClipboardBackend>,

    /// Guide file to show instead of the built-in guide.
    #[arg(long, value_name = "FILE")]
    pub guide: Option<PathBuf>,

    /// Write the guide as plain text to stdout and exit.
    #[arg(long, default_value_t = false)]
    pub print: bool,

    /// Open the section with this id on start.
    #[arg(long, value_name = "SECTION_ID")]
    pub expand: Option<String>,

    /// Log at info level instead of warn.
    #[clap(long = "debug", short = 'd', default_value_t = false)]
    pub debug: bool,
}
