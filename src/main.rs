use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use tracing_subscriber::EnvFilter;

use mdcomment::{Config, Converter, HELP_TEXT};

#[derive(Parser)]
#[command(name = "mdcomment")]
#[command(about = "Convert comment Markdown to HTML")]
struct Cli {
    /// Input Markdown file (stdin when omitted or `-`)
    input: Option<PathBuf>,

    /// Output HTML file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pass the input through unchanged
    #[arg(long)]
    disable: bool,

    /// Skip the allow-list HTML cleaner
    #[arg(long)]
    raw: bool,

    /// Escape text outside inline constructs as well
    #[arg(long)]
    escape_text: bool,

    /// Print the supported syntax and exit
    #[arg(long)]
    syntax_help: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if cli.syntax_help {
        println!("{}", HELP_TEXT);
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::compiled_default(),
    };
    if cli.disable {
        config.enabled = false;
    }
    if cli.raw {
        config.output.sanitize = false;
    }
    if cli.escape_text {
        config.output.escape_plain_text = true;
    }

    let markdown = read_input(cli.input.as_deref())?;
    let html = Converter::from_config(&config).convert(&markdown);

    match &cli.output {
        Some(path) => fs::write(path, html)
            .with_context(|| format!("writing {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(html.as_bytes())
                .context("writing to stdout")?;
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if path != Path::new("-") => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        _ => {
            let mut markdown = String::new();
            io::stdin()
                .read_to_string(&mut markdown)
                .context("reading stdin")?;
            Ok(markdown)
        }
    }
}
