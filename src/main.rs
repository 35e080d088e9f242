//! # Cardforge CLI
//!
//! Usage:
//!   cardforge render card.json -o card.html
//!   cardforge render card.json --fragment
//!   cat pasted.html | cardforge import - -o card.json
//!   cardforge new --preset demo > demo.json

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use cardforge::model::{presets, Document};
use cardforge::serialize::{import_html, import_markup, save};
use cardforge::CardError;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a saved card to HTML
    Render {
        /// Card record (JSON) or markup to import; `-` reads stdin
        input: PathBuf,
        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Write the bare fragment instead of a standalone page
        #[arg(long, default_value_t = false)]
        fragment: bool,
    },
    /// Import JSON or HTML and write a card record
    Import {
        /// File to import; `-` reads stdin
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write a built-in card as a record
    New {
        #[arg(long, value_enum, default_value_t = Preset::Default)]
        preset: Preset,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Preset {
    Default,
    Blank,
    Demo,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("cardforge=info"))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), CardError> {
    match args.command {
        Command::Render {
            input,
            output,
            fragment,
        } => {
            let document = read_document(&input)?;
            let html = if fragment {
                cardforge::render(&document)
            } else {
                cardforge::render_standalone(&document)
            };
            write_output(output.as_deref(), &html)
        }
        Command::Import { input, output } => {
            let document = read_document(&input)?;
            write_record(output.as_deref(), &document)
        }
        Command::New { preset, output } => {
            let document = match preset {
                Preset::Default => Document::default(),
                Preset::Blank => presets::blank(),
                Preset::Demo => presets::demo(),
            };
            write_record(output.as_deref(), &document)
        }
    }
}

/// Read a record or markup. An `.html`/`.htm` file is always markup.
fn read_document(input: &Path) -> Result<Document, CardError> {
    let text = read_input(input)?;
    let base = Document::default();
    if is_html_file(input) {
        Ok(import_html(&text, &base))
    } else {
        import_markup(&text, &base)
    }
}

fn is_html_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
        .unwrap_or(false)
}

fn read_input(input: &Path) -> Result<String, CardError> {
    if input.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn write_record(output: Option<&Path>, document: &Document) -> Result<(), CardError> {
    let json = save(document).to_json_pretty()?;
    write_output(output, &json)
}

fn write_output(output: Option<&Path>, text: &str) -> Result<(), CardError> {
    match output {
        Some(path) => {
            fs::write(path, text)?;
            eprintln!("✓ Written {} bytes to {}", text.len(), path.display());
        }
        None => println!("{}", text),
    }
    Ok(())
}
