//! mdpage CLI - Convert markdown pages to HTML
//!
//! Usage:
//!   mdpage [OPTIONS] <COMMAND> <FILE>
//!
//! Commands:
//!   html      Render the document body as HTML
//!   title     Print the page title (first `# ` heading)
//!   blocks    List blocks with their kinds and inline spans
//!   validate  Check that the page converts

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand};
use mdpage_core::block::classify;
use mdpage_core::inline::tokenize;
use mdpage_core::lexer::segments;
use mdpage_core::{convert, extract_title, markdown_to_html, BlockKind, InlineSpan, ParseError};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Convert markdown pages to HTML.
#[derive(Parser)]
#[command(name = "mdpage", version, about)]
struct Cli {
    /// Enable debug logging (otherwise RUST_LOG is used).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the document body as HTML.
    Html(FileArgs),
    /// Print the page title.
    Title(FileArgs),
    /// List blocks with their kinds and inline spans.
    Blocks(OutputArgs),
    /// Check that the page converts, without output.
    Validate(OutputArgs),
}

#[derive(Args)]
struct FileArgs {
    /// Markdown file to read.
    file: PathBuf,
}

#[derive(Args)]
struct OutputArgs {
    /// Markdown file to read.
    file: PathBuf,

    /// Output in JSON format.
    #[arg(short, long)]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<(), String> {
    match command {
        Command::Html(args) => cmd_html(&read_input(&args.file)?),
        Command::Title(args) => cmd_title(&read_input(&args.file)?),
        Command::Blocks(args) => cmd_blocks(&read_input(&args.file)?, args.json),
        Command::Validate(args) => cmd_validate(&read_input(&args.file)?, args.json),
    }
}

fn read_input(path: &Path) -> Result<String, String> {
    let input = fs::read_to_string(path)
        .map_err(|e| format!("failed to read '{}': {}", path.display(), e))?;
    tracing::debug!(path = %path.display(), bytes = input.len(), "Read input");
    Ok(input)
}

// =============================================================================
// Html / Title Commands
// =============================================================================

fn cmd_html(input: &str) -> Result<(), String> {
    let html = markdown_to_html(input).map_err(|e| e.to_string())?;
    println!("{html}");
    Ok(())
}

fn cmd_title(input: &str) -> Result<(), String> {
    let title = extract_title(input).map_err(|e| e.to_string())?;
    println!("{title}");
    Ok(())
}

// =============================================================================
// Blocks Command
// =============================================================================

#[derive(Serialize)]
struct JsonBlock<'a> {
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<u8>,
    start: u32,
    end: u32,
    text: &'a str,
    /// Inline spans for blocks whose whole text is tokenized.
    #[serde(skip_serializing_if = "Option::is_none")]
    spans: Option<Vec<JsonSpan<'a>>>,
}

#[derive(Serialize)]
struct JsonSpan<'a> {
    kind: &'static str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
}

impl<'a> JsonSpan<'a> {
    fn from_span(span: &'a InlineSpan<'a>) -> Self {
        Self {
            kind: span.kind.as_str(),
            text: &span.text,
            url: span.url.as_deref(),
        }
    }
}

fn cmd_blocks(input: &str, json: bool) -> Result<(), String> {
    let mut rows = Vec::new();

    for segment in segments(input) {
        let kind = classify(segment.text);
        // Paragraph text goes to the tokenizer unchanged, so its spans can
        // be shown without assembling the block.
        let spans = match kind {
            BlockKind::Paragraph => Some(tokenize(segment.text).map_err(|e| e.to_string())?),
            _ => None,
        };
        rows.push((segment, kind, spans));
    }

    if json {
        let blocks: Vec<JsonBlock> = rows
            .iter()
            .map(|(segment, kind, spans)| JsonBlock {
                kind: kind.as_str(),
                level: match kind {
                    BlockKind::Heading(level) => Some(*level),
                    _ => None,
                },
                start: segment.span.start,
                end: segment.span.end,
                text: segment.text,
                spans: spans
                    .as_ref()
                    .map(|spans| spans.iter().map(JsonSpan::from_span).collect()),
            })
            .collect();
        let out = serde_json::to_string_pretty(&blocks).map_err(|e| e.to_string())?;
        println!("{out}");
    } else {
        println!("Blocks: {}", rows.len());
        for (i, (segment, kind, spans)) in rows.iter().enumerate() {
            println!(
                "  [{}] {} ({}..{}): {}",
                i,
                kind,
                segment.span.start,
                segment.span.end,
                preview(segment.text, 40)
            );
            for span in spans.iter().flatten() {
                match &span.url {
                    Some(url) => println!("      {} {:?} -> {}", span.kind, span.text, url),
                    None => println!("      {} {:?}", span.kind, span.text),
                }
            }
        }
    }

    Ok(())
}

fn preview(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() > max_chars {
        let cut: String = first_line.chars().take(max_chars).collect();
        format!("{cut}...")
    } else {
        first_line.to_owned()
    }
}

// =============================================================================
// Validate Command
// =============================================================================

#[derive(Serialize)]
struct JsonError {
    kind: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    start: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<u32>,
}

impl From<&ParseError> for JsonError {
    fn from(e: &ParseError) -> Self {
        Self {
            kind: format!("{:?}", e.kind()),
            message: e.to_string(),
            start: e.span().map(|s| s.start),
            end: e.span().map(|s| s.end),
        }
    }
}

fn cmd_validate(input: &str, json: bool) -> Result<(), String> {
    match convert(input) {
        Ok(page) => {
            if json {
                println!(
                    "{}",
                    serde_json::json!({"valid": true, "title": page.title, "errors": []})
                );
            } else {
                println!("Valid: \"{}\" ({} bytes of HTML)", page.title, page.html.len());
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let errors = vec![JsonError::from(&e)];
                println!("{}", serde_json::json!({"valid": false, "errors": errors}));
            }
            Err(format!("validation failed: {e}"))
        }
    }
}
