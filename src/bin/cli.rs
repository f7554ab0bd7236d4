//! maps-express command line
//!
//! Annotates HTML files (or stdin) and live pages with map search pins, and routes raw
//! extension messages against a document.

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use maps_express::annotate::PIN_GLYPH;
use maps_express::{
    AnnotationRequest, Annotator, AnnotatorOptions, BrowserSession, DomTree, LaunchOptions,
    ToolContext, ToolRegistry, message,
};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "maps-express")]
#[command(version)]
#[command(about = "Attach map search pins to place names in HTML", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Annotate an HTML document or a live page
    Annotate(AnnotateArgs),
    /// Route a JSON extension message against an HTML document
    Dispatch(DispatchArgs),
}

#[derive(Args)]
struct DocumentArgs {
    /// HTML input file, `-` for stdin
    #[arg(long, short = 'i', value_name = "FILE", default_value = "-")]
    input: String,

    /// Parse the input as a fragment instead of a full document
    #[arg(long)]
    fragment: bool,

    /// Write the annotated HTML here instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct AnnotatorArgs {
    /// Visible content of each pin
    #[arg(long, value_name = "TEXT", default_value = PIN_GLYPH)]
    pin: String,

    /// Do not scan the YouTube video description
    #[arg(long)]
    no_youtube: bool,
}

impl AnnotatorArgs {
    fn annotator(&self) -> Annotator {
        Annotator::new(
            AnnotatorOptions::default()
                .pin_glyph(self.pin.clone())
                .scan_youtube_description(!self.no_youtube),
        )
    }
}

#[derive(Args)]
struct AnnotateArgs {
    #[command(flatten)]
    document: DocumentArgs,

    /// Annotate this page in a browser instead of an HTML file
    #[arg(long, value_name = "URL")]
    url: Option<String>,

    /// Launch browser in headed mode (default: headless)
    #[arg(long, short = 'H', requires = "url")]
    headed: bool,

    /// Path to custom browser executable
    #[arg(long, value_name = "PATH", requires = "url")]
    executable_path: Option<PathBuf>,

    /// Newline-delimited candidate place names
    #[arg(long, value_name = "TEXT", conflicts_with = "content_file")]
    content: Option<String>,

    /// File holding newline-delimited candidate place names
    #[arg(long, value_name = "FILE")]
    content_file: Option<PathBuf>,

    /// Map search URL prefix, used verbatim (e.g. `https://www.google.com/maps?`)
    #[arg(long, value_name = "URL")]
    query_url: String,

    #[command(flatten)]
    annotator: AnnotatorArgs,
}

#[derive(Args)]
struct DispatchArgs {
    /// JSON message file, `-` for stdin
    #[arg(long, short = 'm', value_name = "FILE")]
    message: String,

    #[command(flatten)]
    document: DocumentArgs,

    #[command(flatten)]
    annotator: AnnotatorArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Annotate(args) => run_annotate(args),
        Command::Dispatch(args) => run_dispatch(args),
    }
}

fn run_annotate(args: AnnotateArgs) -> anyhow::Result<()> {
    let candidates_from_stdin = args.content.is_none() && args.content_file.is_none();
    if candidates_from_stdin && args.url.is_none() && args.document.input == "-" {
        bail!("Candidates and HTML cannot both come from stdin; pass --content, --content-file or --input");
    }

    let content = match (&args.content, &args.content_file) {
        (Some(content), _) => content.clone(),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read candidates from {}", path.display()))?,
        (None, None) => read_source("-").context("Failed to read candidates from stdin")?,
    };
    let request = AnnotationRequest::new(content, args.query_url.clone());
    let annotator = args.annotator.annotator();

    if let Some(url) = &args.url {
        let mut options = LaunchOptions::new().headless(!args.headed);
        if let Some(path) = &args.executable_path {
            options = options.chrome_path(path);
        }

        let session = BrowserSession::launch(options)?.with_annotator(annotator);
        session.navigate(url)?;
        session.wait_for_navigation()?;

        let report = session.annotate_page(&request)?;
        eprintln!("Inserted {} pins into {}", report.pin_count(), url);
        return Ok(());
    }

    let mut document = load_document(&args.document)?;
    let report = annotator.annotate(&mut document, &request);
    write_document(&args.document, &document)?;

    eprintln!("Inserted {} pins", report.pin_count());
    Ok(())
}

fn run_dispatch(args: DispatchArgs) -> anyhow::Result<()> {
    if args.message == "-" && args.document.input == "-" {
        bail!("The message and the HTML cannot both come from stdin");
    }

    let raw = read_source(&args.message).with_context(|| format!("Failed to read message from {}", args.message))?;
    let mut document = load_document(&args.document)?;
    let annotator = args.annotator.annotator();
    let registry = ToolRegistry::with_defaults();

    let result = {
        let mut context = ToolContext::new(&mut document, &annotator);
        message::dispatch_raw(&registry, &raw, &mut context)?
    };

    println!("{}", serde_json::to_string_pretty(&result)?);
    if args.document.output.is_some() {
        write_document(&args.document, &document)?;
    }

    Ok(())
}

fn read_source(source: &str) -> io::Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        fs::read_to_string(source)
    }
}

fn load_document(args: &DocumentArgs) -> anyhow::Result<DomTree> {
    let html = read_source(&args.input).with_context(|| format!("Failed to read HTML from {}", args.input))?;

    Ok(if args.fragment {
        DomTree::parse_fragment(&html)
    } else {
        DomTree::parse_document(&html)
    })
}

fn write_document(args: &DocumentArgs, document: &DomTree) -> anyhow::Result<()> {
    let html = document.to_html();
    match &args.output {
        Some(path) => fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{}", html),
    }
    Ok(())
}
