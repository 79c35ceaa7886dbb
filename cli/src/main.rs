//! copydeck CLI - bracket-markup copy decoding tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use copydeck::{
    render, CleanupPreset, JsonFormat, Language, Paragraph, RenderOptions, RenderStats,
    ServiceConfig, TextClient, TextService,
};

#[derive(Parser)]
#[command(name = "copydeck")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Decode bracket-markup site copy to HTML, Markdown, text, and JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a markup file (stdin if not specified) and render it
    Decode {
        /// Input markup file
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: Format,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Convert a markup file to all formats (HTML, Markdown, text, JSON)
    Convert {
        /// Input markup file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Retrieve copy from a text service and render it
    Fetch {
        /// Selector key of the copy
        #[arg(value_name = "SELECTOR")]
        selector: String,

        /// Language identifier
        #[arg(short, long, env = "COPYDECK_LANGUAGE", default_value = "en")]
        lang: String,

        /// Base URL of the text service
        #[arg(long, env = "COPYDECK_BASE_URL")]
        base_url: String,

        /// Endpoint path below the base URL
        #[arg(long, default_value = copydeck::service::DEFAULT_ENDPOINT)]
        endpoint: String,

        /// Request timeout in seconds
        #[arg(long, default_value = "10")]
        timeout: u64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "html")]
        format: Format,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// Show statistics about markup files, totalled across all inputs
    Info {
        /// Input markup files (stdin if none are given)
        #[arg(value_name = "FILE")]
        inputs: Vec<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(clap::Args, Clone, Default)]
struct RenderArgs {
    /// Base URL asset links are resolved against
    #[arg(long, value_name = "URL")]
    asset_base: Option<String>,

    /// Open asset links in a new tab (HTML)
    #[arg(long)]
    target_blank: bool,

    /// Text cleanup preset (Markdown and text)
    #[arg(long, value_enum)]
    cleanup: Option<CleanupLevel>,
}

impl RenderArgs {
    fn to_options(&self) -> RenderOptions {
        let mut options = RenderOptions::new().with_target_blank(self.target_blank);
        if let Some(ref base) = self.asset_base {
            options = options.with_asset_base(base.as_str());
        }
        if let Some(level) = self.cleanup {
            options = options.with_cleanup_preset(level.into());
        }
        options
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// HTML paragraphs
    Html,
    /// Markdown
    #[value(alias = "md")]
    Markdown,
    /// Plain text
    Text,
    /// Pretty-printed JSON
    Json,
}

impl Format {
    fn file_name(self) -> &'static str {
        match self {
            Format::Html => "copy.html",
            Format::Markdown => "copy.md",
            Format::Text => "copy.txt",
            Format::Json => "copy.json",
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum CleanupLevel {
    /// Minimal cleanup (Unicode normalization only)
    Minimal,
    /// Standard cleanup (whitespace and blank lines)
    Standard,
}

impl From<CleanupLevel> for CleanupPreset {
    fn from(level: CleanupLevel) -> Self {
        match level {
            CleanupLevel::Minimal => CleanupPreset::Minimal,
            CleanupLevel::Standard => CleanupPreset::Standard,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Decode {
            input,
            format,
            output,
            render,
        }) => cmd_decode(input.as_deref(), format, output.as_deref(), &render),
        Some(Commands::Convert {
            input,
            output,
            render,
        }) => cmd_convert(&input, output.as_deref(), &render),
        Some(Commands::Fetch {
            selector,
            lang,
            base_url,
            endpoint,
            timeout,
            format,
            render,
        }) => cmd_fetch(
            &selector, &lang, &base_url, &endpoint, timeout, format, &render,
        ),
        Some(Commands::Info { inputs }) => cmd_info(&inputs),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: copydeck <COMMAND>".yellow());
            println!("       copydeck --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut raw = String::new();
            io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn render_as(
    paragraphs: &[Paragraph],
    format: Format,
    options: &RenderOptions,
) -> copydeck::Result<String> {
    match format {
        Format::Html => render::to_html(paragraphs, options),
        Format::Markdown => render::to_markdown(paragraphs, options),
        Format::Text => render::to_text(paragraphs, options),
        Format::Json => render::to_json(paragraphs, JsonFormat::Pretty),
    }
}

fn emit(content: &str, output: Option<&Path>) -> io::Result<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_decode(
    input: Option<&Path>,
    format: Format,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_input(input)?;
    let paragraphs = copydeck::decode(&raw);
    let content = render_as(&paragraphs, format, &args.to_options())?;
    emit(&content, output)?;
    Ok(())
}

fn convert_to_dir(
    paragraphs: &[Paragraph],
    output_dir: &Path,
    options: &RenderOptions,
    pb: &ProgressBar,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    for format in [Format::Html, Format::Markdown, Format::Text, Format::Json] {
        pb.set_message(format!("Generating {}...", format.file_name()));
        let content = render_as(paragraphs, format, options)?;
        fs::write(output_dir.join(format.file_name()), content)?;
        pb.inc(1);
    }

    Ok(())
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    let pb = ProgressBar::new(5);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Decoding...");
    let paragraphs = copydeck::decode_file(input)?;
    pb.inc(1);

    convert_to_dir(&paragraphs, &output_dir, &args.to_options(), &pb)?;
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    println!("  {} copy.html", "├─".dimmed());
    println!("  {} copy.md", "├─".dimmed());
    println!("  {} copy.txt", "├─".dimmed());
    println!("  {} copy.json", "└─".dimmed());

    Ok(())
}

fn cmd_fetch(
    selector: &str,
    lang: &str,
    base_url: &str,
    endpoint: &str,
    timeout: u64,
    format: Format,
    args: &RenderArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let language = Language::parse(lang)?;
    let config = ServiceConfig::new(base_url)
        .with_endpoint(endpoint)
        .with_timeout(Duration::from_secs(timeout))
        .with_default_language(language.clone());

    log::debug!("fetching {} ({}) from {}", selector, language, config.endpoint_url());
    let client = TextClient::new(&config)?;
    let service = TextService::with_config(client, &config);

    let rt = tokio::runtime::Runtime::new()?;
    let copy = rt.block_on(service.get(selector, &language));

    if copy.fallback {
        eprintln!(
            "{} could not retrieve {} ({}), showing fallback text",
            "Warning:".yellow().bold(),
            selector,
            language
        );
    }

    let content = render_as(&copy.paragraphs, format, &args.to_options())?;
    emit(&content, None)?;
    Ok(())
}

fn cmd_info(inputs: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", "Copy Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let (stats, bytes) = if inputs.is_empty() {
        println!("{}: <stdin>", "File".bold());
        let raw = read_input(None)?;
        (RenderStats::from_paragraphs(&copydeck::decode(&raw)), raw.len())
    } else {
        for path in inputs {
            println!("{}: {}", "File".bold(), path.display());
        }
        collect_stats(inputs)?
    };
    println!("{}: {}", "Bytes".bold(), bytes);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for (label, value) in info_rows(&stats) {
        println!("{}: {}", label.bold(), value);
    }

    Ok(())
}

/// Decode every file and total their statistics and sizes.
fn collect_stats(inputs: &[PathBuf]) -> io::Result<(RenderStats, usize)> {
    let mut total = RenderStats::new();
    let mut bytes = 0;
    for path in inputs {
        let raw = fs::read_to_string(path)?;
        bytes += raw.len();
        total.merge(&RenderStats::from_paragraphs(&copydeck::decode(&raw)));
    }
    Ok((total, bytes))
}

fn info_rows(stats: &RenderStats) -> Vec<(&'static str, u32)> {
    vec![
        ("Paragraphs", stats.paragraph_count),
        ("Empty paragraphs", stats.empty_paragraph_count),
        ("Fragments", stats.fragment_count()),
        ("Text runs", stats.span_count),
        ("Line breaks", stats.line_break_count),
        ("Asset links", stats.link_count),
        ("Emphasis", stats.emphasis_count),
        ("Words", stats.word_count),
        ("Characters", stats.char_count),
    ]
}

fn cmd_version() {
    println!("{} {}", "copydeck".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Bracket-markup copy decoding tool");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/copydeck".dimmed()
    );
    println!("License: MIT");
}
