//! Command-line renderer for cloze deletion cards.
//!
//! Reads note markup containing `((cN::content::hint))` deletions and prints
//! the rendered front or back of one card, or of every card in the note.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Parser;
use clozit::card::render_with_config;
use clozit::cloze::cloze_indices;
use clozit::{ClozeConfig, ConfigBuilder, HtmlText, MemoryCard, RenderReport};
use serde::Serialize;
use tracing::{debug, info, warn};

// ============================================================================
// CLI Arguments
// ============================================================================

/// Render cloze deletion cards from the command line.
#[derive(Parser, Debug)]
#[command(name = "clozit")]
#[command(version, about, long_about = None)]
struct Args {
    /// HTML file containing cloze markup, or "-" for stdin
    input: String,

    /// Card identifier; the trailing number selects the cloze (e.g. "Cloze 2")
    #[arg(long, default_value = "Cloze 1", conflicts_with = "all")]
    card: String,

    /// Render every card the note generates
    #[arg(long, default_value_t = false)]
    all: bool,

    /// Render the answer side
    #[arg(long, default_value_t = false)]
    back: bool,

    /// TOML file with cloze settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Setting override as name=value (e.g. cloze-show-before=1), repeatable
    #[arg(long = "attr", value_parser = parse_attr)]
    attrs: Vec<(String, String)>,

    /// HTML file whose markers are always revealed, repeatable
    #[arg(long)]
    uncloze: Vec<PathBuf>,

    /// Output format: text (default) or json
    #[arg(long, default_value = "text")]
    format: Format,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Format {
    /// Rendered markup only
    #[default]
    Text,
    /// One JSON object per card
    Json,
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => Err(format!("Invalid format: {}. Use 'text' or 'json'", s)),
        }
    }
}

fn parse_attr(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("Invalid attribute: {}. Use name=value", s))?;
    Ok((name.trim().to_string(), value.to_string()))
}

// ============================================================================
// Rendering
// ============================================================================

#[derive(Debug, Serialize)]
struct CardOutput {
    card: String,
    side: &'static str,
    html: String,
    uncloze: Vec<String>,
    #[serde(flatten)]
    report: RenderReport,
}

fn read_input(input: &str) -> std::io::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input)
    }
}

fn load_config(path: Option<&Path>, attrs: &[(String, String)]) -> clozit::Result<ClozeConfig> {
    let mut builder = match path {
        Some(path) => ConfigBuilder::from_file(path)?,
        None => ConfigBuilder::default(),
    };
    for (name, value) in attrs {
        // Accept bare setting names as well as cloze-/data-cloze- prefixed ones.
        let applied = builder.apply_attribute(name, value)
            || builder.apply_attribute(&format!("cloze-{}", name), value);
        if !applied {
            warn!(attribute = %name, "unknown cloze setting");
        }
    }
    builder.build()
}

fn render_one(
    config: &ClozeConfig,
    card_id: &str,
    back: bool,
    source: &str,
    regions: &[String],
) -> clozit::Result<CardOutput> {
    let mut card = regions
        .iter()
        .fold(MemoryCard::new(card_id, source).back(back), |card, html| {
            card.region(html.as_str())
        });
    let report = render_with_config(&mut card, config, &HtmlText)?;
    Ok(CardOutput {
        card: card_id.to_string(),
        side: if back { "back" } else { "front" },
        html: card.cloze().to_string(),
        uncloze: card.regions().to_vec(),
        report,
    })
}

fn print_card(output: &CardOutput, format: Format, header: bool) -> Result<(), serde_json::Error> {
    match format {
        Format::Text => {
            if header {
                println!("==> {} ({}) <==", output.card, output.side);
            }
            println!("{}", output.html);
            for region in &output.uncloze {
                println!("{}", region);
            }
        }
        Format::Json => println!("{}", serde_json::to_string(output)?),
    }
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Initialize tracing
    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(args.config.as_deref(), &args.attrs)?;
    debug!(?config, "loaded cloze settings");

    let source = read_input(&args.input)?;
    let regions = args
        .uncloze
        .iter()
        .map(std::fs::read_to_string)
        .collect::<Result<Vec<_>, _>>()?;

    let cards: Vec<String> = if args.all {
        let indices = cloze_indices(&source);
        if indices.is_empty() {
            warn!(input = %args.input, "no cloze deletions found");
        }
        indices.into_iter().map(|n| format!("Cloze {}", n)).collect()
    } else {
        vec![args.card.clone()]
    };

    info!(
        input = %args.input,
        cards = cards.len(),
        back = args.back,
        format = ?args.format,
        "Rendering cloze cards"
    );

    for card_id in &cards {
        let output = render_one(&config, card_id, args.back, &source, &regions)?;
        print_card(&output, args.format, args.all)?;
    }

    Ok(())
}
