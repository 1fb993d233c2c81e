//! sizetag CLI - font-size based PDF structure tagging

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;

use sizetag::{
    load_file_with_options, Classification, ClassifyOptions, HeadingOrder, JsonFormat, LineJoin,
    PageSelection, ParseOptions, RenderOptions,
};

#[derive(Parser)]
#[command(name = "sizetag")]
#[command(version)]
#[command(about = "Tag PDF headings and paragraphs by font size", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print tagged elements, one per line
    Tags {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Convert to plain text
    Text {
        #[command(flatten)]
        common: CommonArgs,

        /// Join lines with a space instead of gluing them together
        #[arg(long)]
        space_lines: bool,

        /// Keep non-ASCII characters
        #[arg(long)]
        keep_unicode: bool,

        /// Fold accented letters to their ASCII base
        #[arg(long)]
        fold_diacritics: bool,
    },

    /// Convert to Markdown
    #[command(alias = "md")]
    Markdown {
        #[command(flatten)]
        common: CommonArgs,

        /// Maximum heading level (1-6)
        #[arg(long, default_value = "6")]
        max_heading: u8,
    },

    /// Convert the classification to JSON
    Json {
        #[command(flatten)]
        common: CommonArgs,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show the font size frequency table and size-to-tag map
    Fonts {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Args)]
struct CommonArgs {
    /// Input PDF or JSON span dump
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Count styles by size, flags, font and color
    #[arg(long)]
    granular: bool,

    /// Drop sub-paragraph elements
    #[arg(long)]
    no_sub: bool,

    /// Number headings from the largest size down
    #[arg(long)]
    largest_first: bool,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long, env = "SIZETAG_PAGES")]
    pages: Option<String>,

    /// Fail on the first unreadable page instead of skipping it
    #[arg(long)]
    strict: bool,
}

impl CommonArgs {
    fn parse_options(&self) -> Result<ParseOptions, Box<dyn std::error::Error>> {
        let pages = match self.pages.as_deref() {
            Some(p) => p
                .parse::<PageSelection>()
                .map_err(|e| format!("Invalid page range: {}", e))?,
            None => PageSelection::All,
        };

        let mut options = ParseOptions::new().with_pages(pages);
        if !self.strict {
            options = options.lenient();
        }
        Ok(options)
    }

    fn classify_options(&self) -> ClassifyOptions {
        let mut options = ClassifyOptions::new();
        if self.granular {
            options = options.granular();
        }
        if self.largest_first {
            options = options.with_heading_order(HeadingOrder::FromLargest);
        }
        if self.no_sub {
            options = options.headings_and_paragraphs_only();
        }
        options
    }

    fn classify(&self) -> Result<Classification, Box<dyn std::error::Error>> {
        let doc = load_file_with_options(&self.input, self.parse_options()?)?;
        log::info!("{}: {} pages, {} spans", doc.name(), doc.page_count(), doc.span_count());
        Ok(sizetag::classify(&doc, &self.classify_options())?)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Tags { common } => cmd_tags(&common),
        Commands::Text {
            common,
            space_lines,
            keep_unicode,
            fold_diacritics,
        } => cmd_text(&common, space_lines, keep_unicode, fold_diacritics),
        Commands::Markdown {
            common,
            max_heading,
        } => cmd_markdown(&common, max_heading),
        Commands::Json { common, compact } => cmd_json(&common, compact),
        Commands::Fonts { common } => cmd_fonts(&common),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_tags(common: &CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    let classification = common.classify()?;
    let lines = sizetag::render::to_tagged(&classification.elements);
    write_output(common.output.as_deref(), &lines.join("\n"))
}

fn cmd_text(
    common: &CommonArgs,
    space_lines: bool,
    keep_unicode: bool,
    fold_diacritics: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let classification = common.classify()?;

    let line_join = if space_lines {
        LineJoin::Space
    } else {
        LineJoin::Remove
    };
    let render_options = RenderOptions::new()
        .with_line_join(line_join)
        .with_ascii_only(!keep_unicode)
        .with_fold_diacritics(fold_diacritics);

    let text = sizetag::render::to_text(&classification.elements, &render_options)?;
    write_output(common.output.as_deref(), &text)
}

fn cmd_markdown(common: &CommonArgs, max_heading: u8) -> Result<(), Box<dyn std::error::Error>> {
    let classification = common.classify()?;

    let render_options = RenderOptions::new()
        .with_line_join(LineJoin::Space)
        .with_max_heading(max_heading);

    let markdown = sizetag::render::to_markdown(&classification.elements, &render_options);
    write_output(common.output.as_deref(), &markdown)
}

fn cmd_json(common: &CommonArgs, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let classification = common.classify()?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = sizetag::render::to_json(&classification, format)?;
    write_output(common.output.as_deref(), &json)
}

fn cmd_fonts(common: &CommonArgs) -> Result<(), Box<dyn std::error::Error>> {
    let classification = common.classify()?;
    if common.output.is_some() {
        colored::control::set_override(false);
    }
    let report = fonts_report(&classification)?;
    write_output(common.output.as_deref(), report.trim_end())
}

fn fonts_report(classification: &Classification) -> Result<String, std::fmt::Error> {
    let table = &classification.frequencies;
    let mut out = String::new();

    writeln!(out, "{}", "Style Frequencies".cyan().bold())?;
    writeln!(out, "{}", "─".repeat(40).dimmed())?;
    writeln!(out, "{}: {}", "Document".bold(), table.document())?;
    writeln!(out, "{}: {}", "Spans".bold(), table.total())?;

    for row in table.counts() {
        let tag = classification
            .tags
            .get(row.key.size())
            .map(|t| t.name())
            .unwrap_or_default();
        writeln!(
            out,
            "  {:>8}  {:>6}  {:<4} {}",
            row.key.size().to_string(),
            row.count,
            tag.yellow(),
            row.style.font.dimmed()
        )?;
    }

    writeln!(out)?;
    writeln!(out, "{}", "Size Tags".cyan().bold())?;
    writeln!(out, "{}", "─".repeat(40).dimmed())?;
    for entry in classification.tags.entries() {
        writeln!(out, "  {:>8}  {}", entry.size, entry.tag.name().green())?;
    }

    writeln!(
        out,
        "\n{}: {}",
        "Paragraph size".bold(),
        classification.tags.paragraph_size()
    )?;

    Ok(out)
}
