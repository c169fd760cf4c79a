//! Headless wrapedit entrypoint: wrap plain text for the terminal.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wrapedit::headless::{read_input, wrap_text};
use wrapedit::EditorConfig;

#[derive(Parser, Debug)]
#[command(
    name = "wrapedit",
    about = "Normalize line breaks and greedily word-wrap text",
    version
)]
struct Cli {
    /// Input file (reads stdin when omitted or `-`)
    file: Option<PathBuf>,

    /// Wrap width in terminal cells (default: WRAPEDIT_COLUMNS or 80)
    #[arg(short, long)]
    columns: Option<usize>,

    /// Print the buffer as stored: manual breaks as CR LF, soft breaks as LF
    #[arg(long)]
    raw: bool,

    /// Print manual/soft break counts to stderr
    #[arg(long)]
    stats: bool,

    /// Normalize breaks without wrapping
    #[arg(long)]
    no_wrap: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wrapedit=warn,wrapedit_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = EditorConfig::from_env();
    let columns = cli.columns.unwrap_or(config.columns);
    let word_wrap = config.word_wrap && !cli.no_wrap;

    let input = read_input(cli.file.as_deref()).with_context(|| match &cli.file {
        Some(path) => format!("failed to read {}", path.display()),
        None => "failed to read stdin".to_string(),
    })?;
    let wrapped = wrap_text(&input, columns, word_wrap);
    tracing::debug!(
        columns,
        word_wrap,
        changed = wrapped.report.content_changed(),
        "wrapped input"
    );

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(wrapped.render(cli.raw).as_bytes())
        .context("failed to write output")?;
    stdout.flush().context("failed to flush output")?;

    if cli.stats {
        eprintln!(
            "lines: {}  manual: {}  soft: {}",
            wrapped.counts.visual_lines(),
            wrapped.counts.manual,
            wrapped.counts.soft
        );
    }
    Ok(())
}
