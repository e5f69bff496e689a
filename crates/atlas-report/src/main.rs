//! Command-line presentation router: renders warming-atlas views from the
//! pre-generated report artifacts. Reads only; never writes to disk.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use atlas_core::View;
use atlas_report::config::resolve_paths;
use atlas_report::render::{render_views, Format};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "atlas-report", about = "Render warming-atlas report views from pre-generated artifacts")]
struct Args {
    /// Reporting root containing the reports/ directory.
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// JSON file overriding artifact locations (any subset of root, projections, clustering, figures_dir).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// View to render: overview, dataset, trends, geography, projections, risk, clustering.
    #[arg(short, long, default_value = "overview")]
    view: View,

    /// Render every view in navigation order.
    #[arg(long)]
    all: bool,

    /// Country to look up in the clustering view.
    #[arg(long)]
    country: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let paths = resolve_paths(&args.root, args.config.as_deref())?;
    let views: Vec<View> = if args.all { View::ALL.to_vec() } else { vec![args.view] };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let failed = render_views(&views, args.country.as_deref(), &paths, args.format, &mut out)?;
    out.flush()?;

    if !failed.is_empty() {
        let names: Vec<&str> = failed.iter().map(|v| v.slug()).collect();
        bail!("{} view(s) failed to render: {}", failed.len(), names.join(", "));
    }
    Ok(())
}
