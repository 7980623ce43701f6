use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use comparison::metrics::MetricKey;
use comparison::source::{self, CorridorDetailData, CorridorFilter};
use comparison::{ComparisonSet, RankingResult, selection, to_csv};

#[derive(Debug, Parser)]
#[clap(name = "corridor-compare", version)]
pub struct Cli {
    /// JSON array of corridor detail payloads, as returned by the corridor API
    #[clap(long)]
    pub input: PathBuf,

    /// Corridors to compare, in display order (comma-separated, max 4)
    #[clap(long)]
    pub ids: String,

    /// Derive health scores the payload left out instead of rejecting it
    #[clap(long)]
    pub derive_health: bool,

    /// Drop corridors below this success rate (%) before selection
    #[clap(long)]
    pub min_success: Option<f64>,

    /// Drop corridors above this success rate (%) before selection
    #[clap(long)]
    pub max_success: Option<f64>,

    /// Drop corridors below this volume (USD) before selection
    #[clap(long)]
    pub min_volume: Option<f64>,

    /// Drop corridors above this volume (USD) before selection
    #[clap(long)]
    pub max_volume: Option<f64>,

    /// Keep only corridors whose source or destination asset contains this code
    #[clap(long)]
    pub asset: Option<String>,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print best/worst indicators per metric
    Rank {
        /// Emit the ranking as JSON instead of tables
        #[clap(long)]
        json: bool,
    },

    /// Write the comparison as CSV
    Export {
        /// Target directory; defaults to CORRIDOR_EXPORT_DIR or "."
        #[clap(long)]
        out_dir: Option<PathBuf>,
    },
}

impl Cli {
    pub(crate) fn filter(&self) -> CorridorFilter {
        CorridorFilter {
            success_rate_min: self.min_success,
            success_rate_max: self.max_success,
            volume_min: self.min_volume,
            volume_max: self.max_volume,
            asset_code: self.asset.clone(),
        }
    }
}

/// Read the payload file and resolve the `--ids` selection against it.
pub(crate) fn load_selection(cli: &Cli) -> anyhow::Result<ComparisonSet> {
    let raw = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let mut details = source::parse_payload(&raw)?;

    let filter = cli.filter();
    if !filter.is_empty() {
        details.retain(|d| filter.matches(&d.corridor));
    }

    if cli.derive_health {
        derive_missing_health(&mut details);
    }

    let fetched = source::snapshots_from_payload(&details)?;
    let ids = selection::parse_ids(&cli.ids)?;
    let set = selection::resolve(&ids, &fetched)
        .with_context(|| format!("resolving selection {}", selection::format_ids(&ids)))?;

    Ok(set)
}

fn derive_missing_health(details: &mut [CorridorDetailData]) {
    let derived = details
        .iter_mut()
        .map(|d| d.corridor.fill_derived_health())
        .filter(|&derived| derived)
        .count();

    if derived > 0 {
        tracing::warn!(derived, "health scores derived locally");
    }
}

/// One block per metric: heading, then a line per corridor in display order.
pub(crate) fn render_ranking(result: &RankingResult) -> String {
    let mut out = String::new();

    for m in result.iter() {
        let _ = writeln!(out, "{}", heading(m.metric));

        for s in &m.per_corridor {
            let marker = if s.corridor_id == m.best_id {
                " *"
            } else {
                ""
            };
            let _ = writeln!(
                out,
                "  {:<16} {:>16.2}  {:<14} [{}]{}",
                s.corridor_id,
                s.value,
                s.classification.label(),
                s.classification.icon(),
                marker
            );
        }
        out.push('\n');
    }

    let wins = result
        .wins()
        .into_iter()
        .map(|(id, n)| format!("{id}={n}"))
        .collect::<Vec<_>>()
        .join(" ");
    let _ = writeln!(out, "best-in-metric counts: {wins}");

    out
}

fn heading(metric: MetricKey) -> String {
    let def = metric.definition();
    format!("{} ({})", def.heading(), metric)
}

/// Write the CSV export into `dir`, returning the written path.
pub(crate) fn write_export(set: &ComparisonSet, dir: &Path) -> anyhow::Result<PathBuf> {
    let export = to_csv(set)?;

    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(&export.filename);
    fs::write(&path, export.content).with_context(|| format!("writing {}", path.display()))?;

    Ok(path)
}
