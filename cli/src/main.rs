pub mod cli;

use clap::Parser;

use cli::*;
use common::logger::{TraceId, annotate_selection, child_span, init_logger, root_span};
use comparison::config::AppConfig;
use comparison::{METRIC_DEFINITIONS, rank_with_bands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = AppConfig::from_env()?;

    init_logger("corridor-compare", cfg.json_logs);

    let trace_id = TraceId::default();
    let span = root_span("compare", &trace_id);
    let _guard = span.enter();

    let set = load_selection(&cli)?;
    annotate_selection(&set.ids());

    match &cli.command {
        Command::Rank { json } => {
            let _rank = child_span("rank").entered();
            let result = rank_with_bands(&set, &METRIC_DEFINITIONS, &cfg.bands)?;

            if *json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print!("{}", render_ranking(&result));
            }
        }

        Command::Export { out_dir } => {
            let _export = child_span("export").entered();
            let dir = out_dir.clone().unwrap_or_else(|| cfg.export_dir.clone());
            let path = write_export(&set, &dir)?;

            tracing::info!(path = %path.display(), "comparison exported");
            println!("{}", path.display());
        }
    }

    Ok(())
}
