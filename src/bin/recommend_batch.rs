// Batch recommendation over a measurements CSV
//
// Usage: cargo run --features cli --bin recommend_batch -- <measurements.csv> [artifact_dir]
// Prints one JSON decision per row to stdout; ARTIFACT_DIR is used when no
// directory argument is given.

use anyhow::{bail, Context, Result};
use crop_recommender::batch::load_measurements;
use crop_recommender::config::DEFAULT_LOG_FILTER;
use crop_recommender::{RecommendationEngine, ServiceConfig};
use std::collections::BTreeMap;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let Some(csv_path) = args.next().map(PathBuf::from) else {
        bail!("usage: recommend_batch <measurements.csv> [artifact_dir]");
    };
    let artifact_dir = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| ServiceConfig::from_env().artifact_dir);

    let engine = RecommendationEngine::load(&artifact_dir)
        .with_context(|| format!("Failed to load artifacts from {:?}", artifact_dir))?;

    let rows = load_measurements(&csv_path)?;
    tracing::info!("Loaded {} rows from {:?}", rows.len(), csv_path);

    // Invalid rows are reported but do not stop the batch
    let mut vectors = Vec::with_capacity(rows.len());
    let mut row_index = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        match row {
            Ok(v) => {
                vectors.push(v);
                row_index.push(idx);
            }
            Err(e) => tracing::warn!("Row {}: {}", idx + 1, e),
        }
    }

    let decisions = engine.recommend_batch(&vectors);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut tally: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, result) in row_index.into_iter().zip(decisions) {
        match result {
            Ok(decision) => {
                let key = decision
                    .crop_name
                    .clone()
                    .unwrap_or_else(|| "(undetermined)".to_string());
                *tally.entry(key).or_default() += 1;
                let line = serde_json::json!({ "row": idx + 1, "decision": decision });
                writeln!(out, "{}", line)?;
            }
            Err(e) => tracing::error!("Row {}: {}", idx + 1, e),
        }
    }
    out.flush()?;

    tracing::info!("Recommendations by crop:");
    for (crop, count) in &tally {
        tracing::info!("  {}: {}", crop, count);
    }

    Ok(())
}
