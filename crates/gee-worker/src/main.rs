//! Frame retrieval worker binary.
//!
//! ```text
//! gee-worker extract <shot-id> <offset> [<shot-id> <offset> ...]
//! gee-worker shots
//! gee-worker person-shots <query-id>
//! ```
//!
//! Results are printed to stdout as JSON.

use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use gee_media::{HogConfig, HogPeopleDetector, OpenCvFrameDecoder};
use gee_storage::LocalImageStore;
use gee_store::{MetadataCatalog, RedisStore};
use gee_worker::cli::{parse_pairs, Cli, Command};
use gee_worker::{init_tracing, BatchRequest, RetrievalPipeline, WorkerConfig};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    init_tracing();

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);

    let store = RedisStore::new(&config.redis_url).context("Failed to create metadata store")?;
    let catalog = MetadataCatalog::new(Arc::new(store));

    match cli.command {
        Command::Extract { pairs } => {
            let requests = parse_pairs(&pairs).map_err(|e| anyhow!(e))?;
            extract(&config, catalog, &requests)
        }
        Command::Shots => print_json(&catalog.list_video_shots()?),
        Command::PersonShots { query_id } => print_json(&catalog.search_person_shots(&query_id)?),
    }
}

fn extract(
    config: &WorkerConfig,
    catalog: MetadataCatalog,
    requests: &[BatchRequest],
) -> anyhow::Result<()> {
    let detector =
        HogPeopleDetector::new(HogConfig::default()).context("Failed to create people detector")?;
    let pipeline = RetrievalPipeline::new(
        catalog,
        Arc::new(OpenCvFrameDecoder::new()),
        Arc::new(detector),
        Arc::new(LocalImageStore::new(&config.output_dir)),
        config,
    );

    if let [request] = requests {
        let report = pipeline.locate_and_extract(&request.shot_id, request.frame_offset)?;
        return print_json(&report);
    }

    let outcomes = pipeline.extract_batch(requests, config.max_parallel)?;
    print_json(&outcomes)
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
