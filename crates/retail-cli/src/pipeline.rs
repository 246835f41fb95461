//! Stage functions shared by the `run` and `clean` commands.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::{error, info, info_span, warn};

use retail_core::{BatchEntry, CleanedFrame, ReferenceKeys, clean_batch, clean_entity};
use retail_ingest::{SourceSpec, extract, spec_for_file};
use retail_load::Warehouse;
use retail_model::Entity;

#[derive(Debug, Default)]
pub struct ExtractResult {
    pub frames: BTreeMap<Entity, DataFrame>,
    pub errors: BTreeMap<Entity, String>,
}

/// Extract every configured source; failures are collected per entity.
pub fn extract_all(specs: &BTreeMap<Entity, SourceSpec>) -> ExtractResult {
    let mut result = ExtractResult::default();
    for (entity, spec) in specs {
        match extract(spec) {
            Ok(frame) => {
                result.frames.insert(*entity, frame);
            }
            Err(source) => {
                let message = format!("{:#}", anyhow::Error::new(source));
                error!(entity = %entity, error = %message, "extract failed");
                result.errors.insert(*entity, message);
            }
        }
    }
    result
}

pub fn clean_all(frames: &BTreeMap<Entity, DataFrame>) -> Vec<BatchEntry> {
    let span = info_span!("clean_batch", entities = frames.len());
    let start = Instant::now();
    let entries = span.in_scope(|| clean_batch(frames));
    info!(
        entities = entries.len(),
        failed = entries.iter().filter(|entry| entry.result.is_err()).count(),
        duration_ms = start.elapsed().as_millis(),
        "clean complete"
    );
    entries
}

/// Load cleaned frames in the order given; returns rows loaded per entity.
///
/// `failed` holds the entities that already failed to resolve, extract or
/// clean in this run. Orders are skipped when any dimension failed at any
/// stage, so they never load against a previous run's dimension rows.
pub fn load_all(
    warehouse: &mut Warehouse,
    cleaned: &[&CleanedFrame],
    failed: &BTreeSet<Entity>,
) -> BTreeMap<Entity, Result<usize>> {
    let mut loaded = BTreeMap::new();
    let mut failed_dimensions: Vec<Entity> = failed
        .iter()
        .copied()
        .filter(|entity| entity.is_dimension())
        .collect();
    for item in cleaned {
        let entity = item.frame.entity;
        if entity == Entity::Orders && !failed_dimensions.is_empty() {
            let names: Vec<&str> = failed_dimensions.iter().map(|dimension| dimension.name()).collect();
            warn!(dimensions = %names.join(", "), "skipping orders load");
            loaded.insert(
                entity,
                Err(anyhow::anyhow!(
                    "skipped: dimension {} failed",
                    names.join(", ")
                )),
            );
            continue;
        }
        let result = warehouse
            .load(&item.frame)
            .with_context(|| format!("load {}", item.frame.table_name()));
        if let Err(error) = &result {
            let message = format!("{error:#}");
            error!(entity = %entity, error = %message, "load failed");
            if entity.is_dimension() {
                failed_dimensions.push(entity);
            }
        }
        loaded.insert(entity, result);
    }
    loaded
}

/// Extract and clean one CSV or JSON file as `entity`, without orphan filtering.
pub fn clean_file(entity: Entity, input: &str) -> Result<CleanedFrame> {
    let spec = spec_for_file(input).with_context(|| format!("source {input}"))?;
    let raw = extract(&spec).with_context(|| format!("extract {input}"))?;
    clean_entity(entity, &raw, &ReferenceKeys::new()).with_context(|| format!("clean {input}"))
}

pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(file)
        .include_header(true)
        .finish(df)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
