use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span};

use retail_cli::config::{DEFAULT_CONFIG_FILE, EtlConfig};
use retail_cli::pipeline::{ExtractResult, clean_all, clean_file, extract_all, load_all, write_csv};
use retail_core::CleanedFrame;
use retail_load::{Warehouse, create_table_template};
use retail_model::{Entity, schema_for, schemas_in_load_order};

use crate::cli::{CleanArgs, RunArgs, SchemaArgs};
use crate::summary::{print_clean_summary, print_schema_table};
use crate::types::{EntitySummary, RunResult};

fn summary_mut(
    summaries: &mut BTreeMap<Entity, EntitySummary>,
    entity: Entity,
) -> &mut EntitySummary {
    summaries
        .entry(entity)
        .or_insert_with(|| EntitySummary::new(entity))
}

pub fn run_etl(args: &RunArgs) -> Result<RunResult> {
    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = EtlConfig::load(&config_path)?;
    let run_span = info_span!("run", config = %config_path.display(), dry_run = args.dry_run);
    let _run_guard = run_span.enter();

    // =========================================================================
    // Stage 1: Resolve sources for the selected entities
    // =========================================================================
    let configured = config.entities()?;
    let selected: Vec<Entity> = if args.entities.is_empty() {
        configured.keys().copied().collect()
    } else {
        Entity::in_load_order(&args.entities)
    };
    let mut summaries: BTreeMap<Entity, EntitySummary> = BTreeMap::new();
    let mut specs = BTreeMap::new();
    for entity in &selected {
        let summary = summary_mut(&mut summaries, *entity);
        match configured.get(entity) {
            Some(source) => match source.to_spec() {
                Ok(spec) => {
                    specs.insert(*entity, spec);
                }
                Err(error) => summary.error = Some(format!("{error:#}")),
            },
            None => summary.error = Some("no source configured".to_string()),
        }
    }

    // =========================================================================
    // Stage 2: Extract raw frames
    // =========================================================================
    let extract_start = Instant::now();
    let ExtractResult { frames, errors } = extract_all(&specs);
    info!(
        sources = specs.len(),
        extracted = frames.len(),
        duration_ms = extract_start.elapsed().as_millis(),
        "extract stage complete"
    );
    for (entity, message) in errors {
        summary_mut(&mut summaries, entity).error = Some(message);
    }

    // =========================================================================
    // Stage 3: Clean, dimensions first so orders are filtered by their keys
    // =========================================================================
    let mut cleaned: Vec<CleanedFrame> = Vec::new();
    for entry in clean_all(&frames) {
        let summary = summary_mut(&mut summaries, entry.entity);
        match entry.result {
            Ok(frame) => {
                summary.report = Some(frame.report.clone());
                cleaned.push(frame);
            }
            Err(error) => summary.error = Some(format!("{:#}", anyhow::Error::new(error))),
        }
    }

    // =========================================================================
    // Stage 4: Load
    // =========================================================================
    if !args.dry_run && !cleaned.is_empty() {
        let load_start = Instant::now();
        let mut warehouse = Warehouse::open(&config.warehouse.path)
            .with_context(|| format!("open warehouse {}", config.warehouse.path.display()))?;
        let entities: Vec<Entity> = cleaned.iter().map(|item| item.frame.entity).collect();
        let dropped = warehouse
            .reset_for(&entities)
            .context("reset warehouse tables")?;
        for entity in dropped.into_iter().filter(|entity| !entities.contains(entity)) {
            summary_mut(&mut summaries, entity).table_dropped = true;
        }
        let failed: BTreeSet<Entity> = summaries
            .values()
            .filter(|summary| summary.error.is_some())
            .map(|summary| summary.entity)
            .collect();
        let items: Vec<&CleanedFrame> = cleaned.iter().collect();
        for (entity, result) in load_all(&mut warehouse, &items, &failed) {
            let summary = summary_mut(&mut summaries, entity);
            match result {
                Ok(rows) => summary.loaded = Some(rows),
                Err(error) => summary.error = Some(format!("{error:#}")),
            }
        }
        info!(
            tables = items.len(),
            duration_ms = load_start.elapsed().as_millis(),
            "load stage complete"
        );
    }

    let mut entities: Vec<EntitySummary> = summaries.into_values().collect();
    entities.sort_by_key(|summary| summary.entity.load_rank());
    let has_errors = entities.iter().any(|summary| summary.error.is_some());
    Ok(RunResult {
        warehouse: config.warehouse.path,
        dry_run: args.dry_run,
        entities,
        has_errors,
    })
}

pub fn run_clean(args: &CleanArgs) -> Result<()> {
    let mut cleaned = clean_file(args.entity, &args.input)?;
    if let Some(path) = &args.output {
        write_csv(&mut cleaned.frame.data, path)?;
        println!("Wrote {} rows to {}", cleaned.frame.record_count(), path.display());
    }
    print_clean_summary(&cleaned.report);
    Ok(())
}

pub fn run_schema(args: &SchemaArgs) -> Result<()> {
    let schemas: Vec<_> = match args.entity {
        Some(entity) => vec![schema_for(entity)],
        None => schemas_in_load_order().collect(),
    };
    if args.ddl {
        for schema in schemas {
            println!("{};\n", create_table_template(schema));
        }
    } else {
        print_schema_table(&schemas);
    }
    Ok(())
}
