use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use retail_cli::logging::redact_value;
use retail_model::{CleaningReport, EntitySchema, referenced_table};

use crate::types::{EntitySummary, RunResult};

pub fn print_run_summary(result: &RunResult) {
    if result.dry_run {
        println!("Dry run: warehouse not modified");
    } else {
        println!("Warehouse: {}", result.warehouse.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Table"),
        header_cell("Input"),
        header_cell("Kept"),
        header_cell("Dropped"),
        header_cell("Loaded"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let mut total_input = 0usize;
    let mut total_kept = 0usize;
    let mut total_dropped = 0usize;
    let mut total_loaded = 0usize;
    for summary in &result.entities {
        let report = summary.report.as_ref();
        total_input += report.map_or(0, |report| report.input_rows);
        total_kept += report.map_or(0, |report| report.output_rows);
        total_dropped += report.map_or(0, CleaningReport::dropped);
        total_loaded += summary.loaded.unwrap_or(0);
        table.add_row(vec![
            entity_cell(summary),
            Cell::new(summary.table),
            optional_cell(report.map(|report| report.input_rows)),
            optional_cell(report.map(|report| report.output_rows)),
            count_cell(report.map(CleaningReport::dropped), Color::Yellow),
            optional_cell(summary.loaded),
            status_cell(summary, result.dry_run),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_input).add_attribute(Attribute::Bold),
        Cell::new(total_kept).add_attribute(Attribute::Bold),
        count_cell(Some(total_dropped), Color::Yellow).add_attribute(Attribute::Bold),
        Cell::new(total_loaded).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    let reports: Vec<&CleaningReport> = result
        .entities
        .iter()
        .filter_map(|summary| summary.report.as_ref())
        .collect();
    print_rejection_table(&reports);

    for summary in result.entities.iter().filter(|summary| summary.table_dropped) {
        println!(
            "Note: {} was dropped because its dimensions were reloaded; rerun with --entity {} to restore it",
            summary.table,
            summary.entity
        );
    }

    let failures: Vec<&EntitySummary> = result
        .entities
        .iter()
        .filter(|summary| summary.error.is_some())
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for summary in failures {
            eprintln!(
                "- {}: {}",
                summary.entity,
                summary.error.as_deref().unwrap_or_default()
            );
        }
    }
}

pub fn print_clean_summary(report: &CleaningReport) {
    println!(
        "{}: {} input rows, {} kept, {} dropped",
        report.entity,
        report.input_rows,
        report.output_rows,
        report.dropped()
    );
    print_rejection_table(&[report]);
}

fn print_rejection_table(reports: &[&CleaningReport]) {
    if reports.iter().all(|report| report.is_clean()) {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Entity"),
        header_cell("Rule"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Description"),
        header_cell("Examples"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    for report in reports {
        let mut tallies: Vec<_> = report.rejections.iter().collect();
        tallies.sort_by(|a, b| b.count.cmp(&a.count).then(a.reason.cmp(&b.reason)));
        for tally in tallies {
            let examples: Vec<&str> = tally
                .samples
                .iter()
                .map(|sample| redact_value(sample))
                .collect();
            table.add_row(vec![
                Cell::new(report.entity)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(tally.reason.code()),
                Cell::new(tally.column.as_deref().unwrap_or("-")),
                Cell::new(tally.count).fg(Color::Yellow),
                Cell::new(tally.reason.description()),
                example_cell(&examples),
            ]);
        }
    }
    println!();
    println!("Rejections:");
    println!("{table}");
}

pub fn print_schema_table(schemas: &[&EntitySchema]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Null"),
        header_cell("Key"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for schema in schemas {
        for column in schema.columns {
            let mut keys = Vec::new();
            if schema.primary_key == Some(column.name) {
                keys.push("PK".to_string());
            }
            for key in schema.foreign_keys.iter().filter(|key| key.column == column.name) {
                keys.push(format!("FK -> {}", referenced_table(key)));
            }
            let key_cell = if keys.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(keys.join(", ")).fg(Color::Green)
            };
            table.add_row(vec![
                Cell::new(schema.table_name)
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                Cell::new(column.name),
                Cell::new(column.sql_type),
                if column.nullable {
                    Cell::new("yes")
                } else {
                    dim_cell("no")
                },
                key_cell,
            ]);
        }
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn entity_cell(summary: &EntitySummary) -> Cell {
    Cell::new(summary.entity)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn status_cell(summary: &EntitySummary, dry_run: bool) -> Cell {
    match (&summary.error, summary.loaded) {
        (Some(_), _) => Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        (None, Some(_)) => Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold),
        (None, None) if summary.table_dropped => Cell::new("DROPPED")
            .fg(Color::Yellow)
            .add_attribute(Attribute::Bold),
        (None, None) if dry_run => dim_cell("cleaned"),
        (None, None) => dim_cell("-"),
    }
}

fn optional_cell(value: Option<usize>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn count_cell(count: Option<usize>, color: Color) -> Cell {
    match count {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("-"),
    }
}

fn example_cell(examples: &[&str]) -> Cell {
    if examples.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(examples.join(", "))
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
