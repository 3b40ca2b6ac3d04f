use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use edf_model::{TableOutcome, Verdict};

use crate::commands::ValidateResult;

pub fn print_summary(result: &ValidateResult) {
    if let Some(path) = &result.report {
        println!("Report: {}", path.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("EDF file"),
        header_cell("Verdict"),
        header_cell("Global"),
        header_cell("Channels"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);

    let mut total_global = 0usize;
    let mut total_channels = 0usize;
    let mut non_compliant = 0usize;
    for file in &result.files {
        total_global += file.global.count().unwrap_or(0);
        total_channels += file.channels.count().unwrap_or(0);
        if file.verdict() != Verdict::Compliant {
            non_compliant += 1;
        }
        table.add_row(vec![
            Cell::new(&file.source),
            verdict_cell(file.verdict()),
            count_cell(&file.global, Color::Red),
            count_cell(&file.channels, Color::Red),
        ]);
    }
    table.add_row(vec![
        Cell::new(format!("TOTAL ({} files)", result.files.len()))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{non_compliant} failing")).add_attribute(Attribute::Bold),
        Cell::new(total_global).add_attribute(Attribute::Bold),
        Cell::new(total_channels).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    if !result.failures.is_empty() {
        println!("Skipped inputs: {}", result.failures.len());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(120);
    if table.column_count() >= 4 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Percentage(60)),
            ColumnConstraint::LowerBoundary(Width::Fixed(15)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn verdict_cell(verdict: Verdict) -> Cell {
    let cell = Cell::new(verdict.label());
    match verdict {
        Verdict::Compliant => cell.fg(Color::Green).add_attribute(Attribute::Bold),
        Verdict::NonCompliant => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        Verdict::Incomplete => cell.fg(Color::Yellow),
    }
}

fn count_cell(outcome: &TableOutcome, color: Color) -> Cell {
    match outcome.count() {
        Some(value) if value > 0 => Cell::new(value).fg(color).add_attribute(Attribute::Bold),
        Some(value) => dim_cell(value),
        None => dim_cell("n/a"),
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
