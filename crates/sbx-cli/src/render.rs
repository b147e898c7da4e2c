//! Terminal tables for catalogue entries, matrices, S-boxes and metrics.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sbx_model::{ArtifactSummary, BinaryMatrix, ImageMetrics, MetricSet};
use sbx_workflow::TableRendering;

pub fn catalogue_table(entries: &[ArtifactSummary]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Author"),
        header_cell("Status"),
        header_cell("Tags"),
        header_cell("Matrix"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 5, CellAlignment::Center);

    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.id).add_attribute(Attribute::Bold),
            Cell::new(&entry.name),
            optional_cell(entry.author.as_deref()),
            status_cell(&entry.status),
            Cell::new(entry.tags.join(", ")),
            if entry.has_matrix {
                Cell::new("✓").fg(Color::Green)
            } else {
                dim_cell("-")
            },
        ]);
    }
    table
}

/// A binary matrix with 0-based row and column indices.
pub fn matrix_table(matrix: &BinaryMatrix) -> Table {
    let mut table = Table::new();
    let mut header = vec![dim_cell("")];
    header.extend((0..matrix.order()).map(|c| header_cell(&c.to_string())));
    table.set_header(header);
    apply_grid_style(&mut table);

    for (r, row) in matrix.rows().iter().enumerate() {
        let mut cells = vec![header_cell(&r.to_string())];
        cells.extend(row.iter().map(|bit| {
            if *bit == 1 {
                Cell::new(bit).add_attribute(Attribute::Bold)
            } else {
                dim_cell(bit)
            }
        }));
        table.add_row(cells);
    }
    table
}

/// An S-box as a view rendered it.
pub fn sbox_table(rendering: &TableRendering) -> Table {
    let mut table = Table::new();
    let mut header = vec![dim_cell("")];
    header.extend(rendering.column_headers.iter().map(|c| header_cell(c)));
    table.set_header(header);
    apply_grid_style(&mut table);

    for (label, values) in &rendering.rows {
        let mut cells = vec![header_cell(label)];
        cells.extend(values.iter().map(Cell::new));
        table.add_row(cells);
    }
    table
}

pub fn metrics_table(metrics: &MetricSet) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Metric"),
        header_cell("Description"),
        header_cell("Value"),
    ]);
    apply_summary_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    for (short, long, value) in metrics.entries() {
        table.add_row(vec![
            Cell::new(short).add_attribute(Attribute::Bold),
            Cell::new(long),
            Cell::new(value),
        ]);
    }
    table
}

pub fn image_metrics_table(metrics: &ImageMetrics) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_summary_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    for (label, value) in metrics.entries() {
        table.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    table
}

/// Fixed points as a short line, e.g. `2 fixed points: 0x00, 0x7F`.
#[must_use]
pub fn fixed_points_line(points: &[usize]) -> String {
    match points {
        [] => "No fixed points".to_string(),
        [point] => format!("1 fixed point: 0x{point:02X}"),
        _ => {
            let listed = points
                .iter()
                .map(|p| format!("0x{p:02X}"))
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} fixed points: {listed}", points.len())
        }
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

// Cells stay narrow, so no width cap.
fn apply_grid_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Disabled);
    for column in table.column_iter_mut() {
        column.set_cell_alignment(CellAlignment::Right);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(status: &str) -> Cell {
    match status {
        "verified" => Cell::new(status).fg(Color::Green),
        "placeholder" => dim_cell(status),
        _ => Cell::new(status).fg(Color::Yellow),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    value.map_or_else(|| dim_cell("-"), Cell::new)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
