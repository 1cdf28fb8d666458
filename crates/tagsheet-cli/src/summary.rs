use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tagsheet_cli::ProcessResult;
use tagsheet_map::ResolvedColumn;
use tagsheet_model::{ColumnRole, TagNote};
use tagsheet_transform::{CleanedTag, MacroPattern, VendorRule};

pub fn print_summary(result: &ProcessResult) {
    println!("Input: {}", result.input.display());
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, nothing written)"),
    }

    let mut columns = Table::new();
    columns.set_header(vec![
        header_cell("Role"),
        header_cell("Column"),
        header_cell("Label"),
        header_cell("Strategy"),
    ]);
    apply_summary_table_style(&mut columns);
    align_column(&mut columns, 1, CellAlignment::Right);
    columns.add_row(column_row(
        ColumnRole::PlacementId,
        result.resolution.placement_id,
        result.placement_label.as_deref(),
    ));
    columns.add_row(column_row(
        ColumnRole::Tag,
        result.resolution.tag,
        result.tag_label.as_deref(),
    ));
    println!("{columns}");

    let mut notes = Table::new();
    notes.set_header(vec![header_cell("Note"), header_cell("Rows")]);
    apply_summary_table_style(&mut notes);
    align_column(&mut notes, 1, CellAlignment::Right);
    for entry in &result.note_counts {
        notes.add_row(vec![Cell::new(entry.note), count_cell(entry.count)]);
    }
    notes.add_row(vec![
        Cell::new("TOTAL ROWS")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(result.rows()).add_attribute(Attribute::Bold),
    ]);
    println!("{notes}");
}

fn column_row(role: ColumnRole, column: ResolvedColumn, label: Option<&str>) -> Vec<Cell> {
    vec![
        Cell::new(role)
            .fg(Color::Blue)
            .add_attribute(Attribute::Bold),
        Cell::new(column.index),
        label.map_or_else(|| dim_cell("-"), Cell::new),
        Cell::new(column.strategy),
    ]
}

pub fn print_cleaned(cleaned: &CleanedTag) {
    println!("{}", render_cleaned(cleaned));
}

/// Cleaned tag on the first line, notes on the second.
pub fn render_cleaned(cleaned: &CleanedTag) -> String {
    format!("{}\nNotes: {}", cleaned.cleaned_tag, cleaned.notes)
}

pub fn print_vendors(rules: &[VendorRule], dialect: &[MacroPattern]) {
    let mut vendors = Table::new();
    vendors.set_header(vec![
        header_cell("Vendor"),
        header_cell("Hosts"),
        header_cell("Applies"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut vendors);
    for rule in rules {
        let notes: Vec<&str> = rule.notes.iter().map(TagNote::as_str).collect();
        vendors.add_row(vec![
            Cell::new(rule.vendor)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(rule.hosts.join("\n")),
            Cell::new(rule.gate),
            Cell::new(notes.join("\n")),
        ]);
    }
    println!("{vendors}");

    let mut macros = Table::new();
    macros.set_header(vec![header_cell("Macro"), header_cell("Becomes")]);
    apply_table_style(&mut macros);
    for entry in dialect {
        macros.add_row(vec![Cell::new(entry.token), Cell::new(entry.canonical)]);
    }
    println!("{macros}");
}

fn apply_table_style(table: &mut Table) {
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
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
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

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Green)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
