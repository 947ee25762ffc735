use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use svl_model::{OptionDescriptor, OptionKind, ShaderOptionLayout, VariantList};

use svl_cli::types::RunSummary;

pub fn print_summary(result: &RunSummary) {
    println!("Command: {}", result.command);
    println!("List: {}", result.path.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Before"),
        header_cell("After"),
        header_cell("Added"),
        header_cell("Removed"),
        header_cell("Undo steps"),
        header_cell("Events"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(result.variants_before),
        Cell::new(result.variants_after).add_attribute(Attribute::Bold),
        count_cell(result.added(), Color::Green),
        count_cell(result.removed(), Color::Yellow),
        Cell::new(result.history_entries),
        Cell::new(result.events),
    ]);
    println!("{table}");
    for note in &result.notes {
        println!("- {note}");
    }
}

pub fn print_variants(list: &VariantList, columns: &[String]) {
    println!("Shader: {}", list.shader_file_path);
    let mut table = Table::new();
    let mut header = vec![header_cell("Stable ID")];
    header.extend(columns.iter().map(|column| header_cell(column)));
    table.set_header(header);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for variant in &list.variants {
        let mut row = vec![Cell::new(variant.stable_id).fg(Color::Blue)];
        row.extend(columns.iter().map(|column| match variant.options.get(column) {
            Some(value) if !value.is_empty() => Cell::new(value),
            _ => dim_cell("-"),
        }));
        table.add_row(row);
    }
    println!("{table}");
    println!("{} variants", list.len());
}

pub fn print_options(layout: &ShaderOptionLayout) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Option"),
        header_cell("Kind"),
        header_cell("Default"),
        header_cell("Values"),
        header_cell("Count"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 5, CellAlignment::Right);
    let mut combinations = 1usize;
    for (index, option) in layout.iter().enumerate() {
        combinations = combinations.saturating_mul(option.value_count());
        let default_cell = if option.default_is_enumerated() {
            Cell::new(option.default_value())
        } else {
            Cell::new(option.default_value()).fg(Color::Red)
        };
        table.add_row(vec![
            dim_cell(index),
            Cell::new(option.name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(kind_label(option.kind())),
            default_cell,
            Cell::new(values_label(option)),
            Cell::new(option.value_count()),
        ]);
    }
    println!("{table}");
    println!(
        "{} options, {} combinations when every option is unset",
        layout.len(),
        combinations
    );
}

fn kind_label(kind: OptionKind) -> &'static str {
    match kind {
        OptionKind::Boolean => "boolean",
        OptionKind::Enumeration => "enum",
        OptionKind::IntegerRange => "range",
    }
}

fn values_label(option: &OptionDescriptor) -> String {
    match option.kind() {
        OptionKind::IntegerRange => format!("{}..={}", option.min_index(), option.max_index()),
        OptionKind::Boolean | OptionKind::Enumeration => option
            .values()
            .map(|(_, value)| value)
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    if table.column_count() >= 2 {
        let mut constraints = vec![ColumnConstraint::LowerBoundary(Width::Fixed(5))];
        constraints.extend(
            (1..table.column_count())
                .map(|_| ColumnConstraint::UpperBoundary(Width::Percentage(40))),
        );
        table.set_constraints(constraints);
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(80);
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
