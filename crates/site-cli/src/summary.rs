use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use site_cli::commands::{ReplayFrame, SectionRow, SubmitReport, ValidationRow};
use site_forms::{FormEvent, ValidationResult};
use site_theme::Theme;

pub fn print_validation(rows: &[ValidationRow]) {
    let mut table = styled_table(vec!["Value", "Result", "Message"]);
    for row in rows {
        let (verdict, message) = match &row.result {
            ValidationResult::Valid => (Cell::new("valid").fg(Color::Green), dim_cell("-")),
            ValidationResult::Invalid { message } => (
                Cell::new("invalid")
                    .fg(Color::Red)
                    .add_attribute(Attribute::Bold),
                Cell::new(message),
            ),
        };
        table.add_row(vec![value_cell(&row.value), verdict, message]);
    }
    println!("{table}");
}

pub fn print_phones(rows: &[(String, String)]) {
    let mut table = styled_table(vec!["Input", "Formatted"]);
    for (raw, formatted) in rows {
        table.add_row(vec![value_cell(raw), Cell::new(formatted)]);
    }
    println!("{table}");
}

pub fn print_sections(rows: &[SectionRow]) {
    let mut table = styled_table(vec!["Position", "Section"]);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in rows {
        let section = match &row.section {
            Some(id) => Cell::new(id),
            None => dim_cell("(none)"),
        };
        table.add_row(vec![Cell::new(row.position), section]);
    }
    println!("{table}");
}

pub fn print_theme(theme: Theme) {
    println!("Theme: {theme}");
    println!("Toggle icon: {}", theme.icon_class());
}

pub fn print_submit(report: &SubmitReport) {
    println!("Outcome: {}", report.outcome);
    let mut table = styled_table(vec!["#", "Event"]);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, event) in report.events.iter().enumerate() {
        table.add_row(vec![dim_cell(index + 1), Cell::new(describe_form_event(event))]);
    }
    println!("{table}");
}

pub fn print_replay(frames: &[ReplayFrame]) {
    let mut table = styled_table(vec!["Time (ms)", "Update", "Details"]);
    align_column(&mut table, 0, CellAlignment::Right);
    for frame in frames {
        for update in &frame.updates {
            let mut details = serde_json::to_value(update).unwrap_or_default();
            if let Some(object) = details.as_object_mut() {
                object.remove("update");
            }
            table.add_row(vec![
                Cell::new(frame.at_ms),
                Cell::new(update.kind()).fg(Color::Cyan),
                Cell::new(details.to_string()),
            ]);
        }
    }
    println!("{table}");
}

fn describe_form_event(event: &FormEvent) -> String {
    match event {
        FormEvent::Phase { state } => format!("state -> {state}"),
        FormEvent::Control { control } => format!(
            "button \"{}\" ({})",
            control.label,
            if control.enabled { "enabled" } else { "disabled" }
        ),
        FormEvent::FieldValidity { field, result } => match result {
            ValidationResult::Valid => format!("{field}: valid"),
            ValidationResult::Invalid { message } => format!("{field}: {message}"),
        },
        FormEvent::FieldValue { field, value } => format!("{field} = {value:?}"),
        FormEvent::Notify { notification } => format!(
            "{} toast: {}",
            notification.kind.css_class(),
            notification.text()
        ),
    }
}

fn styled_table(headers: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.set_header(headers.into_iter().map(header_cell).collect::<Vec<_>>());
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    table
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

fn value_cell(value: &str) -> Cell {
    if value.is_empty() {
        dim_cell("(empty)")
    } else {
        Cell::new(value)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
