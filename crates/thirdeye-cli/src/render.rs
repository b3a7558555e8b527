// Terminal rendering of parsed views

use chrono::DateTime;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table as TermTable};
use thirdeye_core::{ParsedView, Row, Table};

pub fn print_view(view: &ParsedView) {
    let crumb = &view.breadcrumb_info;
    let marker = if crumb.is_root { " (root)" } else { "" };
    println!(
        "\n{} {} {}{}",
        "📍".cyan(),
        crumb.title.cyan().bold(),
        format!("#{}", crumb.id).dimmed(),
        marker.dimmed()
    );

    if view.output.is_empty() {
        println!("{}", "No tables for this view.".yellow());
        return;
    }

    for table in &view.output {
        print_table(table);
    }
}

fn print_table(table: &Table) {
    println!(
        "\n{} {}",
        table.title.green().bold(),
        format!("[{}]", table.component_path).dimmed()
    );

    let Some(first) = table.data.first() else {
        println!("{}", "  (empty)".dimmed());
        return;
    };

    let mut out = TermTable::new();
    out.load_preset(UTF8_FULL);
    out.set_header(header_for(first));
    for row in &table.data {
        out.add_row(cells_for(row));
    }
    println!("{out}");
}

fn header_for(row: &Row) -> Vec<&'static str> {
    match row {
        Row::Metric(_) => vec!["ID", "Start", "End", "Metric", "Current", "Predicted"],
        Row::Group(_) => vec!["ID", "Group", "Start", "End", "Criticality", "Current", "Predicted"],
        Row::Constituent(_) => vec!["ID", "Start", "End", "Metric", "Dimensions", "Current", "Predicted"],
        Row::Parent(_) => vec!["ID", "Start", "End", "Details"],
    }
}

fn cells_for(row: &Row) -> Vec<String> {
    match row {
        Row::Metric(r) => vec![
            r.id.to_string(),
            time(r.start_time),
            time(r.end_time),
            r.metric.clone().unwrap_or_default(),
            number(r.current),
            number(r.predicted),
        ],
        Row::Group(r) => vec![
            r.id.to_string(),
            r.group_name.clone().unwrap_or_default(),
            time(r.start_time),
            time(r.end_time),
            number(r.criticality),
            number(r.current),
            number(r.predicted),
        ],
        Row::Constituent(r) => vec![
            r.id.to_string(),
            time(r.start_time),
            time(r.end_time),
            r.metric.clone().unwrap_or_default(),
            r.dimensions.as_ref().map(|d| d.to_string()).unwrap_or_default(),
            number(r.current),
            number(r.predicted),
        ],
        Row::Parent(r) => vec![
            r.id.to_string(),
            time(r.start_time),
            time(r.end_time),
            r.details
                .iter()
                .map(|(name, count)| format!("{} ({})", name, count))
                .collect::<Vec<_>>()
                .join(", "),
        ],
    }
}

fn time(millis: i64) -> String {
    DateTime::from_timestamp_millis(millis)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| millis.to_string())
}

fn number(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}
