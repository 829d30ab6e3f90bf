use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use tabfix_model::CellValue;
use tabfix_transform::{DateDiagnostics, DateOrder, NormalizationReport};

use tabfix_cli::types::{CleanedOutput, FileReport, FileStatus, RunResult};

pub fn print_summary(result: &RunResult) {
    println!("Mode: {}", result.mode);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for file in &result.files {
        table.add_row(vec![
            Cell::new(&file.name),
            Cell::new(file.rows),
            Cell::new(file.columns),
            status_cell(&file.status),
        ]);
    }
    for output in &result.outputs {
        table.add_row(vec![
            Cell::new(format!("-> {}", output.file_name))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(output.table.height()).add_attribute(Attribute::Bold),
            Cell::new(output.table.width()).add_attribute(Attribute::Bold),
            dim_cell("output"),
        ]);
    }
    println!("{table}");

    for path in &result.written {
        println!("Wrote {}", path.display());
    }
    if result.is_empty() {
        println!("Nothing to show: no rows were produced. Check the file selection and inputs.");
    }
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

/// One table per alarm file with the date counters and raw-column statistics.
pub fn print_diagnostics(files: &[FileReport]) {
    for file in files {
        if file.date_report.is_none() && file.diagnostics.is_none() {
            continue;
        }
        let mut table = Table::new();
        table.set_header(vec![header_cell("Measure"), header_cell("Value")]);
        apply_table_style(&mut table);
        align_column(&mut table, 1, CellAlignment::Right);
        if let Some(report) = &file.date_report {
            add_report_rows(&mut table, report);
        }
        if let Some(diagnostics) = &file.diagnostics {
            add_diagnostics_rows(&mut table, diagnostics);
        }
        println!();
        println!("Diagnostics: {}", file.name);
        println!("{table}");
    }
}

fn add_report_rows(table: &mut Table, report: &NormalizationReport) {
    let rows = [
        ("Strict canonical", report.strict),
        ("Day-first", report.day_first),
        ("Month-first", report.month_first),
        ("Spreadsheet serial", report.serial),
        ("Unparseable", report.unresolved),
        ("Missing", report.missing),
        ("Month swapped", report.month_swapped),
        ("Outside expected month", report.month_mismatch_kept),
    ];
    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count)]);
    }
}

fn add_diagnostics_rows(table: &mut Table, diagnostics: &DateDiagnostics) {
    let rows = [
        ("Rows inspected", diagnostics.rows),
        ("Looks D/M/Y", diagnostics.looks_dmy),
        ("Looks Y/M/D", diagnostics.looks_ymd),
        ("Looks serial", diagnostics.looks_serial),
        ("Only valid day-first", diagnostics.unambiguous_day_first),
        ("Only valid month-first", diagnostics.unambiguous_month_first),
    ];
    for (label, count) in rows {
        table.add_row(vec![Cell::new(label), count_cell(count)]);
    }
    for (label, order) in [
        ("day-first", DateOrder::DayFirst),
        ("month-first", DateOrder::MonthFirst),
    ] {
        table.add_row(vec![
            Cell::new(format!("Months ({label})")),
            Cell::new(format_months(diagnostics, order)),
        ]);
        let dominant = diagnostics
            .dominant_month(order)
            .map_or_else(|| "-".to_string(), |month| format!("{month:02}"));
        table.add_row(vec![
            Cell::new(format!("Dominant month ({label})")),
            Cell::new(dominant),
        ]);
    }
}

fn format_months(diagnostics: &DateDiagnostics, order: DateOrder) -> String {
    let months = match order {
        DateOrder::DayFirst => &diagnostics.months_day_first,
        DateOrder::MonthFirst => &diagnostics.months_month_first,
    };
    if months.is_empty() {
        return "-".to_string();
    }
    months
        .iter()
        .map(|(month, count)| format!("{month:02}:{count}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prints the first `rows` rows of every output.
pub fn print_preview(outputs: &[CleanedOutput], rows: usize) {
    if rows == 0 {
        return;
    }
    for output in outputs {
        let mut table = Table::new();
        table.set_header(
            output
                .table
                .column_names()
                .into_iter()
                .map(header_cell)
                .collect::<Vec<_>>(),
        );
        apply_table_style(&mut table);
        for row in output.table.rows().take(rows) {
            table.add_row(
                row.into_iter()
                    .map(|cell| match cell {
                        CellValue::Text(value) => Cell::new(value),
                        CellValue::Missing => dim_cell(""),
                    })
                    .collect::<Vec<_>>(),
            );
        }
        println!();
        println!(
            "{} (first {} of {} rows)",
            output.file_name,
            rows.min(output.table.height()),
            output.table.height()
        );
        println!("{table}");
    }
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

fn status_cell(status: &FileStatus) -> Cell {
    match status {
        FileStatus::Cleaned => Cell::new("ok").fg(Color::Green),
        FileStatus::Failed(message) => Cell::new(format!("failed: {message}"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
