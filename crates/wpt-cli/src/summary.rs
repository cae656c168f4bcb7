use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use wpt_cli::types::{JobKind, JobSummary, RunReport};

pub fn print_summary(report: &RunReport) {
    if report.jobs.is_empty() {
        println!("No jobs configured.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Target"),
        header_cell("Sources"),
        header_cell("Rows"),
        header_cell("Removed"),
        header_cell("Own-hosted"),
        header_cell("Sanitized"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 7, CellAlignment::Center);

    for job in &report.jobs {
        table.add_row(vec![
            stage_cell(job.kind),
            Cell::new(job.target.display()),
            Cell::new(job.sources),
            count_cell(job.rows),
            count_cell(job.removed_rows),
            count_cell(job.own_hosted),
            count_cell(job.sanitized),
            status_cell(job),
        ]);
    }
    for kind in [JobKind::Combine, JobKind::Munge] {
        let Some(totals) = report.stage_totals(kind) else {
            continue;
        };
        table.add_row(vec![
            Cell::new(format!("TOTAL {kind}"))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{} jobs", totals.jobs))
                .fg(Color::Cyan)
                .add_attribute(Attribute::Bold),
            dim_cell("-"),
            Cell::new(totals.rows).add_attribute(Attribute::Bold),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            failed_cell(totals.failed),
        ]);
    }
    println!("{table}");

    if report.has_errors() {
        eprintln!("Errors:");
        for job in report.failures() {
            if let Some(error) = &job.error {
                eprintln!("- {} {}: {error}", job.kind, job.target.display());
            }
        }
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn stage_cell(kind: JobKind) -> Cell {
    let color = match kind {
        JobKind::Combine => Color::Blue,
        JobKind::Munge => Color::Magenta,
    };
    Cell::new(kind).fg(color).add_attribute(Attribute::Bold)
}

fn status_cell(job: &JobSummary) -> Cell {
    if job.succeeded() {
        Cell::new("✓")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        Cell::new("FAILED")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn failed_cell(failed: usize) -> Cell {
    if failed > 0 {
        Cell::new(format!("{failed} failed"))
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("0 failed")
    }
}

fn count_cell(count: Option<usize>) -> Cell {
    match count {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
