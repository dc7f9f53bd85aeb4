//! Terminal output formatting for dumpclean reports.
//! Uses comfy-table for the per-sanitizer summary and colored for
//! status lines.

use colored::Colorize;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use dumpclean_core::SanitizeReport;

/// Print a summary table followed by one status line per report.
pub fn print_sanitize_reports(reports: &[SanitizeReport]) {
    if reports.is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Sanitizer"),
            Cell::new("Input"),
            Cell::new("Output"),
            Cell::new("Tables Removed"),
            Cell::new("Inserts Removed"),
            Cell::new("Header"),
            Cell::new("Size"),
        ]);

    for report in reports {
        table.add_row(vec![
            Cell::new(report.kind),
            Cell::new(report.input.display()),
            Cell::new(report.output.display()),
            Cell::new(report.tables_removed),
            Cell::new(report.inserts_removed),
            Cell::new(report.header_statements),
            Cell::new(format!(
                "{} → {} bytes",
                report.input_bytes, report.output_bytes
            )),
        ]);
    }

    println!("{table}");

    for report in reports {
        print_status(report);
    }
}

fn print_status(report: &SanitizeReport) {
    if !report.written {
        println!(
            "{}",
            format!(
                "Dry run: {} not written ({} statement(s) would be removed).",
                report.output.display(),
                report.removed()
            )
            .yellow()
        );
        return;
    }

    if report.removed() == 0 {
        println!(
            "{}",
            format!(
                "No d1_migrations statements found in {}; wrote {} unchanged{}.",
                report.input.display(),
                report.output.display(),
                if report.header_statements > 0 {
                    " apart from the DELETE header"
                } else {
                    ""
                }
            )
            .yellow()
        );
        return;
    }

    println!(
        "{}",
        format!(
            "Successfully cleaned {} → {} ({} statement(s) removed)",
            report.input.display(),
            report.output.display(),
            report.removed()
        )
        .green()
        .bold()
    );
}
