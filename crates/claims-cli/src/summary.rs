use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use claims_model::{CaseOutcome, RunReport};
use claims_validate::ValidatorRegistry;

use crate::types::GateReport;

pub fn print_run_summary(report: &RunReport) {
    println!("Filing rule: {}", report.filing_rule);
    println!("{}", case_table(report));
    if report.violation_count() > 0 || report.aborted_count() > 0 {
        println!("{}", violation_table(report));
    }
    println!(
        "{} passed, {} failed, {} skipped, {} aborted",
        report.passed_count(),
        report.failed_count(),
        report.skipped_count(),
        report.aborted_count()
    );
}

/// One row per matrix case.
pub fn case_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Case"),
        header_cell("Claim"),
        header_cell("Status"),
        header_cell("Violations"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for case in &report.cases {
        table.add_row(vec![
            Cell::new(&case.case),
            claim_cell(case.claim_id),
            status_cell(&case.outcome),
            count_cell(case.outcome.violations().len(), Color::Red),
        ]);
    }
    table
}

/// Violations and abort reasons, in case order.
pub fn violation_table(report: &RunReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Claim"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for case in &report.cases {
        match &case.outcome {
            CaseOutcome::Failed { violations } => {
                for violation in violations {
                    table.add_row(vec![
                        claim_cell(case.claim_id),
                        Cell::new(&violation.field).fg(Color::Yellow),
                        Cell::new(&violation.message),
                    ]);
                }
            }
            CaseOutcome::Aborted { error } => {
                table.add_row(vec![
                    claim_cell(case.claim_id),
                    Cell::new("(aborted)")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    Cell::new(error),
                ]);
            }
            CaseOutcome::Passed | CaseOutcome::Skipped { .. } => {}
        }
    }
    table
}

pub fn print_gate_summary(report: &GateReport) {
    println!("{}", gate_table(report));
    println!(
        "{} billable, {} rejected",
        report.billable_count(),
        report.rejected_count()
    );
}

pub fn gate_table(report: &GateReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Claim"),
        header_cell("Billable"),
        header_cell("Reason"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 1, CellAlignment::Center);
    for entry in &report.claims {
        let reasons = entry
            .violations
            .iter()
            .map(|violation| violation.message.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let billable = if entry.is_billable() {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::Red).add_attribute(Attribute::Bold)
        };
        table.add_row(vec![Cell::new(entry.claim_id), billable, Cell::new(reasons)]);
    }
    table
}

pub fn rules_table(registry: &ValidatorRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Filing rule"),
        header_cell("Strategy"),
        header_cell("Checks"),
    ]);
    apply_table_style(&mut table);
    for validator in registry.validators() {
        table.add_row(vec![
            Cell::new(validator.rule_name())
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(validator.strategy_name()),
            dim_cell(validator.description()),
        ]);
    }
    table
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
            ColumnConstraint::LowerBoundary(Width::Fixed(7)),
            ColumnConstraint::LowerBoundary(Width::Fixed(8)),
            ColumnConstraint::LowerBoundary(Width::Fixed(12)),
        ]);
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

fn status_cell(outcome: &CaseOutcome) -> Cell {
    let cell = Cell::new(outcome.label());
    match outcome {
        CaseOutcome::Passed => cell.fg(Color::Green),
        CaseOutcome::Failed { .. } | CaseOutcome::Aborted { .. } => {
            cell.fg(Color::Red).add_attribute(Attribute::Bold)
        }
        CaseOutcome::Skipped { .. } => cell.fg(Color::Yellow),
    }
}

fn claim_cell(claim_id: Option<i64>) -> Cell {
    match claim_id {
        Some(id) => Cell::new(id),
        None => dim_cell("-"),
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
