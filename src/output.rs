// SPDX-License-Identifier: MIT
//! Terminal rendering of reports and fix results.

use crate::health::registry::HealthReport;
use crate::health::{HealthCheckStatus, StatusResultType};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

fn symbol(result: StatusResultType) -> (&'static str, &'static str) {
    match result {
        StatusResultType::Success => ("✓", GREEN),
        StatusResultType::Warning => ("!", YELLOW),
        StatusResultType::Error => ("✗", RED),
        StatusResultType::Info => ("i", CYAN),
    }
}

/// Print a formatted report to stdout.
pub fn print_report(report: &HealthReport) {
    println!();
    println!("{BOLD}sitecheck report{RESET}");
    println!("{}", "─".repeat(72));

    for check in &report.checks {
        println!("{BOLD}{} — {}{RESET}", check.group, check.name);
        for status in &check.statuses {
            let (sym, color) = symbol(status.result_type);
            println!("  {color}{sym}{RESET}  {}", status.message);
            for action in &status.actions {
                println!("       ↳ action available: {} — {}", action.alias, action.name);
            }
        }
    }

    println!("{}", "─".repeat(72));

    let mut errors = 0usize;
    let mut warnings = 0usize;
    for status in report.checks.iter().flat_map(|c| c.statuses.iter()) {
        match status.result_type {
            StatusResultType::Error => errors += 1,
            StatusResultType::Warning => warnings += 1,
            _ => {}
        }
    }

    if errors == 0 && warnings == 0 {
        println!("{GREEN}All checks passed.{RESET}");
    } else {
        println!("{RED}{errors} failing{RESET}, {YELLOW}{warnings} warning(s){RESET}. See above for offered fixes.");
    }
    println!();
}

/// Print the status returned by a remediation, including any chained
/// follow-up actions.
pub fn print_fix_result(status: &HealthCheckStatus) {
    let (sym, color) = symbol(status.result_type);
    println!("{color}{sym}{RESET}  {}", status.message);
    for action in &status.actions {
        println!("   ↳ follow-up: {} — {}", action.alias, action.name);
    }
}
