//! CLI output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use serde::Serialize;

use crate::session::{Decision, SessionState};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

/// How both guards answer one path for one session state
#[derive(Debug, Clone, Serialize)]
pub struct DecisionRow {
    pub path: String,
    pub session: SessionState,
    pub edge: Decision,
    pub render: Decision,
}

/// Format a decision as a colored string
pub fn format_decision(decision: &Decision) -> String {
    match decision {
        Decision::Allow => "allow".green().to_string(),
        Decision::RedirectTo(target) => format!("→ {}", target).yellow().to_string(),
    }
}

fn decision_cell(decision: &Decision) -> Cell {
    match decision {
        Decision::Allow => Cell::new("allow").fg(Color::Green),
        Decision::RedirectTo(target) => Cell::new(format!("→ {}", target)).fg(Color::Yellow),
    }
}

/// Print a table of guard decisions
pub fn print_decision_table(rows: &[DecisionRow]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Path").fg(Color::Cyan),
            Cell::new("Session").fg(Color::Cyan),
            Cell::new("Edge").fg(Color::Cyan),
            Cell::new("Render").fg(Color::Cyan),
        ]);

    for row in rows {
        let session_color = match row.session {
            SessionState::Authenticated => Color::Green,
            SessionState::Anonymous => Color::Red,
        };

        table.add_row(vec![
            Cell::new(&row.path),
            Cell::new(row.session.to_string()).fg(session_color),
            decision_cell(&row.edge),
            decision_cell(&row.render),
        ]);
    }

    println!("{table}");
}
