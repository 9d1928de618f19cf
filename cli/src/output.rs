//! cli/src/output.rs
//! Output utilities for the CLI: spinners while waiting on the network,
//! the per-program summary table and styled status lines.

use comfy_table::{presets::UTF8_FULL, Table};
use console::Style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use stitch_core::Bundle;

/// Styles for the different kinds of output lines.
pub struct FormatStyle {
    pub title: Style,
    pub info: Style,
    pub error: Style,
    pub success: Style,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle {
            title: Style::new().bold().underlined(),
            info: Style::new().cyan(),
            error: Style::new().red().bold(),
            success: Style::new().green().bold(),
        }
    }
}

pub fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn summary_table(bundle: &Bundle) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "author", "wrapper", "declarations", "functions", "tiles", "kinds"]);
    for (i, program) in bundle.programs.iter().enumerate() {
        let stats = program.stats;
        table.add_row(vec![
            i.to_string(),
            program.author.clone(),
            program.wrapper.clone(),
            stats.declarations.to_string(),
            stats.functions.to_string(),
            stats.tiles.to_string(),
            (stats.sprite_kinds + stats.status_bar_kinds).to_string(),
        ]);
    }
    table
}

pub fn print_summary(bundle: &Bundle) {
    let style = FormatStyle::default();
    println!("{}", style.title.apply_to(format!("Stitched {} games", bundle.programs.len())));
    println!("{}", summary_table(bundle));
    println!(
        "{} {} sprite kinds, {} status bar kinds, {} resources, {} dependencies",
        style.info.apply_to("merged"),
        bundle.kinds.sprite_kinds.len(),
        bundle.kinds.status_bar_kinds.len(),
        // the "*" envelope entry is not a resource
        bundle.resources.len().saturating_sub(1),
        bundle.dependencies.len()
    );
}

pub fn print_status(label: &str, message: &str) {
    let style = FormatStyle::default();
    println!("{} {}", style.success.apply_to(label), message);
}

pub fn print_error(report: &str) {
    let style = FormatStyle::default();
    eprintln!("{}", style.error.apply_to(report));
}
