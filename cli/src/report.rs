//! Console report: titled sections with pipe (Markdown) tables.

use std::collections::BTreeMap;

use colored::Colorize;

use humg_backend::{Aggregation, FrequencyMap, SegmentCounts};

use crate::export::CorpusSummary;

const RULE: &str = "-----";
const ALL: &str = "All";

/// Printed after each section.
pub const SEPARATOR: &str = "\n\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Text(String),
    Count(u64),
    /// The `-----` row between entries and the total.
    Rule,
}

impl Cell {
    fn text(s: &str) -> Self {
        Cell::Text(s.to_string())
    }

    fn render(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Count(n) => n.to_string(),
            Cell::Rule => RULE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipeTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl PipeTable {
    pub fn new(headers: &[&str]) -> Self {
        PipeTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// A column is right aligned when it holds counts and nothing but counts
    /// and rules.
    fn is_numeric(&self, col: usize) -> bool {
        let mut has_count = false;
        for row in &self.rows {
            match row.get(col) {
                Some(Cell::Count(_)) => has_count = true,
                Some(Cell::Rule) | None => (),
                Some(Cell::Text(_)) => return false,
            }
        }
        has_count
    }

    pub fn render(&self) -> String {
        let cols = self.headers.len();
        let rendered: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| (0..cols).map(|c| row.get(c).map(Cell::render).unwrap_or_default()).collect())
            .collect();

        let widths: Vec<usize> = (0..cols)
            .map(|c| {
                rendered
                    .iter()
                    .map(|row| row[c].chars().count())
                    .chain(std::iter::once(self.headers[c].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();
        let numeric: Vec<bool> = (0..cols).map(|c| self.is_numeric(c)).collect();

        let format_row = |cells: &[String]| -> String {
            let padded: Vec<String> = cells
                .iter()
                .enumerate()
                .map(|(c, cell)| {
                    if numeric[c] {
                        format!("{:>width$}", cell, width = widths[c])
                    } else {
                        format!("{:<width$}", cell, width = widths[c])
                    }
                })
                .collect();
            format!("| {} |", padded.join(" | "))
        };

        let align: Vec<String> = (0..cols)
            .map(|c| {
                let dashes = "-".repeat(widths[c] + 1);
                if numeric[c] {
                    format!("{}:", dashes)
                } else {
                    format!(":{}", dashes)
                }
            })
            .collect();

        let mut lines = vec![format_row(&self.headers), format!("|{}|", align.join("|"))];
        lines.extend(rendered.iter().map(|row| format_row(row)));
        lines.join("\n") + "\n"
    }
}

/// Section heading: a `#` rule, the yellow title, another rule, a blank line.
pub fn title_banner(title: &str) -> String {
    let rule = "#".repeat(title.chars().count() * 3 / 2);
    format!("{}\n{}\n{}\n\n", rule, format!("#  {}", title).yellow(), rule)
}

/// Entries by count, highest first, then a rule and the total.
pub fn counter_table(counter: &FrequencyMap, category: &str) -> PipeTable {
    let mut table = PipeTable::new(&[category, "Count"]);
    for (key, count) in counter.sorted_by_count() {
        table.push(vec![Cell::text(key), Cell::Count(count)]);
    }
    table.push(vec![Cell::Rule, Cell::Rule]);
    table.push(vec![Cell::text(ALL), Cell::Count(counter.total())]);
    table
}

/// One block per directory, entries sorted by key (descending), directory
/// named on its first row only.
pub fn group_table<F>(groups: &BTreeMap<String, SegmentCounts>, category: &str, select: F) -> PipeTable
where
    F: Fn(&SegmentCounts) -> &FrequencyMap,
{
    let mut table = PipeTable::new(&["Directory", category, "Count"]);
    let mut total = 0;

    for (directory, counts) in groups {
        let counter = select(counts);
        for (idx, (key, count)) in counter.sorted_by_key_desc().into_iter().enumerate() {
            let dir_cell = if idx == 0 { Cell::text(directory) } else { Cell::text("") };
            table.push(vec![dir_cell, Cell::text(key), Cell::Count(count)]);
        }
        total += counter.total();
    }

    table.push(vec![Cell::Rule, Cell::Rule, Cell::Rule]);
    table.push(vec![Cell::text(ALL), Cell::text(ALL), Cell::Count(total)]);
    table
}

/// Volume block for the HTR-United catalogue, in blue.
pub fn catalog_yaml(summary: &CorpusSummary) -> String {
    let yaml = format!(
        "volume:\n    - {{count: {}, metric: \"lines\"}}\n    - {{count: {}, metric: \"files\"}}\n    - {{count: {}, metric: \"regions\"}}\n    - {{count: {}, metric: \"characters\"}}",
        summary.lines, summary.files, summary.regions, summary.characters
    );
    format!("{}\n", yaml.blue())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Include the character table.
    pub chars: bool,
}

pub fn render_report(aggregation: &Aggregation, summary: &CorpusSummary, options: ReportOptions) -> String {
    let mut out = String::new();

    let mut section = |title: &str, body: String| {
        out.push_str(&title_banner(title));
        out.push_str(&body);
        out.push_str(SEPARATOR);
    };

    section("Lines (All)", counter_table(aggregation.lines(), "Line type").render());
    section("Regions (All)", counter_table(aggregation.regions(), "Region type").render());

    if options.chars {
        section("Characters (All)", counter_table(aggregation.chars(), "Characters type").render());
    }

    if let Some(groups) = aggregation.groups() {
        section("Lines (Directory)", group_table(groups, "Line type", |c| &c.lines).render());
        section("Regions (Directory)", group_table(groups, "Region type", |c| &c.regions).render());
    }

    out.push_str(&title_banner("Yaml Cataloging Details for HTR United"));
    out.push_str(&catalog_yaml(summary));
    out
}
