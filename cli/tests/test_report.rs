mod helpers;
use helpers as h;

use humg_cli::export::CorpusSummary;
use humg_cli::report::{render_report, ReportOptions};

fn report(group: bool, chars: bool) -> String {
    colored::control::set_override(false);
    let aggregation = h::run_alto_corpus(group);
    let summary = CorpusSummary::from_aggregation(&aggregation);
    render_report(&aggregation, &summary, ReportOptions { chars })
}

#[test]
fn test_default_sections() {
    let out = report(false, false);

    assert!(out.contains("#  Lines (All)"));
    assert!(out.contains("#  Regions (All)"));
    assert!(!out.contains("Characters (All)"));
    assert!(!out.contains("(Directory)"));
    assert!(out.contains("#  Yaml Cataloging Details for HTR United"));

    let lines_at = out.find("Lines (All)").unwrap();
    let regions_at = out.find("Regions (All)").unwrap();
    let yaml_at = out.find("Yaml Cataloging").unwrap();
    assert!(lines_at < regions_at && regions_at < yaml_at);
}

#[test]
fn test_lines_table_sorted_by_count() {
    let out = report(false, false);

    let default_at = out.find("| DefaultLine ").unwrap();
    let heading_at = out.find("| HeadingLine ").unwrap();
    assert!(default_at < heading_at);
    let total = out.lines().find(|l| l.starts_with("| All ")).unwrap();
    assert!(total.ends_with("|     5 |"));
}

#[test]
fn test_chars_and_group_sections() {
    let out = report(true, true);

    assert!(out.contains("#  Characters (All)"));
    assert!(out.contains("#  Lines (Directory)"));
    assert!(out.contains("#  Regions (Directory)"));
    assert!(out.contains("| Directory "));
}

#[test]
fn test_catalog_figures() {
    let out = report(false, false);

    assert!(out.contains("- {count: 5, metric: \"lines\"}"));
    assert!(out.contains("- {count: 3, metric: \"files\"}"));
    assert!(out.contains("- {count: 4, metric: \"regions\"}"));
    assert!(out.contains("- {count: 25, metric: \"characters\"}"));
}
