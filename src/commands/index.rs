//! Index command handler

use anyhow::Result;
use std::path::Path;

use seqlog::{Parser, ScanResult};

use super::{
    find_test_cases, interruptible_progress, load_config, open_log, select_test_case,
    truncate_string,
};

/// Run phase 1 on one test case and print what it found.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, testcase: Option<&str>, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let (log, metadata) = open_log(file, &config)?;
    let progress = interruptible_progress();
    let (test_cases, _) = find_test_cases(&log, &metadata, &progress)?;
    let test_case = select_test_case(test_cases, testcase)?;

    let mut parser = Parser::new(&log, &metadata, test_case);
    println!("Test case: {}", parser_name(&parser));
    let scan = parser.pre_parse(&config.preferences, &config.filter, &progress)?;
    print!("{}", report(scan));
    Ok(())
}

fn parser_name(parser: &Parser<'_>) -> String {
    let test_case = parser.test_case();
    format!(
        "{} (records {}..={})",
        test_case.name, test_case.start_record, test_case.end_record
    )
}

/// Counters, index size and components of a scan.
pub fn report(scan: &ScanResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("Indexed events: {}\n", scan.index.len()));
    if scan.status.is_canceled() {
        out.push_str("(canceled, index is partial)\n");
    }

    out.push_str("\nCounters:\n");
    for (kind, count) in scan.counters.iter() {
        out.push_str(&format!("  {:<28} {}\n", kind, count));
    }

    out.push_str("\nComponents:\n");
    for component in scan.components.iter() {
        let alias = component
            .alias
            .as_deref()
            .map(|a| format!(" ({})", truncate_string(a, 32)))
            .unwrap_or_default();
        let ports = if component.ports.is_empty() {
            String::new()
        } else {
            let names: Vec<&str> = component.ports.iter().map(String::as_str).collect();
            format!("  ports: {}", names.join(", "))
        };
        out.push_str(&format!(
            "  {}{}  verdict: {}{}\n",
            component.name, alias, component.verdict, ports
        ));
    }

    if !scan.connected.is_empty() {
        out.push_str(&format!(
            "\nFailing verdicts with causes: {}\n",
            scan.connected.len()
        ));
    }
    out
}
