//! Events command handler

use anyhow::{bail, Result};
use std::path::Path;

use seqlog::{Decipherer, Event, Parser, Region, ScanStatus};

use super::{
    find_test_cases, interruptible_progress, load_config, open_log, select_test_case,
    truncate_string,
};

/// Options of the events command.
pub struct EventsOptions<'a> {
    pub testcase: Option<&'a str>,
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub json: bool,
}

/// Index one test case, decode a window of it and print the timeline.
#[cfg(not(tarpaulin_include))]
pub fn handle(file: &Path, options: EventsOptions<'_>, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let (log, metadata) = open_log(file, &config)?;
    let progress = interruptible_progress();
    let (test_cases, _) = find_test_cases(&log, &metadata, &progress)?;
    let test_case = select_test_case(test_cases, options.testcase)?;

    let mut parser = Parser::new(&log, &metadata, test_case);
    let scan = parser.pre_parse(&config.preferences, &config.filter, &progress)?;
    let len = scan.index.len();

    let region = if len == 0 {
        Region {
            start: 0,
            end: 0,
            prologue: scan.prologue.clone(),
            events: Vec::new(),
            epilogue: scan.epilogue.clone(),
            status: scan.status,
        }
    } else {
        let (start, end) = window(options.from, options.to, len)?;
        let mut decipherer = config
            .preferences
            .decipher
            .then(|| Decipherer::new(config.deciphering.clone()));
        let mut region = parser.parse_region(start, end, decipherer.as_mut(), &progress)?;
        if parser.scan().is_some_and(|s| s.status.is_canceled()) {
            region.status = ScanStatus::Canceled;
        }
        region
    };

    if options.json {
        println!("{}", serde_json::to_string_pretty(&region)?);
    } else {
        for event in region.timeline() {
            println!("{}", format_event(event));
        }
        if region.status.is_canceled() {
            println!("(canceled, timeline is partial)");
        }
    }
    Ok(())
}

/// Clamp `--from`/`--to` to an index of `len` entries.
pub fn window(from: Option<usize>, to: Option<usize>, len: usize) -> Result<(usize, usize)> {
    let start = from.unwrap_or(0);
    let end = to.unwrap_or(len - 1).min(len - 1);
    if start > end {
        bail!(
            "Empty window {}..={} (index has {} entries)",
            start,
            to.unwrap_or(len - 1),
            len
        );
    }
    Ok((start, end))
}

/// One line of the text timeline.
pub fn format_event(event: &Event) -> String {
    let mut line = format!(
        "{:>7} {:<16} {:<24} {}",
        event.record_number,
        truncate_string(&event.time, 16),
        event.kind,
        event.reference
    );
    if let Some(target) = &event.target {
        line.push_str(&format!(" -> {}", target));
    }
    if let Some(port) = &event.port {
        line.push_str(&format!(" [{}]", port));
    }
    if let Some(name) = event.display_name() {
        line.push_str(&format!(" {}", truncate_string(name, 80)));
    }
    if let Some(verdict) = event.verdict {
        line.push_str(&format!(" ({})", verdict));
    }
    if let Some(connected) = &event.connected_records {
        let records: Vec<String> = connected
            .iter()
            .map(|c| c.record_number.to_string())
            .collect();
        line.push_str(&format!(" caused by records [{}]", records.join(", ")));
    }
    line
}
