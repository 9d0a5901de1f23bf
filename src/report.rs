//! End-of-run report and page table dump

use crate::config::SimulatorConfig;
use crate::simulator::{Simulator, Stats};
use serde::Serialize;

const RULE: &str = "-------------------------------------------------------------";

/// Plain text summary, one counter per line
pub fn render_text(stats: &Stats) -> String {
    format!(
        "\nMemory references: {}\nPage faults: {}\nSwap ins: {}\nSwap outs: {}\n",
        stats.references, stats.faults, stats.swap_ins, stats.swap_outs
    )
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a SimulatorConfig,
    stats: &'a Stats,
    hits: u64,
    fault_rate: f64,
}

pub fn render_json(config: &SimulatorConfig, stats: &Stats) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport {
        config,
        stats,
        hits: stats.hits(),
        fault_rate: stats.fault_rate(),
    })
}

/// Frame-by-frame view of the table after an access, labelled with the trace line
pub fn render_table(sim: &Simulator, label: &str) -> String {
    let stats = sim.stats();
    let mut out = format!(
        "{rule}\n{}   mem_refs: {}  page_faults: {}  swap_ins: {}  swap_outs: {}\n\n\
         FRAME\t|PAGE\t\t|RECENCY\t|REF\t\n{rule}\n",
        label.trim_end(),
        stats.references,
        stats.faults,
        stats.swap_ins,
        stats.swap_outs,
        rule = RULE,
    );

    for (frame, entry) in sim.page_table().entries().iter().enumerate() {
        let marker = if sim.last_frame() == Some(frame) { "<-" } else { "" };
        let page = if entry.occupied {
            format!("{:#x}", entry.page_number)
        } else {
            "FREE".to_string()
        };
        out.push_str(&format!(
            "{}\t|{}\t\t|{}\t|{}\t{}\n",
            frame, page, entry.recency, entry.reference_flag as u8, marker
        ));
    }
    out.push_str(RULE);
    out.push('\n');

    out
}
