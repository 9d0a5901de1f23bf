//! Address resolution over an inverted page table
//! Drives the replacement policy on page faults and accumulates statistics

use crate::config::SimulatorConfig;
use crate::error::{Error, Result};
use crate::page_table::{FrameNumber, PageNumber, PageTable};
use crate::replacement::{ReplacementPolicy, Replacer};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Simulation counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Successfully resolved accesses
    pub references: u64,
    pub faults: u64,
    pub swap_ins: u64,
    pub swap_outs: u64,
    /// Resolved accesses flagged as writes
    pub writes: u64,
}

impl Stats {
    pub fn hits(&self) -> u64 {
        self.references - self.faults
    }

    pub fn fault_rate(&self) -> f64 {
        if self.references == 0 {
            return 0.0;
        }
        self.faults as f64 / self.references as f64
    }
}

/// Owned simulator state: table, policy cursor and counters
#[derive(Debug, Clone)]
pub struct Simulator {
    config: SimulatorConfig,
    table: PageTable,
    replacer: Option<Replacer>,
    stats: Stats,
    last_frame: Option<FrameNumber>,
}

impl Simulator {
    /// Create a simulator with `frames` free frames of `2^frame_bits` bytes
    pub fn new(
        frames: usize,
        frame_bits: u32,
        policy: Option<ReplacementPolicy>,
    ) -> Result<Self> {
        Self::from_config(SimulatorConfig {
            frame_bits,
            frames,
            policy,
        })
    }

    pub fn from_config(config: SimulatorConfig) -> Result<Self> {
        config.validate()?;
        info!(
            frames = config.frames,
            frame_bits = config.frame_bits,
            policy = ?config.policy,
            "page table initialized"
        );

        Ok(Self {
            table: PageTable::new(config.frames),
            replacer: config.policy.map(Replacer::new),
            stats: Stats::default(),
            last_frame: None,
            config,
        })
    }

    /// Translate a logical address, faulting the page in if needed
    pub fn resolve(&mut self, address: u64, is_write: bool) -> Result<u64> {
        let replacer = self
            .replacer
            .as_mut()
            .ok_or(Error::UnresolvableAddress { address })?;

        let page: PageNumber = address >> self.config.frame_bits;
        let offset = address & self.config.offset_mask();

        let frame = if let Some(frame) = self.table.find(page) {
            replacer.on_hit(&mut self.table, frame, &mut self.stats);
            trace!(page, frame, "hit");
            frame
        } else {
            self.stats.faults += 1;
            match self.table.allocate_free(page) {
                Some(frame) => {
                    // First load into an unused frame is not swap activity
                    replacer.on_load(&mut self.table, frame);
                    debug!(page, frame, "page fault, loaded into free frame");
                    frame
                }
                None => {
                    let frame = replacer.select_victim(&mut self.table, &mut self.stats);
                    let victim = self.table.evict(frame, page);
                    replacer.on_load(&mut self.table, frame);
                    self.stats.swap_outs += 1;
                    self.stats.swap_ins += 1;
                    debug!(page, frame, victim, "page fault, evicted victim");
                    frame
                }
            }
        };

        self.stats.references += 1;
        if is_write {
            self.stats.writes += 1;
        }
        self.last_frame = Some(frame);

        Ok(((frame as u64) << self.config.frame_bits) | offset)
    }

    /// Snapshot of the counters
    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn page_table(&self) -> &PageTable {
        &self.table
    }

    pub fn policy(&self) -> Option<ReplacementPolicy> {
        self.replacer.as_ref().map(Replacer::policy)
    }

    /// Frame touched by the most recent successful resolve
    pub fn last_frame(&self) -> Option<FrameNumber> {
        self.last_frame
    }

    /// Page held by each frame, `None` for free frames
    pub fn resident_pages(&self) -> Vec<Option<PageNumber>> {
        self.table
            .entries()
            .iter()
            .map(|entry| entry.occupied.then_some(entry.page_number))
            .collect()
    }
}
