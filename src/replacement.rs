//! Page replacement policies
//! FIFO round-robin, LRU by logical timestamp and CLOCK second-chance

use crate::error::{Error, Result};
use crate::page_table::{FrameNumber, PageTable};
use crate::simulator::Stats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Replacement scheme selected at configuration time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplacementPolicy {
    Fifo,
    Lru,
    Clock,
}

impl std::str::FromStr for ReplacementPolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fifo" => Ok(ReplacementPolicy::Fifo),
            "lru" => Ok(ReplacementPolicy::Lru),
            "clock" => Ok(ReplacementPolicy::Clock),
            "optimal" => Err(Error::ConfigError(
                "optimal replacement is not supported".to_string(),
            )),
            _ => Err(Error::ConfigError(format!(
                "Invalid replacement policy: {}. Must be one of: fifo, lru, clock",
                s
            ))),
        }
    }
}

impl fmt::Display for ReplacementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplacementPolicy::Fifo => "fifo",
            ReplacementPolicy::Lru => "lru",
            ReplacementPolicy::Clock => "clock",
        };
        f.write_str(name)
    }
}

/// Stateful replacer; the cursor lives here, not in the page table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Replacer {
    Fifo { next_victim: FrameNumber },
    Lru { tick: u64 },
    Clock { hand: FrameNumber },
}

impl Replacer {
    pub fn new(policy: ReplacementPolicy) -> Self {
        match policy {
            ReplacementPolicy::Fifo => Replacer::Fifo { next_victim: 0 },
            ReplacementPolicy::Lru => Replacer::Lru { tick: 0 },
            ReplacementPolicy::Clock => Replacer::Clock { hand: 0 },
        }
    }

    pub fn policy(&self) -> ReplacementPolicy {
        match self {
            Replacer::Fifo { .. } => ReplacementPolicy::Fifo,
            Replacer::Lru { .. } => ReplacementPolicy::Lru,
            Replacer::Clock { .. } => ReplacementPolicy::Clock,
        }
    }

    /// Pick the frame to evict. Only valid on a full, non-empty table.
    ///
    /// CLOCK clears reference flags while sweeping and counts each cleared
    /// flag as a swap-in.
    pub fn select_victim(&mut self, table: &mut PageTable, stats: &mut Stats) -> FrameNumber {
        let capacity = table.capacity();
        debug_assert!(capacity > 0 && table.is_full());

        match self {
            Replacer::Fifo { next_victim } => {
                let frame = *next_victim;
                *next_victim = (*next_victim + 1) % capacity;
                frame
            }
            Replacer::Lru { .. } => table
                .entries()
                .iter()
                .enumerate()
                .filter(|(_, entry)| entry.occupied)
                .min_by_key(|(_, entry)| entry.recency)
                .map(|(frame, _)| frame)
                .unwrap_or(0),
            Replacer::Clock { hand } => loop {
                let frame = *hand;
                *hand = (*hand + 1) % capacity;

                let entry = table.entry_mut(frame);
                if !entry.reference_flag {
                    break frame;
                }
                // Second chance
                entry.reference_flag = false;
                stats.swap_ins += 1;
            },
        }
    }

    /// Bookkeeping for a reference to an already resident page
    pub fn on_hit(&mut self, table: &mut PageTable, frame: FrameNumber, stats: &mut Stats) {
        match self {
            Replacer::Fifo { .. } => {}
            Replacer::Lru { tick } => {
                table.entry_mut(frame).recency = *tick;
                *tick += 1;
                stats.swap_ins += 1;
            }
            Replacer::Clock { .. } => {
                let entry = table.entry_mut(frame);
                if !entry.reference_flag {
                    entry.reference_flag = true;
                    stats.swap_ins += 1;
                }
            }
        }
    }

    /// Bookkeeping for a page freshly loaded into `frame`
    pub fn on_load(&mut self, table: &mut PageTable, frame: FrameNumber) {
        match self {
            Replacer::Fifo { .. } => {}
            Replacer::Lru { tick } => {
                table.entry_mut(frame).recency = *tick;
                *tick += 1;
            }
            Replacer::Clock { .. } => {
                table.entry_mut(frame).reference_flag = true;
            }
        }
    }
}
