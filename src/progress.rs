//! Text progress bar for trace replay

use std::io::{self, Write};

pub const PROGRESS_BAR_WIDTH: usize = 60;

/// Redraws in place with `\r`, only when the filled width grows
pub struct ProgressBar<W: Write> {
    out: W,
    total: u64,
    drawn: usize,
}

impl<W: Write> ProgressBar<W> {
    /// `total` is the input size in bytes; must be non-zero
    pub fn new(out: W, total: u64) -> Self {
        Self {
            out,
            total,
            drawn: 0,
        }
    }

    /// Report `position` bytes consumed
    pub fn update(&mut self, position: u64) -> io::Result<()> {
        let percent = (position.saturating_mul(100) / self.total.max(1)).min(100) as usize;
        let filled = PROGRESS_BAR_WIDTH * percent / 100;
        if filled <= self.drawn {
            return Ok(());
        }
        self.drawn = filled;

        write!(
            self.out,
            "Progress [{}{}] {:3}%\r",
            ".".repeat(filled),
            " ".repeat(PROGRESS_BAR_WIDTH - filled),
            percent
        )?;
        self.out.flush()
    }
}
