//! Inverted page table
//! One entry per physical frame, searched linearly by page number

pub type PageNumber = u64;
pub type FrameNumber = usize;

/// A single frame slot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageTableEntry {
    /// Logical page held by the frame; meaningless while free
    pub page_number: PageNumber,
    pub occupied: bool,
    /// Logical timestamp of the last touch (LRU only)
    pub recency: u64,
    /// Referenced since the clock hand last passed (CLOCK only)
    pub reference_flag: bool,
}

/// Fixed-capacity, fully associative map from page number to frame
#[derive(Debug, Clone)]
pub struct PageTable {
    entries: Vec<PageTableEntry>,
}

impl PageTable {
    /// Create a table with `capacity` free frames
    pub fn new(capacity: usize) -> Self {
        PageTable {
            entries: vec![PageTableEntry::default(); capacity],
        }
    }

    /// Frame currently holding `page_number`, if resident
    pub fn find(&self, page_number: PageNumber) -> Option<FrameNumber> {
        self.entries
            .iter()
            .position(|entry| entry.occupied && entry.page_number == page_number)
    }

    /// Claim the lowest free frame for `page_number`.
    ///
    /// Policy bookkeeping is left to the caller.
    pub fn allocate_free(&mut self, page_number: PageNumber) -> Option<FrameNumber> {
        let frame = self.entries.iter().position(|entry| !entry.occupied)?;
        let entry = &mut self.entries[frame];
        entry.occupied = true;
        entry.page_number = page_number;
        Some(frame)
    }

    /// Replace the page held by an occupied frame, returning the page it held
    ///
    /// # Panics
    ///
    /// Panics if `frame >= self.capacity()`.
    pub fn evict(&mut self, frame: FrameNumber, page_number: PageNumber) -> PageNumber {
        let entry = &mut self.entries[frame];
        debug_assert!(entry.occupied, "evicting free frame {}", frame);
        let old = entry.page_number;
        entry.page_number = page_number;
        entry.occupied = true;
        old
    }

    /// # Panics
    ///
    /// Panics if `frame >= self.capacity()`; see [`PageTable::get`].
    pub fn entry(&self, frame: FrameNumber) -> &PageTableEntry {
        &self.entries[frame]
    }

    pub fn get(&self, frame: FrameNumber) -> Option<&PageTableEntry> {
        self.entries.get(frame)
    }

    pub(crate) fn entry_mut(&mut self, frame: FrameNumber) -> &mut PageTableEntry {
        &mut self.entries[frame]
    }

    pub fn entries(&self) -> &[PageTableEntry] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of occupied frames
    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|entry| entry.occupied).count()
    }

    pub fn is_full(&self) -> bool {
        self.entries.iter().all(|entry| entry.occupied)
    }
}
