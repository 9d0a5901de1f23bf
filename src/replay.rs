//! Trace replay driver

use crate::error::Result;
use crate::progress::ProgressBar;
use crate::simulator::Simulator;
use crate::trace::{TraceReader, TraceRecord};
use std::io::{BufRead, Write};
use tracing::error;

/// Feed every access in `reader` through `sim`.
///
/// `progress` is polled with the input position after each access and once
/// more at end of input, so skipped trailing lines still count. On failure
/// `reader.line()` is the offending line.
pub fn replay<R, W, F>(
    sim: &mut Simulator,
    reader: &mut TraceReader<R>,
    mut progress: Option<&mut ProgressBar<W>>,
    mut on_access: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut(&Simulator, &TraceRecord),
{
    while let Some(record) = reader.next() {
        let record = record?;
        if let Err(e) = sim.resolve(record.address, record.kind.is_write()) {
            error!(line = record.line, address = record.address, "cannot resolve address");
            return Err(e);
        }
        on_access(sim, &record);

        if let Some(bar) = progress.as_deref_mut() {
            bar.update(reader.bytes_read())?;
        }
    }

    if let Some(bar) = progress {
        bar.update(reader.bytes_read())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replacement::ReplacementPolicy;
    use std::io::Cursor;

    fn last_frame(out: &[u8]) -> String {
        let out = String::from_utf8(out.to_vec()).unwrap();
        out.split_terminator('\r').last().unwrap_or_default().to_string()
    }

    #[test]
    fn test_progress_completes_after_trailing_comments() {
        let input = "R: 10\nR: 20\n# trailing comment line that is much longer than the accesses\n\n";
        let mut sim = Simulator::new(2, 4, Some(ReplacementPolicy::Fifo)).unwrap();
        let mut reader = TraceReader::new(Cursor::new(input));
        let mut buf = Vec::new();
        let mut bar = ProgressBar::new(&mut buf, input.len() as u64);

        replay(&mut sim, &mut reader, Some(&mut bar), |_, _| {}).unwrap();
        drop(bar);

        assert_eq!(sim.stats().references, 2);
        assert!(last_frame(&buf).ends_with("] 100%"));
    }

    #[test]
    fn test_progress_drawn_without_accesses() {
        let input = "# header only\n";
        let mut sim = Simulator::new(2, 4, Some(ReplacementPolicy::Lru)).unwrap();
        let mut reader = TraceReader::new(Cursor::new(input));
        let mut buf = Vec::new();
        let mut bar = ProgressBar::new(&mut buf, input.len() as u64);

        replay(&mut sim, &mut reader, Some(&mut bar), |_, _| {}).unwrap();
        drop(bar);

        assert_eq!(sim.stats().references, 0);
        assert!(last_frame(&buf).ends_with("] 100%"));
    }

    #[test]
    fn test_callback_sees_each_access() {
        let input = "R: 10\nnoise\nW: 25\n";
        let mut sim = Simulator::new(2, 4, Some(ReplacementPolicy::Clock)).unwrap();
        let mut reader = TraceReader::new(Cursor::new(input));
        let mut seen = Vec::new();

        replay(&mut sim, &mut reader, None::<&mut ProgressBar<Vec<u8>>>, |sim, record| {
            seen.push((record.line, sim.stats().references));
        })
        .unwrap();

        assert_eq!(seen, vec![(1, 1), (3, 2)]);
    }

    #[test]
    fn test_failure_leaves_reader_on_bad_line() {
        let input = "R: 10\nR: 20\nW: xyz\nR: 30\n";
        let mut sim = Simulator::new(2, 4, Some(ReplacementPolicy::Fifo)).unwrap();
        let mut reader = TraceReader::new(Cursor::new(input));

        assert!(replay(&mut sim, &mut reader, None::<&mut ProgressBar<Vec<u8>>>, |_, _| {}).is_err());
        assert_eq!(reader.line(), 3);
        assert_eq!(sim.stats().references, 2);
    }
}
