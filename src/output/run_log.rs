//! Append-only run log

use std::{
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
    time::Duration,
};

use chrono::{DateTime, TimeZone};
use tracing::info;

use crate::{
    state::SplitRecord,
    utils::{format_duration, format_pair},
};

/// Line-oriented writer for the run log.
///
/// Every entry is written and flushed on its own; nothing already written is
/// ever rewritten.
#[derive(Debug)]
pub struct RunLog<W: Write> {
    out: W,
}

impl RunLog<File> {
    /// Open `path` for appending, creating it if needed
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        info!("Appending run log to {}", path.display());
        Ok(Self::new(file))
    }
}

impl<W: Write> RunLog<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Section header for a new run, stamped with the wall-clock start time
    pub fn write_run_start<Tz>(&mut self, at: &DateTime<Tz>) -> io::Result<()>
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.write_entry(format_args!(
            "\n\n[STARTTIME]:\t{}\n",
            at.format("%d/%m/%Y - %H:%M:%S")
        ))
    }

    pub fn write_paused(&mut self, elapsed: Duration) -> io::Result<()> {
        self.write_entry(format_args!("[PAUSED]:\t{}\n", format_duration(elapsed)))
    }

    pub fn write_final(&mut self, elapsed: Duration) -> io::Result<()> {
        self.write_entry(format_args!("[FINAL]:\t{}\n", format_duration(elapsed)))
    }

    pub fn write_split(&mut self, split: &SplitRecord) -> io::Result<()> {
        let (elapsed, delta) = format_pair(split.elapsed, split.delta);
        self.write_entry(format_args!(
            "[SPLIT{}]:\t{}\t{}\n",
            split.index, elapsed, delta
        ))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_entry(&mut self, entry: std::fmt::Arguments<'_>) -> io::Result<()> {
        self.out.write_fmt(entry)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn written(log: RunLog<Vec<u8>>) -> String {
        String::from_utf8(log.into_inner()).unwrap()
    }

    #[test]
    fn run_start_header_uses_day_first_date() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 2).unwrap();
        let mut log = RunLog::new(Vec::new());
        log.write_run_start(&at).unwrap();

        assert_eq!(written(log), "\n\n[STARTTIME]:\t07/03/2024 - 09:05:02\n");
    }

    #[test]
    fn run_start_header_keeps_local_wall_time() {
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();
        let at = offset.with_ymd_and_hms(2031, 12, 31, 23, 59, 59).unwrap();
        let mut log = RunLog::new(Vec::new());
        log.write_run_start(&at).unwrap();

        assert_eq!(written(log), "\n\n[STARTTIME]:\t31/12/2031 - 23:59:59\n");
    }

    #[test]
    fn pause_final_and_split_lines() {
        let mut log = RunLog::new(Vec::new());
        log.write_paused(Duration::from_millis(1_000)).unwrap();
        log.write_split(&SplitRecord {
            index: 1,
            elapsed: Duration::from_millis(3_600_500),
            delta: Duration::from_millis(2_600_500),
        })
        .unwrap();
        log.write_final(Duration::from_millis(3_700_000)).unwrap();

        assert_eq!(
            written(log),
            "[PAUSED]:\t00:01.000\n\
             [SPLIT1]:\t1:00:00.500\t0:43:20.500\n\
             [FINAL]:\t1:01:40.000\n"
        );
    }

    #[test]
    fn open_appends_to_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.log");
        std::fs::write(&path, "earlier run\n").unwrap();

        let mut log = RunLog::open(&path).unwrap();
        log.write_final(Duration::from_millis(42)).unwrap();
        drop(log);

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "earlier run\n[FINAL]:\t00:00.042\n"
        );
    }
}
