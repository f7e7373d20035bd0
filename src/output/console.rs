//! Live single-line console readout

use std::{io::{self, Write}, time::Duration};

use crossterm::{
    queue,
    terminal::{Clear, ClearType},
};

use crate::{
    state::SplitRecord,
    utils::{format_duration, format_pair},
};

/// Redraws the current terminal line in place
#[derive(Debug)]
pub struct ConsoleRenderer<W: Write> {
    out: W,
}

impl<W: Write> ConsoleRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Overwrite the current line with the elapsed value
    pub fn render_elapsed(&mut self, elapsed: Duration) -> io::Result<()> {
        self.clear_line()?;
        write!(self.out, "{}", format_duration(elapsed))?;
        self.out.flush()
    }

    /// Print a split on its own line, then resume the live line at its value
    pub fn render_split(&mut self, split: &SplitRecord) -> io::Result<()> {
        let (elapsed, delta) = format_pair(split.elapsed, split.delta);
        self.clear_line()?;
        writeln!(self.out, "[SPLIT{}]:\t{}\t{}", split.index, elapsed, delta)?;
        self.render_elapsed(split.elapsed)
    }

    /// Leave the live line and print the exit notice
    pub fn render_exit(&mut self) -> io::Result<()> {
        writeln!(self.out, "\nExiting.")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn clear_line(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::CurrentLine))?;
        write!(self.out, "\r")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(renderer: ConsoleRenderer<Vec<u8>>) -> String {
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn elapsed_overwrites_current_line() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer.render_elapsed(Duration::from_millis(61_250)).unwrap();

        assert_eq!(rendered(renderer), "\x1b[2K\r01:01.250");
    }

    #[test]
    fn split_gets_its_own_line() {
        let mut renderer = ConsoleRenderer::new(Vec::new());
        renderer
            .render_split(&SplitRecord {
                index: 3,
                elapsed: Duration::from_millis(4_000),
                delta: Duration::from_millis(1_500),
            })
            .unwrap();

        assert_eq!(
            rendered(renderer),
            "\x1b[2K\r[SPLIT3]:\t00:04.000\t00:01.500\n\x1b[2K\r00:04.000"
        );
    }
}
