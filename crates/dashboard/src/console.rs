//! Text surface for running without a panel.

use std::io::{self, Stdout, Write};
use std::sync::{Mutex, MutexGuard, PoisonError};

use platform::{DisplayError, Region, Surface};

/// Writes every region update as a block:
///
/// ```text
/// [time]
///   08:15
/// ```
///
/// Blackouts print a single marker line.
#[derive(Debug)]
pub struct ConsoleSurface<W = Stdout> {
    out: Mutex<W>,
}

impl ConsoleSurface<Stdout> {
    /// Surface on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> ConsoleSurface<W> {
    /// Surface on any writer.
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
        }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn out(&self) -> MutexGuard<'_, W> {
        self.out.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Surface for ConsoleSurface<W> {
    fn write(&self, region: Region, content: &str) -> Result<(), DisplayError> {
        let mut out = self.out();
        writeln!(out, "[{region}]")?;
        for line in content.lines() {
            writeln!(out, "  {line}")?;
        }
        out.flush()?;
        Ok(())
    }

    fn set_blackout(&self, active: bool) -> Result<(), DisplayError> {
        let mut out = self.out();
        writeln!(out, "[blackout {}]", if active { "on" } else { "off" })?;
        out.flush()?;
        Ok(())
    }
}
