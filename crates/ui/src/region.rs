//! Idempotent region writes.
//!
//! Every e-paper write is a visible refresh. [`RenderedContent`] remembers the
//! last content that actually reached the panel for one region and swallows
//! writes that would not change it.

use platform::{DisplayError, Region, Surface};

/// Last-written content of one display region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedContent {
    last: Option<String>,
}

impl RenderedContent {
    /// Nothing written yet; the first write always goes through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Content currently on the panel, if anything was written.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// `true` if writing `content` would change the panel.
    pub fn needs_write(&self, content: &str) -> bool {
        self.last.as_deref() != Some(content)
    }

    /// Forget the cached content so the next write goes through.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Write `content` to `region` unless it is already showing.
    ///
    /// Returns `Ok(true)` when a physical write happened. The cache is only
    /// updated after the surface accepted the write, so a failed write is
    /// retried by the next render.
    pub fn write_if_changed<S: Surface + ?Sized>(
        &mut self,
        surface: &S,
        region: Region,
        content: &str,
    ) -> Result<bool, DisplayError> {
        if !self.needs_write(content) {
            tracing::trace!(%region, "content unchanged, skipping write");
            return Ok(false);
        }
        surface.write(region, content)?;
        self.last = Some(content.to_owned());
        Ok(true)
    }
}
