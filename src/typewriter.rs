/// Glyph-by-glyph reveal of the greeting plus the caret blink flag.
///
/// The controller only holds state; the engine owns the timers that drive
/// [`Typewriter::reveal_next`] and [`Typewriter::toggle_caret`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Typewriter {
    target: String,
    glyph_count: usize,
    revealed: usize,
    complete: bool,
    caret_visible: bool,
}

impl Typewriter {
    pub fn new(target: impl Into<String>) -> Self {
        let mut typewriter = Self {
            target: String::new(),
            glyph_count: 0,
            revealed: 0,
            complete: false,
            caret_visible: true,
        };
        typewriter.reset(target);
        typewriter
    }

    /// Starts a fresh reveal cycle. The caret keeps its current phase.
    pub fn reset(&mut self, target: impl Into<String>) {
        self.target = target.into();
        self.glyph_count = self.target.chars().count();
        self.revealed = 0;
        self.complete = self.glyph_count == 0;
    }

    /// Reveals one more glyph. Returns `true` while more glyphs remain.
    pub fn reveal_next(&mut self) -> bool {
        if self.complete {
            return false;
        }
        self.revealed += 1;
        if self.revealed >= self.glyph_count {
            self.revealed = self.glyph_count;
            self.complete = true;
        }
        !self.complete
    }

    pub fn reveal_all(&mut self) {
        self.revealed = self.glyph_count;
        self.complete = true;
    }

    pub fn toggle_caret(&mut self) {
        self.caret_visible = !self.caret_visible;
    }

    pub fn revealed_text(&self) -> &str {
        let end = self
            .target
            .char_indices()
            .nth(self.revealed)
            .map(|(byte_idx, _)| byte_idx)
            .unwrap_or(self.target.len());
        &self.target[..end]
    }

    #[cfg(test)]
    pub fn revealed_len(&self) -> usize {
        self.revealed
    }

    #[cfg(test)]
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn caret_visible(&self) -> bool {
        self.caret_visible
    }
}
