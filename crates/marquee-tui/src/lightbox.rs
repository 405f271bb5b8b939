//! Full-screen image gallery cursor.

/// Position within a non-empty gallery. Stepping wraps at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lightbox {
    len: usize,
    index: usize,
}

impl Lightbox {
    /// Opens the gallery at `start`, or returns `None` for an empty gallery.
    #[must_use]
    pub fn open(len: usize, start: usize) -> Option<Self> {
        (len > 0).then(|| Self {
            len,
            index: start.min(len.saturating_sub(1)),
        })
    }

    /// Current image index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of images.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the gallery has no images.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Shows the next image, wrapping to the first.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn next(&mut self) {
        self.index = (self.index + 1) % self.len;
    }

    /// Shows the previous image, wrapping to the last.
    #[allow(clippy::arithmetic_side_effects)]
    pub const fn prev(&mut self) {
        self.index = if self.index == 0 {
            self.len - 1
        } else {
            self.index - 1
        };
    }

    /// One-based position label, e.g. `"2 / 5"`.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn position(&self) -> String {
        format!("{} / {}", self.index + 1, self.len)
    }
}
