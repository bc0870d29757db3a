//! Terminal capability detection and styling

use owo_colors::{OwoColorize, colors::css};

/// Detects whether colored output should be enabled
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Text styling that is either colored or passed through unchanged.
///
/// The shell writes to arbitrary writers, so the decision is made once up
/// front rather than per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    color: bool,
}

impl Style {
    /// Colored if stdout supports it
    pub fn detect() -> Self {
        if supports_color() {
            Self { color: true }
        } else {
            Self::plain()
        }
    }

    /// Never colored
    pub const fn plain() -> Self {
        Self { color: false }
    }

    /// Color as success (green)
    pub fn success(self, text: &str) -> String {
        if self.color {
            text.fg::<css::Green>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Color as warning (amber)
    pub fn warning(self, text: &str) -> String {
        if self.color {
            text.fg::<css::Orange>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Color as info (blue)
    pub fn info(self, text: &str) -> String {
        if self.color {
            text.fg::<css::LightBlue>().to_string()
        } else {
            text.to_string()
        }
    }

    /// Dim the text
    pub fn dim(self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_style_passes_text_through() {
        let style = Style::plain();
        assert_eq!(style.success("ok"), "ok");
        assert_eq!(style.warning("careful"), "careful");
        assert_eq!(style.info("note"), "note");
        assert_eq!(style.dim("quiet"), "quiet");
    }

    #[test]
    fn colored_style_wraps_text() {
        let style = Style { color: true };
        let styled = style.success("ok");
        assert_ne!(styled, "ok");
        assert!(styled.contains("ok"));
    }
}
