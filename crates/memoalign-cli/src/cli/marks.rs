//! Status marks printed in front of report lines.

use std::fmt;

use console::style;

/// Outcome marker for a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    /// Timestamp applied, or run finished cleanly.
    Done,
    /// A step in progress.
    Step,
    /// Nothing to do, or only partly done.
    Partial,
    /// Video or document could not be handled.
    Failed,
    /// Entry in a list of documents.
    Entry,
}

impl Mark {
    fn glyph(self) -> &'static str {
        match self {
            Self::Done => "✓",
            Self::Step => "→",
            Self::Partial => "!",
            Self::Failed => "✗",
            Self::Entry => "•",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let glyph = style(self.glyph());
        let styled = match self {
            Self::Done => glyph.green(),
            Self::Step => glyph.cyan(),
            Self::Partial => glyph.yellow(),
            Self::Failed => glyph.red(),
            Self::Entry => glyph.dim(),
        };
        write!(f, "{}", styled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marks_render_their_glyph() {
        for (mark, glyph) in [
            (Mark::Done, "✓"),
            (Mark::Step, "→"),
            (Mark::Partial, "!"),
            (Mark::Failed, "✗"),
            (Mark::Entry, "•"),
        ] {
            assert!(mark.to_string().contains(glyph));
        }
    }
}
