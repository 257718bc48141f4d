//! Terminal detection for stdout.

use crossterm::terminal;
use crossterm::tty::IsTty;

/// What the CLI knows about its standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TerminalInfo {
    /// Whether stdout is attached to a terminal.
    pub is_terminal: bool,
    /// Terminal width in columns when known.
    pub width: Option<u16>,
}

impl TerminalInfo {
    /// Inspects the process's stdout.
    #[must_use]
    pub fn detect() -> Self {
        let is_terminal = std::io::stdout().is_tty();
        let width = if is_terminal {
            terminal::size().ok().map(|(columns, _)| columns)
        } else {
            None
        };
        Self { is_terminal, width }
    }

    /// A non-interactive sink, as used for pipes and tests.
    #[must_use]
    pub const fn piped() -> Self {
        Self {
            is_terminal: false,
            width: None,
        }
    }

    /// An interactive terminal of the given width.
    #[must_use]
    pub const fn interactive(width: u16) -> Self {
        Self {
            is_terminal: true,
            width: Some(width),
        }
    }
}
