//! Command-line surface and entry-point selection.

use clap::Parser;

use crate::mode::Mode;

/// A modal, keyboard-driven pointer control daemon.
#[derive(Debug, Parser)]
#[command(name = "keywarp", version, about)]
pub struct Args {
    /// Print the key names the active backend recognises and exit.
    #[arg(short = 'l', long)]
    pub list_keys: bool,

    /// Stay attached to the terminal instead of daemonizing.
    #[arg(short, long)]
    pub foreground: bool,

    /// Run hint mode once and exit.
    #[arg(long, group = "oneshot")]
    pub hint: bool,

    /// Run normal mode once and exit.
    #[arg(long, group = "oneshot")]
    pub normal: bool,

    /// Run grid mode once and exit.
    #[arg(long, group = "oneshot")]
    pub grid: bool,
}

/// Which of the program's entry points the arguments select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entry {
    /// Print recognised key names and exit.
    ListKeys,
    /// Run one mode to completion, then exit.
    Oneshot(Mode),
    /// The persistent daemon path.
    Daemon { foreground: bool },
}

impl Args {
    /// Entry selection: listing keys wins over the oneshot flags, which
    /// win over the daemon default.
    pub fn entry(&self) -> Entry {
        if self.list_keys {
            Entry::ListKeys
        } else if self.hint {
            Entry::Oneshot(Mode::Hint)
        } else if self.normal {
            Entry::Oneshot(Mode::Normal)
        } else if self.grid {
            Entry::Oneshot(Mode::Grid)
        } else {
            Entry::Daemon {
                foreground: self.foreground,
            }
        }
    }
}
