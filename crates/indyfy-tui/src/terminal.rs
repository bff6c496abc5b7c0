//! Raw mode, alternate screen and bracketed paste.
//!
//! [`TerminalGuard`] undoes everything on drop; the panic hook does the same
//! before the panic message is printed.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Restores the terminal when dropped.
pub struct TerminalGuard {
    _private: (),
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            tracing::warn!(error = %format!("{e:#}"), "terminal restore failed");
        }
    }
}

/// Takes over the terminal.
///
/// Pasted text arrives as a single event so credentials can be pasted into
/// the auth form.
///
/// # Errors
/// Returns an error if raw mode or the alternate screen cannot be entered.
pub fn enter() -> Result<(CrosstermTerminal, TerminalGuard)> {
    PANIC_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore();
            previous(info);
        }));
    });

    enable_raw_mode().context("Failed to enable raw mode")?;
    // From here on the guard owns cleanup, including on early return.
    let guard = TerminalGuard { _private: () };

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))
        .context("Failed to create terminal")?;
    Ok((terminal, guard))
}

/// Leaves the alternate screen and raw mode. Safe to call more than once.
///
/// # Errors
/// Returns an error if the alternate screen or raw mode cannot be left.
pub fn restore() -> Result<()> {
    let mut stdout = io::stdout();
    // Must happen before leaving raw mode.
    let _ = execute!(stdout, DisableBracketedPaste);
    execute!(stdout, LeaveAlternateScreen, Show).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")
}
