//! Raw-mode terminal lifecycle.
//!
//! [`TerminalGuard`] owns the alternate screen for as long as it lives and
//! restores the terminal when dropped, so every exit path (normal return,
//! `?` error, panic) leaves the user's shell usable.

use std::io::{self, Stdout};
use std::panic;
use std::sync::Once;

use crossterm::{
    ExecutableCommand,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

static PANIC_HOOK: Once = Once::new();

pub struct TerminalGuard {
    terminal: AppTerminal,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        setup_panic_hook();
        enable_raw_mode()?;
        or_restore(io::stdout().execute(EnterAlternateScreen).map(drop), restore)?;
        tracing::debug!("terminal entered raw mode");

        let terminal = or_restore(Terminal::new(CrosstermBackend::new(io::stdout())), restore)?;
        Ok(Self { terminal })
    }

    pub fn terminal(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = restore() {
            tracing::warn!(error = %err, "failed to restore terminal");
        } else {
            tracing::debug!("terminal restored");
        }
    }
}

pub fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Pass `result` through, running `undo` first when it is an error. Covers
/// set-up steps that fail before a guard exists to do the restoring.
fn or_restore<T>(result: io::Result<T>, undo: impl FnOnce() -> io::Result<()>) -> io::Result<T> {
    if let Err(err) = &result {
        if let Err(undo_err) = undo() {
            tracing::warn!(error = %err, %undo_err, "failed to restore terminal after set-up error");
        }
    }
    result
}

fn setup_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let original_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = io::stdout().execute(LeaveAlternateScreen);
            original_hook(panic_info);
        }));
    });
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn failed_setup_step_restores_the_terminal() {
        let restored = Cell::new(false);
        let result: io::Result<()> = or_restore(Err(io::Error::other("no tty")), || {
            restored.set(true);
            Ok(())
        });

        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn successful_setup_step_leaves_the_terminal_alone() {
        let restored = Cell::new(false);
        let result = or_restore(Ok(7), || {
            restored.set(true);
            Ok(())
        });

        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }

    #[test]
    fn setup_error_survives_a_failing_restore() {
        let result: io::Result<()> = or_restore(Err(io::Error::other("no tty")), || {
            Err(io::Error::other("still raw"))
        });

        assert_eq!(result.unwrap_err().to_string(), "no tty");
    }
}
