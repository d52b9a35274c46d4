//! Raw-mode alternate screen for the panel.

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub type PanelTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal back the way the panel found it, on drop or on panic.
/// Restoring happens at most once.
pub struct TerminalGuard {
    restored: Arc<AtomicBool>,
}

impl TerminalGuard {
    fn install() -> Self {
        let restored = Arc::new(AtomicBool::new(false));

        let flag = Arc::clone(&restored);
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_once(&flag);
            default_hook(info);
        }));

        Self { restored }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_once(&self.restored);
    }
}

/// Leave the panel screen unless that already happened. Returns whether it
/// ran.
fn restore_once(restored: &AtomicBool) -> bool {
    if restored.swap(true, Ordering::SeqCst) {
        return false;
    }
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
    true
}

/// Enter raw mode on a cleared alternate screen with the cursor hidden.
///
/// The guard is armed before the terminal is touched, so a failure half-way
/// through still leaves the shell usable.
pub fn setup_terminal() -> io::Result<(PanelTerminal, TerminalGuard)> {
    let guard = TerminalGuard::install();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Clear(ClearType::All), Hide)?;

    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok((terminal, guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn already_restored_terminal_is_left_alone() {
        let restored = AtomicBool::new(true);
        assert!(!restore_once(&restored));
        assert!(restored.load(Ordering::SeqCst));
    }
}
