use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

pub type DashboardTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw-mode alternate screen, restored when dropped (panics included).
pub struct TerminalGuard {
    terminal: DashboardTerminal,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let terminal = (|| -> io::Result<DashboardTerminal> {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            terminal.hide_cursor()?;
            terminal.clear()?;
            Ok(terminal)
        })();
        match terminal {
            Ok(terminal) => {
                install_panic_hook();
                Ok(Self { terminal })
            }
            Err(e) => {
                restore();
                Err(e)
            }
        }
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore();
    }
}

fn restore() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

// Leave the alternate screen before the panic message is printed, or it is lost.
fn install_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        restore();
        previous(info);
    }));
}

/// Whatever owns the terminal the dashboard draws into.
pub trait Screen {
    type Backend: Backend;

    fn terminal_mut(&mut self) -> &mut Terminal<Self::Backend>;
}

impl Screen for TerminalGuard {
    type Backend = CrosstermBackend<Stdout>;

    fn terminal_mut(&mut self) -> &mut DashboardTerminal {
        &mut self.terminal
    }
}

impl<B: Backend> Screen for Terminal<B> {
    type Backend = B;

    fn terminal_mut(&mut self) -> &mut Terminal<B> {
        self
    }
}
