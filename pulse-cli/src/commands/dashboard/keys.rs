use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use pulse_agent::CancellationToken;
use tokio::task::{self, JoinHandle};
use tracing::info;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

pub fn is_quit_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
}

/// The single keyboard subscriber of a session. Every key but `q`/`Q` is ignored.
pub fn spawn_quit_listener(cancel: CancellationToken) -> JoinHandle<io::Result<()>> {
    task::spawn_blocking(move || subscribe(&cancel, terminal_event))
}

/// Next terminal event, or `None` once `timeout` passes without one.
fn terminal_event(timeout: Duration) -> io::Result<Option<Event>> {
    if event::poll(timeout)? {
        event::read().map(Some)
    } else {
        Ok(None)
    }
}

/// Runs the quit listener over `next_event`.
///
/// Polls with a short timeout so it notices cancellation from other sources.
/// A failing input device cancels the session, since nothing could quit it anymore.
fn subscribe<F>(cancel: &CancellationToken, next_event: F) -> io::Result<()>
where
    F: FnMut(Duration) -> io::Result<Option<Event>>,
{
    let result = listen(cancel, next_event);
    if result.is_err() {
        cancel.cancel();
    }
    result
}

fn listen<F>(cancel: &CancellationToken, mut next_event: F) -> io::Result<()>
where
    F: FnMut(Duration) -> io::Result<Option<Event>>,
{
    while !cancel.is_cancelled() {
        if let Some(Event::Key(key)) = next_event(POLL_TIMEOUT)? {
            if is_quit_key(&key) && cancel.cancel() {
                info!("quit key pressed");
            }
        }
    }
    Ok(())
}
