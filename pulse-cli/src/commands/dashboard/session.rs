use std::future::Future;
use std::io;
use std::mem;
use std::time::Duration;

use pulse_agent::pump::{self, PumpReport};
use pulse_agent::{CancellationToken, Sample, SamplingError, Sink};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tokio::{signal, task};
use tracing::{debug, error, warn};
use tui::{backend::Backend, Terminal};

use super::keys::spawn_quit_listener;
use super::layout::{self, Board};
use crate::utils::terminal::Screen;

/// Everything one dashboard run owns: the terminal, the stop signal and the pumps.
///
/// Dropping a session cancels it and aborts any pump still running before the
/// terminal is released. [`Session::shutdown`] does the same but waits for them.
pub struct Session<S: Screen> {
    cancel: CancellationToken,
    pumps: Vec<JoinHandle<PumpReport>>,
    keyboard: Option<JoinHandle<io::Result<()>>>,
    screen: S,
}

impl<S: Screen> Session<S> {
    pub fn new(screen: S) -> Self {
        Self {
            cancel: CancellationToken::new(),
            pumps: Vec::new(),
            keyboard: None,
            screen,
        }
    }

    #[cfg(test)]
    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn launch_pump<F>(&mut self, interval: Duration, source: F, sink: Sink)
    where
        F: FnMut() -> Result<Sample, SamplingError> + Send + 'static,
    {
        let handle = pump::spawn(interval, source, sink, self.cancel.clone());
        self.pumps.push(handle);
    }

    pub fn watch_keyboard(&mut self) {
        self.keyboard = Some(spawn_quit_listener(self.cancel.clone()));
    }

    /// Cancels the session on SIGINT. The watcher ends with the session.
    pub fn watch_interrupt(&self) {
        task::spawn(cancel_on_interrupt(self.cancel.clone(), signal::ctrl_c()));
    }

    pub async fn run(&mut self, board: &Board, redraw: Duration) -> io::Result<()> {
        let result = render_loop(self.screen.terminal_mut(), board, &self.cancel, redraw).await;
        self.cancel.cancel();
        result
    }

    /// Stops every pump and the keyboard subscriber, then releases the terminal.
    pub async fn shutdown(mut self) -> Vec<PumpReport> {
        self.cancel.cancel();

        let mut reports = Vec::with_capacity(self.pumps.len());
        for handle in mem::take(&mut self.pumps) {
            match handle.await {
                Ok(report) => reports.push(report),
                Err(e) => error!(error = %e, "pump task failed"),
            }
        }

        if let Some(keyboard) = self.keyboard.take() {
            match keyboard.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!(error = %e, "keyboard input failed"),
                Err(e) => error!(error = %e, "keyboard task failed"),
            }
        }

        debug!(?reports, "session stopped");
        reports
    }
}

impl<S: Screen> Drop for Session<S> {
    fn drop(&mut self) {
        self.cancel.cancel();
        for handle in &self.pumps {
            handle.abort();
        }
    }
}

/// Sets `cancel` when `interrupt` fires; returns early once the session ends.
pub async fn cancel_on_interrupt<F>(cancel: CancellationToken, interrupt: F)
where
    F: Future<Output = io::Result<()>>,
{
    tokio::select! {
        res = interrupt => match res {
            Ok(()) => {
                debug!("interrupt received");
                cancel.cancel();
            }
            Err(e) => warn!(error = %e, "cannot listen for interrupts"),
        },
        _ = cancel.cancelled() => {}
    }
}

/// Redraws `board` on its own fixed schedule until `cancel` is set.
pub async fn render_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    board: &Board,
    cancel: &CancellationToken,
    redraw: Duration,
) -> io::Result<()> {
    let mut ticker = time::interval(redraw);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(()),
            _ = ticker.tick() => {
                terminal.draw(|f| layout::draw(f, board))?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_agent::{DonutSink, Metric, SparklineSink};
    use std::sync::Arc;
    use tui::backend::TestBackend;

    fn board() -> Board {
        Board {
            gauge: Arc::new(DonutSink::percent()),
            history: Arc::new(SparklineSink::new(None)),
        }
    }

    fn constant(value: u64) -> impl FnMut() -> Result<Sample, SamplingError> {
        move || Ok(Sample::capture(Metric::Cpu, value))
    }

    fn cancel_after(cancel: &CancellationToken, after: Duration) {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            time::sleep(after).await;
            cancel.cancel();
        });
    }

    #[tokio::test(start_paused = true)]
    async fn render_loop_stops_on_cancel_and_shows_sink_state() {
        let board = board();
        let mut session = Session::new(Terminal::new(TestBackend::new(100, 30)).unwrap());
        session.launch_pump(
            Duration::from_millis(80),
            constant(73),
            Sink::from(board.gauge.clone()),
        );
        cancel_after(session.cancel_token(), Duration::from_millis(900));

        session.run(&board, Duration::from_millis(250)).await.unwrap();

        let buffer = session.screen.backend().buffer().clone();
        let screen: String = buffer.content.iter().map(|c| c.symbol.as_str()).collect();
        assert!(screen.contains("73%"));
        assert!(screen.contains(layout::QUIT_TITLE));
        session.shutdown().await;
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_waits_for_every_pump() {
        let board = board();
        let mut session = Session::new(Terminal::new(TestBackend::new(60, 20)).unwrap());
        session.launch_pump(
            Duration::from_millis(100),
            constant(10),
            Sink::from(board.gauge.clone()),
        );
        session.launch_pump(
            Duration::from_millis(100),
            constant(20),
            Sink::from(board.history.clone()),
        );
        cancel_after(session.cancel_token(), Duration::from_millis(450));

        session.run(&board, Duration::from_millis(250)).await.unwrap();
        let reports = session.shutdown().await;

        assert_eq!(reports.len(), 2);
        assert!(reports.iter().all(|r| r.delivered == 4));

        let settled = board.history.len();
        time::sleep(Duration::from_millis(300)).await;
        assert_eq!(board.history.len(), settled);
    }

    #[tokio::test]
    async fn interrupt_cancels_the_session() {
        let cancel = CancellationToken::new();
        cancel_on_interrupt(cancel.clone(), std::future::ready(Ok(()))).await;
        assert!(cancel.is_cancelled());
    }

    #[tokio::test]
    async fn unavailable_interrupt_leaves_the_session_running() {
        let cancel = CancellationToken::new();
        let failed = std::future::ready(Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "no signals",
        )));
        cancel_on_interrupt(cancel.clone(), failed).await;
        assert!(!cancel.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn interrupt_watcher_ends_with_the_session() {
        let cancel = CancellationToken::new();
        let watcher = tokio::spawn(cancel_on_interrupt(
            cancel.clone(),
            std::future::pending::<io::Result<()>>(),
        ));
        cancel_after(&cancel, Duration::from_millis(50));
        time::timeout(Duration::from_secs(1), watcher)
            .await
            .expect("watcher outlived the session")
            .unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_a_session_cancels_it() {
        let board = board();
        let mut session = Session::new(Terminal::new(TestBackend::new(60, 20)).unwrap());
        session.launch_pump(
            Duration::from_millis(100),
            constant(5),
            Sink::from(board.history.clone()),
        );
        let cancel = session.cancel_token().clone();
        drop(session);

        assert!(cancel.is_cancelled());
        time::sleep(Duration::from_millis(500)).await;
        assert!(board.history.is_empty());
    }
}
