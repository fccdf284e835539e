mod keys;
mod layout;
mod session;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use pulse_agent::{DonutSink, HostSampler, Metric, Sampler, Sink, SparklineSink};
use tracing::info;

use crate::utils::logger::init_file_logger;
use crate::utils::paths::default_log_path;
use crate::utils::terminal::TerminalGuard;
use layout::Board;
use session::Session;

/// Denominator of the gauge in absolute mode; CPU is out of 100.
const ABSOLUTE_TOTAL: i64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GaugeMode {
    Percent,
    Absolute,
}

#[derive(Args, Debug)]
pub struct DashboardOptions {
    /// Terminal redraw period in milliseconds
    #[arg(long, default_value_t = 250, value_parser = clap::value_parser!(u64).range(1..))]
    pub redraw_interval_ms: u64,

    /// Sampling period of each widget in milliseconds (default: a third of the redraw period)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub sample_interval_ms: Option<u64>,

    /// Number of values the sparkline keeps
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u64).range(1..))]
    pub history: u64,

    #[arg(long, value_enum, default_value_t = GaugeMode::Percent)]
    pub gauge_mode: GaugeMode,

    #[arg(long, env = "PULSE_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl DashboardOptions {
    pub fn redraw_interval(&self) -> Duration {
        Duration::from_millis(self.redraw_interval_ms)
    }

    pub fn sample_interval(&self) -> Duration {
        let ms = self
            .sample_interval_ms
            .unwrap_or(self.redraw_interval_ms / 3)
            .max(1);
        Duration::from_millis(ms)
    }

    fn board(&self) -> Result<Board> {
        let gauge = match self.gauge_mode {
            GaugeMode::Percent => DonutSink::percent(),
            GaugeMode::Absolute => DonutSink::absolute(ABSOLUTE_TOTAL)?,
        };
        Ok(Board {
            gauge: Arc::new(gauge),
            history: Arc::new(SparklineSink::new(Some(
                usize::try_from(self.history).unwrap_or(usize::MAX),
            ))),
        })
    }
}

pub async fn handle_dashboard(opts: DashboardOptions) -> Result<()> {
    let log_path = opts.log_file.clone().unwrap_or_else(default_log_path);
    init_file_logger(&log_path)?;

    let terminal = TerminalGuard::enter().context("initializing terminal")?;
    let mut session = Session::new(terminal);
    let board = opts.board().context("building dashboard layout")?;

    let interval = opts.sample_interval();
    for sink in [Sink::from(board.gauge.clone()), Sink::from(board.history.clone())] {
        let sampler = HostSampler::new();
        session.launch_pump(interval, move || sampler.sample(Metric::Cpu), sink);
    }
    session.watch_keyboard();
    session.watch_interrupt();
    info!(
        sample_interval = ?interval,
        redraw_interval = ?opts.redraw_interval(),
        gauge_mode = ?opts.gauge_mode,
        "dashboard started"
    );

    let result = session.run(&board, opts.redraw_interval()).await;
    let reports = session.shutdown().await;
    info!(?reports, "dashboard stopped");
    result.context("drawing dashboard")
}
