use std::sync::Arc;

use pulse_agent::{DonutSink, SparklineSink};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Gauge, Sparkline},
    Frame,
};

pub const QUIT_TITLE: &str = "PRESS Q TO QUIT";
pub const GAUGE_LABEL: &str = "CPU Percentage - localhost";
pub const SPARKLINE_LABEL: &str = "CPU Sparkline - localhost";

// A bordered widget needs one cell inside its borders.
const MIN_WIDGET_SIZE: u16 = 3;

/// The sinks the render loop reads on every redraw.
#[derive(Clone)]
pub struct Board {
    pub gauge: Arc<DonutSink>,
    pub history: Arc<SparklineSink>,
}

pub fn draw<B: Backend>(f: &mut Frame<B>, board: &Board) {
    let outer = Block::default()
        .title(Span::styled(
            QUIT_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL);
    let area = outer.inner(f.size());
    f.render_widget(outer, f.size());
    if area.width < MIN_WIDGET_SIZE || area.height < MIN_WIDGET_SIZE {
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(columns[0]);
    draw_gauge(f, board, left[0]);
    draw_sparkline(f, board, left[1]);

    let right = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(columns[1]);
    draw_gauge(f, board, right[0]);
    draw_sparkline(f, board, right[1]);
}

fn draw_gauge<B: Backend>(f: &mut Frame<B>, board: &Board, area: Rect) {
    let block = Block::default()
        .title(Span::styled(GAUGE_LABEL, Style::default().fg(Color::Green)))
        .borders(Borders::ALL);
    if is_empty(block.inner(area)) {
        return;
    }
    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(board.gauge.ratio().clamp(0.0, 1.0))
        .label(board.gauge.label());
    f.render_widget(gauge, area);
}

fn draw_sparkline<B: Backend>(f: &mut Frame<B>, board: &Board, area: Rect) {
    let block = Block::default()
        .title(Span::styled(
            SPARKLINE_LABEL,
            Style::default().fg(Color::Indexed(33)),
        ))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    if is_empty(inner) {
        return;
    }
    // Only the newest values that fit are drawn, so the line scrolls.
    let data = board.history.tail(inner.width as usize);
    let sparkline = Sparkline::default()
        .block(block)
        .data(&data)
        .style(Style::default().fg(Color::Green));
    f.render_widget(sparkline, area);
}

fn is_empty(area: Rect) -> bool {
    area.width == 0 || area.height == 0
}
