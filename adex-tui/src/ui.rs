// TUI rendering: one figure per scenario.
// Left column: V over t (top) and w over t (bottom, same time axis).
// Right column: V-w phase plane. Bottom: status panel.

use std::io::Stdout;

use adex_core::units::to_ms;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Terminal,
};

use crate::app::App;
use crate::backend::SimBackend;
use crate::plot::{self, VOLTAGE_CEILING_MV};

fn axis_labels(b: [f64; 2]) -> Vec<Span<'static>> {
    let mid = 0.5 * (b[0] + b[1]);
    vec![
        Span::raw(format!("{:.1}", b[0])),
        Span::raw(format!("{:.1}", mid)),
        Span::raw(format!("{:.1}", b[1])),
    ]
}

fn line_chart<'a>(
    data: &'a [(f64, f64)],
    color: Color,
    x: (&'a str, [f64; 2]),
    y: (&'a str, [f64; 2]),
) -> Chart<'a> {
    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data);
    Chart::new(vec![dataset])
        .block(Block::default().borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .title(x.0)
                .style(Style::default().fg(Color::Gray))
                .bounds(x.1)
                .labels(axis_labels(x.1)),
        )
        .y_axis(
            Axis::default()
                .title(y.0)
                .style(Style::default().fg(Color::Gray))
                .bounds(y.1)
                .labels(axis_labels(y.1)),
        )
}

/// Draws the current figure and the status line.
pub fn draw<B: SimBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &App<B>,
) -> anyhow::Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Percentage(85), Constraint::Percentage(15)].as_ref())
            .split(f.size());

        let Some(fig) = app.figure() else {
            let empty = Paragraph::new("no scenarios")
                .block(Block::default().title("Status").borders(Borders::ALL));
            f.render_widget(empty, chunks[0]);
            return;
        };

        let trace = fig.trace();
        let v = plot::voltage_series(trace, VOLTAGE_CEILING_MV);
        let w = plot::adaptation_series(trace);
        let phase = plot::phase_series(trace, VOLTAGE_CEILING_MV);

        // Time axis spans the whole schedule so the traces grow left to right.
        let t_bounds = [0.0, to_ms(fig.schedule().duration()).max(f64::EPSILON)];
        let v_bounds = plot::bounds(&v, plot::Axis::Y);
        let w_bounds = plot::bounds(&w, plot::Axis::Y);

        let figure = Block::default()
            .title(format!("{}  ({}/{})", fig.name(), app.current + 1, app.figures.len()))
            .borders(Borders::ALL);
        let inner = figure.inner(chunks[0]);
        f.render_widget(figure, chunks[0]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(inner);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
            .split(columns[0]);

        f.render_widget(line_chart(&v, Color::Cyan, ("", t_bounds), ("V [mV]", v_bounds)), left[0]);
        f.render_widget(
            line_chart(&w, Color::Yellow, ("t [ms]", t_bounds), ("w [nA]", w_bounds)),
            left[1],
        );
        f.render_widget(
            line_chart(&phase, Color::Magenta, ("V [mV]", v_bounds), ("w [nA]", w_bounds)),
            columns[1],
        );

        let mut status = format!(
            "t: {:.1} / {:.1} ms | Spikes: {} | Running: {} | Controls: [s] Step  [r] Run/Pause  [f] Finish  [x] Restart  [n]/[p] Figure  [q] Quit",
            to_ms(fig.schedule().time()),
            to_ms(fig.schedule().duration()),
            trace.spike_count(),
            if app.running { "yes" } else { "no" }
        );
        if let Some(msg) = &app.message {
            status.push_str(" | ");
            status.push_str(msg);
        }
        let status_widget = Paragraph::new(status)
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(status_widget, chunks[1]);
    })?;
    Ok(())
}
