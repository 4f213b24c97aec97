//! TUI entrypoint: plots each scenario's trace as a figure of three charts
//! (V over t, w over t, V-w phase plane).
//! Controls: [s] Step, [r] Run/Pause, [f] Finish, [x] Restart,
//! [n]/[p] Next/Previous figure, [q] Quit

mod app;
mod backend;
mod plot;
mod ui;

use anyhow::{bail, Context, Result};
use app::App;
use backend::CoreBackend;
use clap::Parser;
use ui::draw;

use std::io;
use std::time::{Duration, Instant};

use adex_core::units::{to_mv, to_na, to_ms};
use adex_core::{ScenarioRunner, ScenarioTable, SimContext, TraceSummary};
use crossterm::{
    event::{self, Event as CEvent, KeyCode},
    execute, terminal,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "adex-tui")]
#[command(about = "Integrate AdEx neuron scenarios and plot V, w and the V-w phase plane", long_about = None)]
struct Cli {
    /// Integration step (ms)
    #[arg(long, default_value_t = 0.1)]
    dt_ms: f64,

    /// Simulated duration (ms)
    #[arg(long, default_value_t = 600.0)]
    duration_ms: f64,

    /// Only run the named scenario (e.g. "TI spiking")
    #[arg(short, long)]
    scenario: Option<String>,

    /// Integration steps per animation frame
    #[arg(long, default_value_t = 50)]
    steps_per_frame: usize,

    /// Run every scenario to completion and print a summary instead of plotting
    #[arg(long)]
    summary: bool,
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "adex_core=info,adex_tui=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn fmt_ms(t: Option<f64>) -> String {
    t.map(|t| format!("{:.1} ms", to_ms(t))).unwrap_or_else(|| "-".into())
}

/// One line of `--summary` output.
fn summary_line(name: &str, s: &TraceSummary) -> String {
    let (v, w) = s
        .final_state
        .map(|st| (to_mv(st.v), to_na(st.w)))
        .unwrap_or((f64::NAN, f64::NAN));
    let max_w = s.max_w.map(to_na).unwrap_or(f64::NAN);
    format!(
        "{:<14} samples={} spikes={} first={} mean_isi={} final V={:.2} mV w={:.4} nA max w={:.4} nA",
        name,
        s.samples,
        s.spike_count,
        fmt_ms(s.first_spike),
        fmt_ms(s.mean_isi),
        v,
        w,
        max_w
    )
}

fn print_summary(runner: &ScenarioRunner, table: &ScenarioTable) -> Result<()> {
    let mut failed = 0;
    for run in runner.run_all(table) {
        match run.outcome {
            Ok(trace) => println!("{}", summary_line(&run.name, &trace.summary())),
            Err(e) => {
                failed += 1;
                println!("{:<14} aborted: {}", run.name, e);
            }
        }
    }
    if failed > 0 {
        bail!("{} scenario(s) failed", failed);
    }
    Ok(())
}

fn restore_terminal() -> Result<()> {
    terminal::disable_raw_mode()?;
    // Leave alternate screen and show cursor
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    Ok(())
}

fn run_tui(mut app: App<CoreBackend>) -> Result<()> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Ensure terminal is restored on panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        default_hook(panic_info);
    }));

    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    let result = (|| -> Result<()> {
        loop {
            draw(&mut terminal, &app)?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::from_millis(0));

            if event::poll(timeout)? {
                if let CEvent::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Char('s') => app.step(),
                        KeyCode::Char('r') => app.toggle_running(),
                        KeyCode::Char('f') => app.finish(),
                        KeyCode::Char('x') => app.restart(),
                        KeyCode::Char('n') | KeyCode::Right => app.next_figure(),
                        KeyCode::Char('p') | KeyCode::Left => app.prev_figure(),
                        _ => {}
                    }
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if app.running {
                    app.step();
                }
                last_tick = Instant::now();
            }
        }
        Ok(())
    })();

    // Cleanup
    restore_terminal()?;
    result
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let schedule = SimContext::from_ms(cli.dt_ms, cli.duration_ms).context("invalid schedule")?;
    let runner = ScenarioRunner::new(schedule);
    let table = match &cli.scenario {
        Some(name) => ScenarioTable::reference().only(name)?,
        None => ScenarioTable::reference(),
    };

    if cli.summary {
        init_logging();
        return print_summary(&runner, &table);
    }

    let figures = table
        .iter()
        .map(|s| CoreBackend::new(s.clone(), &runner).with_context(|| format!("scenario {}", s.name)))
        .collect::<Result<Vec<_>>>()?;
    if figures.is_empty() {
        bail!("no scenarios to plot");
    }

    run_tui(App::new(figures, cli.steps_per_frame))
}
