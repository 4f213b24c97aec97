// Application state for the TUI: one figure per scenario, animated by
// stepping the current figure's backend.

use crate::backend::SimBackend;

pub struct App<B: SimBackend> {
    pub figures: Vec<B>,
    pub current: usize,
    pub steps_per_frame: usize,
    pub running: bool,
    /// Last restart failure, shown in the status line.
    pub message: Option<String>,
}

impl<B: SimBackend> App<B> {
    pub fn new(figures: Vec<B>, steps_per_frame: usize) -> Self {
        Self {
            figures,
            current: 0,
            steps_per_frame: steps_per_frame.max(1),
            running: false,
            message: None,
        }
    }

    pub fn figure(&self) -> Option<&B> {
        self.figures.get(self.current)
    }

    fn figure_mut(&mut self) -> Option<&mut B> {
        self.figures.get_mut(self.current)
    }

    pub fn toggle_running(&mut self) {
        self.running = !self.running;
    }

    /// Advance the current figure by one frame's worth of steps. Running
    /// stops by itself when the figure's schedule is exhausted.
    pub fn step(&mut self) {
        let steps = self.steps_per_frame;
        let done = match self.figure_mut() {
            Some(fig) => {
                fig.advance(steps);
                fig.is_done()
            }
            None => true,
        };
        if done {
            self.running = false;
        }
    }

    pub fn finish(&mut self) {
        if let Some(fig) = self.figure_mut() {
            fig.finish();
        }
        self.running = false;
    }

    pub fn restart(&mut self) {
        let result = self.figure_mut().map(|fig| fig.restart());
        self.message = match result {
            Some(Err(e)) => Some(format!("restart failed: {}", e)),
            _ => None,
        };
    }

    pub fn next_figure(&mut self) {
        if !self.figures.is_empty() {
            self.current = (self.current + 1) % self.figures.len();
            self.running = false;
        }
    }

    pub fn prev_figure(&mut self) {
        if !self.figures.is_empty() {
            self.current = (self.current + self.figures.len() - 1) % self.figures.len();
            self.running = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CoreBackend;
    use adex_core::{ScenarioRunner, ScenarioTable, SimContext};

    fn app(steps_per_frame: usize) -> App<CoreBackend> {
        let runner = ScenarioRunner::new(SimContext::from_ms(0.1, 2.0).unwrap());
        let figures = ScenarioTable::reference()
            .iter()
            .map(|s| CoreBackend::new(s.clone(), &runner).unwrap())
            .collect();
        App::new(figures, steps_per_frame)
    }

    #[test]
    fn step_advances_only_the_current_figure() {
        let mut app = app(5);
        app.step();
        assert_eq!(app.figures[0].trace().len(), 6);
        assert_eq!(app.figures[1].trace().len(), 1);
    }

    #[test]
    fn running_stops_at_end_of_schedule() {
        let mut app = app(15);
        app.toggle_running();
        app.step();
        assert!(app.running);
        app.step();
        assert!(!app.running);
        assert!(app.figure().unwrap().is_done());
    }

    #[test]
    fn figure_navigation_wraps() {
        let mut app = app(1);
        app.prev_figure();
        assert_eq!(app.current, 1);
        app.next_figure();
        assert_eq!(app.current, 0);
        assert_eq!(app.figure().unwrap().name(), "TI spiking");
    }

    #[test]
    fn finish_and_restart() {
        let mut app = app(1);
        app.finish();
        assert_eq!(app.figures[0].trace().len(), 21);
        app.restart();
        assert_eq!(app.figures[0].trace().len(), 1);
        assert!(app.message.is_none());
    }

    #[test]
    fn zero_steps_per_frame_still_moves() {
        let mut app = app(0);
        app.step();
        assert_eq!(app.figures[0].trace().len(), 2);
    }
}
