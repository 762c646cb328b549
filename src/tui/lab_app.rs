//! Lab TUI application state and logic.
//!
//! Terminal I/O is handled by the `lab-tui` binary; key handling, slider
//! limits and frame stepping live here so they can be tested headless.

use crossterm::event::KeyCode;

use tracing::warn;

use crate::config::LabConfig;
use crate::lab::Lab;
use crate::scenarios::{limits, ScenarioControl, ScenarioKind};

/// Application state for the lab TUI.
#[derive(Debug, Clone)]
pub struct LabApp {
    /// The three scenarios.
    pub lab: Lab,
    /// Index into the active scenario's parameter names.
    pub selected_param: usize,
    /// Frame period (ms).
    pub frame_ms: u64,
    /// Frame counter.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl LabApp {
    /// App with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(&LabConfig::default())
    }

    /// App built from a configuration.
    #[must_use]
    pub fn from_config(config: &LabConfig) -> Self {
        Self {
            lab: Lab::from_config(config),
            selected_param: 0,
            frame_ms: config.tui.frame_ms,
            frame_count: 0,
            should_quit: false,
        }
    }

    /// Advance one frame.
    pub fn update(&mut self) {
        self.lab.frame();
        self.frame_count += 1;
    }

    /// The scenario on screen.
    #[must_use]
    pub fn current(&self) -> &dyn ScenarioControl {
        self.lab.current()
    }

    /// Name of the highlighted parameter.
    #[must_use]
    pub fn selected_parameter(&self) -> &'static str {
        let names = self.current().parameter_names();
        names[self.selected_param % names.len()]
    }

    /// Switch scenario; the parameter cursor returns to the top.
    pub fn select(&mut self, kind: ScenarioKind) {
        self.lab.select(kind);
        self.selected_param = 0;
    }

    /// Nudge the highlighted parameter by `steps` slider increments.
    pub fn adjust_selected(&mut self, steps: f64) {
        let name = self.selected_parameter();
        let scenario = self.lab.current_mut();
        let (Some(range), Some(value)) = (limits::for_parameter(name), scenario.parameter(name))
        else {
            return;
        };
        if let Err(e) = scenario.set_parameter(name, range.nudge(value, steps)) {
            warn!(error = %e, "slider update rejected");
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        let count = self.current().parameter_names().len();
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => self.lab.current_mut().toggle(),
            KeyCode::Char('r') => self.lab.current_mut().reset(),
            KeyCode::Tab => self.select(self.lab.active().next()),
            KeyCode::Char('1') => self.select(ScenarioKind::Pendulum),
            KeyCode::Char('2') => self.select(ScenarioKind::Incline),
            KeyCode::Char('3') => self.select(ScenarioKind::Bounce),
            KeyCode::Up => self.selected_param = (self.selected_param + count - 1) % count,
            KeyCode::Down => self.selected_param = (self.selected_param + 1) % count,
            KeyCode::Left => self.adjust_selected(-1.0),
            KeyCode::Right => self.adjust_selected(1.0),
            _ => {}
        }
    }
}

impl Default for LabApp {
    fn default() -> Self {
        Self::new()
    }
}
