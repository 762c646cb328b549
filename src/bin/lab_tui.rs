//! mechlab lab - Terminal User Interface
//!
//! Scene canvas and live energy chart for the three scenarios using ratatui.
//! App logic lives in `mechlab::tui::lab_app`.
//!
//! Usage: `lab-tui [config.yaml]`

#![forbid(unsafe_code)]

#[cfg(feature = "tui")]
fn main() -> std::io::Result<()> {
    use mechlab::config::LabConfig;
    use mechlab::tui::LabApp;

    let app = match std::env::args().nth(1) {
        Some(path) => match LabConfig::load(&path) {
            Ok(config) => LabApp::from_config(&config),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
        None => LabApp::new(),
    };
    tui::run(app)
}

#[cfg(not(feature = "tui"))]
fn main() {
    eprintln!("TUI feature not enabled. Run with --features tui");
    std::process::exit(1);
}

#[cfg(feature = "tui")]
mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use mechlab::scenarios::{ScenarioControl, ScenarioKind};
    use mechlab::tui::LabApp;
    use mechlab::visualization::EnergySeries;
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        symbols::Marker,
        text::{Line, Span},
        widgets::{
            canvas::{Canvas, Circle, Context, Line as CanvasLine},
            Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Tabs,
        },
        Frame, Terminal,
    };
    use std::io;
    use std::time::{Duration, Instant};

    /// Run the TUI application.
    pub fn run(mut app: LabApp) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(app.frame_ms);

        loop {
            let start = Instant::now();
            terminal.draw(|f| ui(f, &app))?;

            let timeout = tick_rate.saturating_sub(start.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit {
                break;
            }

            app.update();
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn ui(f: &mut Frame, app: &LabApp) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(12),
            ])
            .split(f.area());

        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        render_tabs(f, rows[0], app);
        render_scene(f, middle[0], app);
        render_status(f, middle[1], app);
        render_energy_chart(f, rows[2], app);
    }

    fn render_tabs(f: &mut Frame, area: Rect, app: &LabApp) {
        let titles: Vec<Line> = ScenarioKind::ALL
            .iter()
            .map(|k| Line::from(format!("{} {}", k.index() + 1, k.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(app.lab.active().index())
            .block(Block::default().borders(Borders::ALL).title(
                "[Space] Start/Pause  [R] Reset  [Tab/1-3] Scenario  [↑↓] Select  [←→] Adjust  [Q] Quit",
            ))
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            );
        f.render_widget(tabs, area);
    }

    fn render_scene(f: &mut Frame, area: Rect, app: &LabApp) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(app.lab.active().title());
        match app.lab.active() {
            ScenarioKind::Pendulum => {
                let sim = app.lab.pendulum();
                let length = sim.params().length;
                let (x, y) = sim.state().bob_position(length);
                let reach = length + 0.5;
                let canvas = Canvas::default()
                    .block(block)
                    .x_bounds([-reach, reach])
                    .y_bounds([-reach, 0.5])
                    .paint(move |ctx| {
                        ctx.draw(&CanvasLine::new(-0.3, 0.0, 0.3, 0.0, Color::Gray));
                        ctx.draw(&CanvasLine::new(0.0, 0.0, x, y, Color::White));
                        ball(ctx, x, y, 0.12, Color::Yellow);
                    });
                f.render_widget(canvas, area);
            }
            ScenarioKind::Incline => {
                let sim = app.lab.incline();
                let params = sim.params();
                let height = params.initial_height;
                let run = if params.slope_run().is_finite() {
                    params.slope_run()
                } else {
                    10.0
                };
                let state = *sim.state();
                let span = run.max(height) + 0.5;
                let canvas = Canvas::default()
                    .block(block)
                    .x_bounds([-0.5, span])
                    .y_bounds([-0.5, span])
                    .paint(move |ctx| {
                        ctx.draw(&CanvasLine::new(-0.5, 0.0, span, 0.0, Color::Gray));
                        ctx.draw(&CanvasLine::new(0.0, height, run, 0.0, Color::White));
                        ball(ctx, state.x, state.y, 0.15, Color::Red);
                    });
                f.render_widget(canvas, area);
            }
            ScenarioKind::Bounce => {
                let sim = app.lab.bounce();
                let top = sim.params().initial_height + 1.0;
                let y = sim.state().y;
                let canvas = Canvas::default()
                    .block(block)
                    .x_bounds([-3.0, 3.0])
                    .y_bounds([-0.5, top])
                    .paint(move |ctx| {
                        ctx.draw(&CanvasLine::new(-3.0, 0.0, 3.0, 0.0, Color::Gray));
                        ball(ctx, 0.0, y, 0.2, Color::Green);
                    });
                f.render_widget(canvas, area);
            }
        }
    }

    fn ball(ctx: &mut Context, x: f64, y: f64, radius: f64, color: Color) {
        ctx.draw(&Circle {
            x,
            y,
            radius,
            color,
        });
    }

    fn render_status(f: &mut Frame, area: Rect, app: &LabApp) {
        let scenario = app.current();
        let label = Style::default().fg(Color::Gray);
        let (state_text, state_color) = if scenario.is_running() {
            ("RUNNING".to_string(), Color::Green)
        } else if let Some(reason) = scenario.last_halt() {
            (format!("STOPPED ({reason})"), Color::Red)
        } else {
            ("STOPPED".to_string(), Color::Yellow)
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("State: ", label),
                Span::styled(state_text, Style::default().fg(state_color)),
            ]),
            Line::from(vec![
                Span::styled("Time: ", label),
                Span::raw(format!("{:.2} s", scenario.time())),
                Span::styled("  Step: ", label),
                Span::raw(scenario.step_count().to_string()),
            ]),
            Line::from(vec![
                Span::styled("Energy drift: ", label),
                Span::raw(format!("{:.2}%", scenario.max_energy_drift() * 100.0)),
            ]),
            Line::from(""),
            Line::from(Span::styled("Parameters", label)),
        ];
        lines.extend(parameter_lines(app, scenario));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("State", label)));
        lines.extend(
            scenario
                .state_fields()
                .into_iter()
                .map(|(name, value)| Line::from(format!("  {name:<18}{value:>10.3}"))),
        );

        let panel = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(panel, area);
    }

    fn parameter_lines<'a>(app: &LabApp, scenario: &dyn ScenarioControl) -> Vec<Line<'a>> {
        let selected = app.selected_parameter();
        scenario
            .parameter_names()
            .iter()
            .map(|&name| {
                let value = scenario.parameter(name).unwrap_or(f64::NAN);
                let text = format!("  {name:<18}{value:>10.3}");
                if name == selected {
                    Line::from(Span::styled(
                        text,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::REVERSED),
                    ))
                } else {
                    Line::from(text)
                }
            })
            .collect()
    }

    fn render_energy_chart(f: &mut Frame, area: Rect, app: &LabApp) {
        let series = EnergySeries::from_samples(app.current().samples());
        let [t0, t1] = series.time_bounds().unwrap_or([0.0, 1.0]);
        let [e0, e1] = series.energy_bounds().unwrap_or([0.0, 1.0]);

        let datasets = vec![
            Dataset::default()
                .name("PE")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Blue))
                .data(&series.potential),
            Dataset::default()
                .name("KE")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&series.kinetic),
            Dataset::default()
                .name("Total")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Green))
                .data(&series.total),
        ];

        let chart = Chart::new(datasets)
            .block(Block::default().borders(Borders::ALL).title("Energy (J)"))
            .x_axis(
                Axis::default()
                    .title("t (s)")
                    .style(Style::default().fg(Color::Gray))
                    .bounds([t0, t1])
                    .labels([format!("{t0:.2}"), format!("{t1:.2}")]),
            )
            .y_axis(
                Axis::default()
                    .style(Style::default().fg(Color::Gray))
                    .bounds([e0, e1])
                    .labels([format!("{e0:.2}"), format!("{e1:.2}")]),
            );
        f.render_widget(chart, area);
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crossterm::event::KeyCode;
        use ratatui::backend::TestBackend;

        fn create_test_terminal() -> Terminal<TestBackend> {
            let backend = TestBackend::new(100, 40);
            Terminal::new(backend).expect("Failed to create test terminal")
        }

        #[test]
        fn test_ui_renders_every_scenario() {
            let mut terminal = create_test_terminal();
            let mut app = LabApp::new();
            for key in ['1', '2', '3'] {
                app.handle_key(KeyCode::Char(key));
                app.handle_key(KeyCode::Char(' '));
                for _ in 0..20 {
                    app.update();
                }
                terminal
                    .draw(|f| ui(f, &app))
                    .expect("UI should render without panic");
            }
        }

        #[test]
        fn test_ui_renders_empty_buffer() {
            let mut terminal = create_test_terminal();
            let app = LabApp::new();
            terminal
                .draw(|f| ui(f, &app))
                .expect("UI should render without samples");
        }
    }
}
