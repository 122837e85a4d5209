pub mod screens;
pub mod theme;

pub use theme::Theme;

use crate::error::Result;
use crate::fuzzy::{InferenceEngine, InferenceResult};
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use screens::{MembershipsScreen, SimulationScreen};
use std::io;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Memberships,
    Simulation,
}

/// Run the chart viewer until the user quits. The simulation view is only
/// reachable when a result was provided.
pub fn run_chart(
    engine: &InferenceEngine,
    simulation: Option<(InferenceResult, (f64, f64, f64))>,
) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, engine, &simulation);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    engine: &InferenceEngine,
    simulation: &Option<(InferenceResult, (f64, f64, f64))>,
) -> Result<()>
where
    crate::error::IrrigoError: From<B::Error>,
{
    let mut screen = if simulation.is_some() {
        Screen::Simulation
    } else {
        Screen::Memberships
    };

    loop {
        terminal.draw(|f| {
            let area = f.area();
            match screen {
                Screen::Memberships => {
                    f.render_widget(MembershipsScreen::new(engine), area);
                }
                Screen::Simulation => {
                    if let Some((result, inputs)) = simulation {
                        f.render_widget(SimulationScreen::new(engine, result, *inputs), area);
                    } else {
                        f.render_widget(MembershipsScreen::new(engine), area);
                    }
                }
            }
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Char('1') => screen = Screen::Memberships,
                    KeyCode::Char('2') if simulation.is_some() => screen = Screen::Simulation,
                    _ => {}
                }
            }
        }
    }

    Ok(())
}
