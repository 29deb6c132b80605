use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};

use dropball_web::Demo;

use crate::project;
use crate::state::WatchState;
use crate::ui::watch_view;

const FRAME_TIME: Duration = Duration::from_millis(16);

pub fn run(config: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, source) = project::load_config(config.as_deref())?;
    let mut demo = Demo::new(config).map_err(anyhow::Error::msg)?;
    let mut state = WatchState::new(source.label());

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut demo, &mut state);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut ratatui::DefaultTerminal,
    demo: &mut Demo,
    state: &mut WatchState,
) -> anyhow::Result<()> {
    let mut last = Instant::now();
    while !state.should_quit {
        terminal.draw(|frame| {
            let area = frame.area();
            watch_view::render(frame, state, area);
        })?;

        if event::poll(FRAME_TIME)? {
            if let Event::Key(key) = event::read()? {
                handle_key(key, demo, state);
            }
        }

        let now = Instant::now();
        let dt = now.duration_since(last).as_secs_f32();
        last = now;
        if !state.paused {
            let report = demo.tick(dt);
            state.record(report, demo.sphere_state());
        }
    }
    Ok(())
}

fn handle_key(key: KeyEvent, demo: &mut Demo, state: &mut WatchState) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        KeyCode::Char(' ') => state.toggle_pause(),
        KeyCode::Char('r') => {
            demo.reset_sphere();
            state.log.push(state.ticks, "manual reset".to_string());
        }
        _ => {}
    }
}
