use std::collections::VecDeque;
use std::path::Path;

use anyhow::Context;
use log::LevelFilter;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use roster_core::{update, AppState, Msg};
use roster_engine::EngineHandle;
use roster_logging::{roster_error, roster_info, DEFAULT_LOG_FILE};

use super::config::{config_path, load_config, AppConfig};
use super::controller::{Controller, KeyOutcome};
use super::effects::EffectRunner;
use super::ui;

pub fn run_app() -> anyhow::Result<()> {
    roster_logging::initialize(Path::new(DEFAULT_LOG_FILE), LevelFilter::Info);

    let config = load_config(&config_path(std::env::args()));
    let engine =
        EngineHandle::new(config.client_settings()).context("failed to start the engine")?;
    let runner = EffectRunner::new(engine);

    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &runner, &config);
    ratatui::restore();

    if let Err(err) = &result {
        roster_error!("Exiting after error: {:#}", err);
    }
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    runner: &EffectRunner,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let mut state = AppState::new();
    let mut controller = Controller::default();
    let mut inbox: VecDeque<Msg> = VecDeque::from([Msg::Mounted]);
    let mut redraw = true;

    loop {
        inbox.extend(runner.drain());
        while let Some(msg) = inbox.pop_front() {
            let (next, effects) = update(state, msg);
            state = next;
            runner.run(effects);
        }

        if state.consume_dirty() || redraw {
            let view = state.view();
            let prompt = controller.prompt();
            terminal
                .draw(|frame| ui::render::draw(frame, &view, prompt.as_ref()))
                .context("failed to draw")?;
            redraw = false;
        }

        if !event::poll(config.event_poll())? {
            continue;
        }
        match event::read()? {
            // Only presses: crossterm also reports release and repeat on Windows.
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match controller.handle_key(key, &state) {
                    KeyOutcome::Quit => break,
                    KeyOutcome::Send(msgs) => inbox.extend(msgs),
                }
                // Prompt text lives outside the core state.
                redraw = true;
            }
            Event::Resize(..) => redraw = true,
            _ => {}
        }
    }

    roster_info!("Quit requested");
    Ok(())
}
