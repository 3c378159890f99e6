use std::time::Duration;

use bookmarks::SqliteConfigStore;
use crossbeam_channel::Receiver;
use ratatui::DefaultTerminal;
use tracing::info;

use crate::{
    app::App,
    audio_thread::AudioThread,
    config::PlayerConfig,
    event::Event,
    utils::{init_tracing, spawn_event_emmiter},
};

mod app;
mod audio_thread;
mod components;
mod config;
mod event;
mod source;
mod utils;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let config = PlayerConfig::from_env();
    std::fs::create_dir_all(&config.data_dir)?;
    init_tracing(&config.log_path())?;

    let tickrate = Duration::from_millis(250);

    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let (command_tx, command_rx) = crossbeam_channel::unbounded();

    spawn_event_emmiter(event_tx.clone(), tickrate)?;
    AudioThread::new(command_rx, event_tx).run()?;

    let store = SqliteConfigStore::open(&config.db_path())?;
    let mut app = App::new(command_tx, config, store)?;

    let mut terminal = ratatui::init();
    let res = run(&mut terminal, &mut app, &event_rx);
    ratatui::restore();

    info!("bye");
    res
}

fn run(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    event_rx: &Receiver<Event>,
) -> color_eyre::Result<()> {
    terminal.draw(|f| app.render(f.area(), f.buffer_mut()))?;
    loop {
        match event_rx.recv()? {
            Event::Input(key) => {
                if !app.event(key)?.is_consumed() && key == app.config.key_config.quit {
                    app.shutdown();
                    break;
                }
            }
            Event::Tick => {
                app.tick()?;
            }
            Event::Audio(audio) => {
                app.audio(audio)?;
            }
        }

        terminal.draw(|f| app.render(f.area(), f.buffer_mut()))?;
    }

    Ok(())
}
