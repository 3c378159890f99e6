use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::eyre;
use crossbeam_channel::Sender;
use crossterm::event;
use tracing_subscriber::EnvFilter;

use crate::event::{Event, Key};

pub fn spawn_event_emmiter(event_tx: Sender<Event>, tickrate: Duration) -> Result<()> {
    _ = std::thread::spawn(move || -> Result<()> {
        loop {
            if event::poll(tickrate)? {
                if let event::Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        event_tx.send(Event::Input(Key::from(key)))?;
                    }
                }
            }

            event_tx.send(Event::Tick)?;
        }
    });

    Ok(())
}

/// Logs go to a file, the terminal belongs to the UI.
pub fn init_tracing(log_path: &Path) -> Result<()> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| eyre!(err))?;

    Ok(())
}
