use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use color_eyre::Result;
use crossbeam_channel::{Receiver, Sender};
use rodio::{Sink, Source};
use tracing::warn;

use crate::event::{AudioMessage, Command, Event};
use crate::source::NotifySource;

pub struct AudioThread {
    command_rx: Receiver<Command>,
    event_tx: Sender<Event>,
    source_total_duration: Option<Duration>,
    generation: u64,
}

impl AudioThread {
    pub fn new(command_rx: Receiver<Command>, event_tx: Sender<Event>) -> AudioThread {
        AudioThread {
            command_rx,
            event_tx,
            source_total_duration: None,
            generation: 0,
        }
    }

    pub fn run(mut self) -> Result<()> {
        _ = std::thread::spawn(move || -> Result<()> {
            let stream_handle = rodio::OutputStreamBuilder::open_default_stream()?;
            let sink = Sink::connect_new(stream_handle.mixer());
            sink.set_volume(0.05);

            loop {
                let cmd = self.command_rx.recv()?;

                match cmd {
                    Command::Play { path, generation } => {
                        self.generation = generation;
                        if let Err(err) = self.play(&sink, &path) {
                            warn!(path = %path.display(), %err, "cannot play track");
                        }
                    }
                    Command::Pause => {
                        sink.pause();
                        self.event_tx.send(Event::Audio(AudioMessage::Paused))?;
                    }
                    Command::Resume => sink.play(),
                    Command::Stop => {
                        sink.clear();
                        self.source_total_duration = None;
                    }
                    Command::Seek(pos) => {
                        if let Err(err) = sink.try_seek(pos) {
                            warn!(?pos, %err, "seek failed");
                        }
                    }
                    Command::SendState => {
                        let state = SinkState {
                            total_duration: self.source_total_duration,
                            pos: sink.get_pos(),
                            paused: sink.is_paused(),
                            generation: self.generation,
                        };

                        self.event_tx.send(Event::Audio(AudioMessage::State(state)))?;
                        continue;
                    }
                }

                self.event_tx.send(Event::Audio(AudioMessage::Noop))?;
            }
        });

        Ok(())
    }

    fn play(&mut self, sink: &Sink, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        let source = rodio::Decoder::new(BufReader::new(file))?;
        let notify_source = NotifySource::new(source, self.event_tx.clone(), self.generation);

        self.source_total_duration = notify_source.total_duration();

        sink.clear();
        sink.append(notify_source);
        sink.play();
        Ok(())
    }
}

#[derive(Clone)]
pub struct SinkState {
    pub total_duration: Option<Duration>,
    pub pos: Duration,
    pub paused: bool,
    /// Generation of the `Play` the sink was last given.
    pub generation: u64,
}
