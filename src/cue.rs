use std::io::{self, Write};

use thiserror::Error;
use tracing::warn;

use crate::game::{Signal, SignalListener};

#[derive(Debug, Error)]
pub enum CueError {
    #[error("cue output failed: {0}")]
    Io(#[from] io::Error),
    #[error("cue unavailable: {0}")]
    Unavailable(String),
}

/// Plays the short feedback sounds for a key press
pub trait CuePlayer {
    fn play_correct(&mut self) -> Result<(), CueError>;
    fn play_incorrect(&mut self) -> Result<(), CueError>;
}

/// Rings the terminal bell: once for a hit, twice for a miss
#[derive(Debug)]
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn ring(&mut self, times: usize) -> Result<(), CueError> {
        for _ in 0..times {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CuePlayer for TerminalBell<W> {
    fn play_correct(&mut self) -> Result<(), CueError> {
        self.ring(1)
    }

    fn play_incorrect(&mut self) -> Result<(), CueError> {
        self.ring(2)
    }
}

/// Player used when sound is switched off
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl CuePlayer for Silent {
    fn play_correct(&mut self) -> Result<(), CueError> {
        Ok(())
    }

    fn play_incorrect(&mut self) -> Result<(), CueError> {
        Ok(())
    }
}

impl CuePlayer for Box<dyn CuePlayer> {
    fn play_correct(&mut self) -> Result<(), CueError> {
        (**self).play_correct()
    }

    fn play_incorrect(&mut self) -> Result<(), CueError> {
        (**self).play_incorrect()
    }
}

/// The terminal bell when sound is on, [`Silent`] otherwise
pub fn player_for(sound: bool) -> Box<dyn CuePlayer> {
    if sound {
        Box::new(TerminalBell::stdout())
    } else {
        Box::new(Silent)
    }
}

/// Bridges controller signals to a [`CuePlayer`]. Playback errors stop here.
pub struct CueNotifier<P: CuePlayer> {
    player: P,
}

impl<P: CuePlayer> CueNotifier<P> {
    pub fn new(player: P) -> Self {
        Self { player }
    }
}

impl<P: CuePlayer> SignalListener for CueNotifier<P> {
    fn on_signal(&mut self, signal: &Signal) {
        let played = match signal {
            Signal::CorrectKey { .. } => self.player.play_correct(),
            Signal::IncorrectKey { .. } => self.player.play_incorrect(),
            _ => return,
        };
        if let Err(err) = played {
            warn!(%err, ?signal, "could not play cue");
        }
    }
}
