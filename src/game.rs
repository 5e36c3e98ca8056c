//! Game session state machine.
//!
//! [`GameSessionController`] owns the single [`Session`] and is the only thing
//! allowed to mutate it. It is driven by two inputs, key presses
//! ([`GameSessionController::handle_key`]) and one-second ticks
//! ([`GameSessionController::tick`]), and reports what happened through
//! [`Signal`]s delivered to subscribed [`SignalListener`]s.
//!
//! ```text
//!   NotStarted --start--> Playing --timeout / wrong key--> GameOver
//!       ^                  |   ^                              |
//!       +------quit--------+   +-----------start--------------+
//!       ^                                                     |
//!       +----------------------quit---------------------------+
//! ```

use std::collections::BTreeSet;

use tracing::debug;

use crate::sequence::{RandomSequence, SequenceSource};

pub const DEFAULT_BUDGET_SECS: u32 = 30;
pub const DEFAULT_SEQUENCE_LENGTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    Timeout,
    WrongKey,
}

/// Result of feeding one key to the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not playing, not a letter, or nothing to type
    Ignored,
    Correct,
    /// The key finished the sequence and a new one was drawn
    Completed,
    Mistyped,
}

/// Notifications emitted after a state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    Started,
    CorrectKey { position: usize },
    RoundCompleted { score: u32 },
    IncorrectKey { expected: char, got: char },
    GameOver { reason: GameOverReason, score: u32 },
    Quit,
}

pub trait SignalListener {
    fn on_signal(&mut self, signal: &Signal);
}

impl<F> SignalListener for F
where
    F: FnMut(&Signal),
{
    fn on_signal(&mut self, signal: &Signal) {
        self(signal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSettings {
    pub budget_secs: u32,
    pub sequence_length: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            budget_secs: DEFAULT_BUDGET_SECS,
            sequence_length: DEFAULT_SEQUENCE_LENGTH,
        }
    }
}

/// Everything the rendering layer needs to know about the current game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    sequence: Vec<char>,
    progress_index: usize,
    typed_positions: BTreeSet<usize>,
    score: u32,
    time_remaining: u32,
    budget: u32,
    phase: Phase,
}

impl Session {
    fn new(budget: u32) -> Self {
        Self {
            sequence: Vec::new(),
            progress_index: 0,
            typed_positions: BTreeSet::new(),
            score: 0,
            time_remaining: budget,
            budget,
            phase: Phase::NotStarted,
        }
    }

    pub fn sequence(&self) -> &[char] {
        &self.sequence
    }

    pub fn sequence_text(&self) -> String {
        self.sequence.iter().collect()
    }

    pub fn progress_index(&self) -> usize {
        self.progress_index
    }

    pub fn typed_positions(&self) -> &BTreeSet<usize> {
        &self.typed_positions
    }

    pub fn is_typed(&self, position: usize) -> bool {
        self.typed_positions.contains(&position)
    }

    pub fn expected_letter(&self) -> Option<char> {
        self.sequence.get(self.progress_index).copied()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Share of the budget still left, in `0.0..=1.0`
    pub fn time_ratio(&self) -> f64 {
        if self.budget == 0 {
            return 0.0;
        }
        (self.time_remaining as f64 / self.budget as f64).clamp(0.0, 1.0)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    fn begin_round(&mut self, sequence: Vec<char>) {
        self.sequence = sequence;
        self.progress_index = 0;
        self.typed_positions.clear();
    }
}

pub struct GameSessionController<S: SequenceSource = RandomSequence> {
    session: Session,
    settings: GameSettings,
    source: S,
    listeners: Vec<Box<dyn SignalListener>>,
}

impl<S: SequenceSource> GameSessionController<S> {
    pub fn new(settings: GameSettings, source: S) -> Self {
        Self {
            session: Session::new(settings.budget_secs),
            settings,
            source,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe<L>(&mut self, listener: L)
    where
        L: SignalListener + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn snapshot(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    /// Begin a fresh game. Only valid from `NotStarted` or `GameOver`; returns
    /// whether the command was applied.
    pub fn start(&mut self) -> bool {
        if self.session.phase == Phase::Playing {
            return false;
        }

        let sequence = self.source.next_sequence(self.settings.sequence_length);
        self.session.begin_round(sequence);
        self.session.score = 0;
        self.session.budget = self.settings.budget_secs;
        self.session.time_remaining = self.settings.budget_secs;
        self.session.phase = Phase::Playing;

        debug!(
            sequence = %self.session.sequence_text(),
            budget = self.session.budget,
            "game started"
        );
        self.emit(Signal::Started);
        true
    }

    /// Play again after a game over
    pub fn restart(&mut self) -> bool {
        self.start()
    }

    pub fn tick(&mut self) {
        if self.session.phase != Phase::Playing {
            return;
        }

        self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
        if self.session.time_remaining == 0 {
            self.finish(GameOverReason::Timeout);
        }
    }

    pub fn handle_key(&mut self, c: char) -> KeyOutcome {
        if self.session.phase != Phase::Playing {
            return KeyOutcome::Ignored;
        }

        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return KeyOutcome::Ignored;
        }

        let Some(expected) = self.session.expected_letter() else {
            return KeyOutcome::Ignored;
        };

        if c != expected {
            self.emit(Signal::IncorrectKey { expected, got: c });
            self.finish(GameOverReason::WrongKey);
            return KeyOutcome::Mistyped;
        }

        let position = self.session.progress_index;
        self.session.typed_positions.insert(position);
        self.session.progress_index += 1;
        self.emit(Signal::CorrectKey { position });

        if self.session.progress_index < self.session.sequence.len() {
            return KeyOutcome::Correct;
        }

        self.session.score += 1;
        let sequence = self.source.next_sequence(self.settings.sequence_length);
        self.session.begin_round(sequence);
        debug!(
            score = self.session.score,
            next = %self.session.sequence_text(),
            "sequence completed"
        );
        self.emit(Signal::RoundCompleted {
            score: self.session.score,
        });
        KeyOutcome::Completed
    }

    /// Back to the start screen from any phase
    pub fn quit(&mut self) {
        self.session = Session::new(self.settings.budget_secs);
        debug!("returned to start screen");
        self.emit(Signal::Quit);
    }

    fn finish(&mut self, reason: GameOverReason) {
        self.session.phase = Phase::GameOver;
        debug!(?reason, score = self.session.score, "game over");
        self.emit(Signal::GameOver {
            reason,
            score: self.session.score,
        });
    }

    fn emit(&mut self, signal: Signal) {
        for listener in self.listeners.iter_mut() {
            listener.on_signal(&signal);
        }
    }
}

impl<S: SequenceSource> std::fmt::Debug for GameSessionController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSessionController")
            .field("session", &self.session)
            .field("settings", &self.settings)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
