// End-to-end game scenarios through the public controller API.

use std::cell::RefCell;
use std::rc::Rc;

use assert_matches::assert_matches;
use keyrush::{
    cue::{CueError, CueNotifier, CuePlayer},
    game::{GameOverReason, GameSessionController, GameSettings, KeyOutcome, Signal},
    sequence::{Alphabet, RandomSequence, ScriptedSequence},
    Phase,
};

fn scripted(script: &[&str]) -> GameSessionController<ScriptedSequence> {
    GameSessionController::new(GameSettings::default(), ScriptedSequence::new(script))
}

#[test]
fn mistype_after_one_correct_letter() {
    let mut game = scripted(&["HELLO"]);
    game.start();
    assert_eq!(game.snapshot().sequence_text(), "HELLO");

    assert_eq!(game.handle_key('H'), KeyOutcome::Correct);
    assert_eq!(game.snapshot().progress_index(), 1);

    assert_eq!(game.handle_key('X'), KeyOutcome::Mistyped);
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.snapshot().score(), 0);
}

#[test]
fn typing_full_sequence_scores_and_redraws() {
    let mut game = scripted(&["ABCDE", "QWERT"]);
    game.start();

    for c in "ABCDE".chars() {
        game.handle_key(c);
    }

    let session = game.snapshot();
    assert_eq!(session.score(), 1);
    assert_eq!(session.sequence_text(), "QWERT");
    assert_eq!(session.progress_index(), 0);
    assert_eq!(session.phase(), Phase::Playing);
}

#[test]
fn thirty_idle_ticks_end_the_game() {
    let mut game = scripted(&["HELLO"]);
    game.start();
    assert_eq!(game.snapshot().time_remaining(), 30);

    for _ in 0..30 {
        game.tick();
    }

    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.snapshot().score(), 0);
}

#[test]
fn full_lifecycle_start_lose_replay_quit() {
    let mut game = scripted(&["ABCDE"]);
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    game.subscribe(move |s: &Signal| sink.borrow_mut().push(s.clone()));

    assert!(game.start());
    for c in "ABCDE".chars() {
        game.handle_key(c);
    }
    game.handle_key('Z');
    assert_eq!(game.snapshot().score(), 1);

    assert!(game.restart());
    assert_eq!(game.snapshot().score(), 0);

    game.quit();
    assert_eq!(game.phase(), Phase::NotStarted);
    assert!(game.start(), "start is always available from the start screen");

    let log = log.borrow();
    assert_matches!(
        log.iter().find(|s| matches!(s, Signal::GameOver { .. })),
        Some(Signal::GameOver {
            reason: GameOverReason::WrongKey,
            score: 1
        })
    );
    assert_eq!(log.iter().filter(|s| **s == Signal::Started).count(), 3);
}

#[derive(Clone, Default)]
struct CountingPlayer {
    counts: Rc<RefCell<(u32, u32)>>,
}

impl CuePlayer for CountingPlayer {
    fn play_correct(&mut self) -> Result<(), CueError> {
        self.counts.borrow_mut().0 += 1;
        Ok(())
    }

    fn play_incorrect(&mut self) -> Result<(), CueError> {
        self.counts.borrow_mut().1 += 1;
        Ok(())
    }
}

#[test]
fn cues_follow_key_outcomes() {
    let player = CountingPlayer::default();
    let counts = Rc::clone(&player.counts);

    let mut game = scripted(&["ABCDE"]);
    game.subscribe(CueNotifier::new(player));
    game.start();
    for c in "ABCDEAB".chars() {
        game.handle_key(c);
    }
    game.handle_key('Q');
    // ignored after game over
    game.handle_key('C');

    assert_eq!(*counts.borrow(), (7, 1));
}

#[test]
fn classic_rules_with_random_sequences() {
    let mut game = GameSessionController::new(
        GameSettings {
            budget_secs: 10,
            sequence_length: 5,
        },
        RandomSequence::seeded(Alphabet::parse("ABCD").unwrap(), 2024),
    );
    game.start();

    // Type every sequence perfectly for a few rounds
    for round in 1..=4 {
        let target = game.snapshot().sequence().to_vec();
        assert_eq!(target.len(), 5);
        assert!(target.iter().all(|c| "ABCD".contains(*c)));
        for c in target {
            game.handle_key(c);
        }
        assert_eq!(game.snapshot().score(), round);
    }

    for _ in 0..10 {
        game.tick();
    }
    assert_eq!(game.phase(), Phase::GameOver);
    assert_eq!(game.snapshot().score(), 4);
}
