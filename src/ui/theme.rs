use clap::ValueEnum;
use itertools::Itertools;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use serde::{Deserialize, Serialize};

use crate::game::Session;

/// Presentation variants. The game logic is identical for all of them.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    Eq,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// comma separated letters and a textual countdown
    Plain,
    /// highlights the next letter to type
    #[default]
    Highlight,
    /// highlights the next letter and marks the ones already typed
    Marked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterState {
    Typed,
    Current,
    Pending,
}

impl Theme {
    pub fn title(self) -> &'static str {
        match self {
            Theme::Plain | Theme::Highlight => "Mini Game",
            Theme::Marked => "⌨  Mini Game  ⌨",
        }
    }

    pub fn score_label(self, score: u32) -> String {
        match self {
            Theme::Marked => format!("★ Score: {score}"),
            Theme::Plain | Theme::Highlight => format!("Score: {score}"),
        }
    }

    /// Whether the countdown is drawn as a bar instead of a line of text
    pub fn shows_gauge(self) -> bool {
        !matches!(self, Theme::Plain)
    }

    pub fn letter_style(self, state: LetterState) -> Style {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        match (self, state) {
            (Theme::Plain, _) => bold,
            (_, LetterState::Current) => bold
                .fg(Color::Yellow)
                .add_modifier(Modifier::UNDERLINED),
            (Theme::Marked, LetterState::Typed) => bold.fg(Color::Green),
            (_, LetterState::Typed) | (_, LetterState::Pending) => {
                bold.add_modifier(Modifier::DIM)
            }
        }
    }

    pub fn sequence_line(self, session: &Session) -> Line<'static> {
        if self == Theme::Plain {
            let text = session.sequence().iter().join(", ");
            return Line::from(Span::styled(text, self.letter_style(LetterState::Pending)));
        }

        let spans = session
            .sequence()
            .iter()
            .enumerate()
            .map(|(idx, letter)| {
                let state = if session.is_typed(idx) {
                    LetterState::Typed
                } else if idx == session.progress_index() {
                    LetterState::Current
                } else {
                    LetterState::Pending
                };
                Span::styled(format!(" {letter} "), self.letter_style(state))
            })
            .collect::<Vec<Span>>();

        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameSessionController, GameSettings};
    use crate::sequence::ScriptedSequence;

    fn playing() -> GameSessionController<ScriptedSequence> {
        let mut controller =
            GameSessionController::new(GameSettings::default(), ScriptedSequence::new(["ABCDE"]));
        controller.start();
        controller.handle_key('A');
        controller
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn plain_joins_letters_with_commas() {
        let controller = playing();
        let line = Theme::Plain.sequence_line(controller.snapshot());
        assert_eq!(line_text(&line), "A, B, C, D, E");
    }

    #[test]
    fn highlight_marks_only_the_current_letter() {
        let controller = playing();
        let line = Theme::Highlight.sequence_line(controller.snapshot());
        assert_eq!(line.spans.len(), 5);
        assert_eq!(
            line.spans[1].style,
            Theme::Highlight.letter_style(LetterState::Current)
        );
        assert_eq!(line.spans[0].style, line.spans[2].style);
    }

    #[test]
    fn marked_colours_typed_letters() {
        let controller = playing();
        let line = Theme::Marked.sequence_line(controller.snapshot());
        assert_eq!(line.spans[0].style.fg, Some(Color::Green));
        assert_eq!(line.spans[1].style.fg, Some(Color::Yellow));
        assert_eq!(line.spans[2].style.fg, None);
    }

    #[test]
    fn display_matches_cli_names() {
        assert_eq!(Theme::Plain.to_string(), "plain");
        assert_eq!(Theme::Highlight.to_string(), "highlight");
        assert_eq!(Theme::Marked.to_string(), "marked");
    }

    #[test]
    fn gauge_only_for_graphical_themes() {
        assert!(!Theme::Plain.shows_gauge());
        assert!(Theme::Highlight.shows_gauge());
        assert!(Theme::Marked.shows_gauge());
    }
}
