use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Gauge, Paragraph},
    Frame,
};

use crate::{
    game::{Phase, Session},
    ui::{centered_rows, theme::Theme},
};

/// A UI Screen boundary: renders one phase of the game
pub trait Screen {
    fn render(&self, session: &Session, theme: Theme, f: &mut Frame);
}

fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

fn hint_style() -> Style {
    Style::default()
        .add_modifier(Modifier::DIM)
        .add_modifier(Modifier::ITALIC)
}

fn centered<'a>(line: impl Into<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(line.into()).alignment(Alignment::Center)
}

/// Start screen, shown before the first game and after quitting one
pub struct StartScreen;

impl Screen for StartScreen {
    fn render(&self, _session: &Session, theme: Theme, f: &mut Frame) {
        let rows = centered_rows(f.area(), &[1, 1, 1, 1]);

        f.render_widget(
            centered(Span::styled(theme.title(), title_style())),
            rows[0],
        );
        f.render_widget(
            centered(Span::styled(
                "Press Enter to start",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            rows[2],
        );
        f.render_widget(centered(Span::styled("Esc to leave", hint_style())), rows[3]);
    }
}

/// Running game: score, sequence and countdown
pub struct PlayScreen;

impl PlayScreen {
    fn render_countdown(&self, session: &Session, theme: Theme, f: &mut Frame, area: Rect) {
        if theme.shows_gauge() {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(countdown_colour(session.time_ratio())))
                .ratio(session.time_ratio())
                .label(format!("{}s", session.time_remaining()));
            f.render_widget(gauge, area);
        } else {
            f.render_widget(
                centered(format!("Time left: {}", session.time_remaining())),
                area,
            );
        }
    }
}

impl Screen for PlayScreen {
    fn render(&self, session: &Session, theme: Theme, f: &mut Frame) {
        let rows = centered_rows(f.area(), &[1, 1, 1, 1, 1, 1, 1, 1]);

        f.render_widget(
            centered(Span::styled(theme.title(), title_style())),
            rows[0],
        );
        f.render_widget(centered(theme.score_label(session.score())), rows[1]);
        f.render_widget(centered(theme.sequence_line(session)), rows[3]);
        self.render_countdown(session, theme, f, rows[5]);
        f.render_widget(
            centered(Span::styled("Esc: back to menu", hint_style())),
            rows[7],
        );
    }
}

fn countdown_colour(ratio: f64) -> Color {
    if ratio > 0.5 {
        Color::Green
    } else if ratio > 0.2 {
        Color::Yellow
    } else {
        Color::Red
    }
}

/// Final score with play-again / quit hints
pub struct GameOverScreen;

impl Screen for GameOverScreen {
    fn render(&self, session: &Session, theme: Theme, f: &mut Frame) {
        let rows = centered_rows(f.area(), &[1, 1, 1, 1]);

        f.render_widget(
            centered(Span::styled(
                "Try again!",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            rows[0],
        );
        f.render_widget(centered(theme.score_label(session.score())), rows[1]);
        f.render_widget(
            centered(Span::styled(
                "Enter: play again   Esc: quit",
                hint_style(),
            )),
            rows[3],
        );
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: Phase) -> Box<dyn Screen> {
    match phase {
        Phase::NotStarted => Box::new(StartScreen),
        Phase::Playing => Box::new(PlayScreen),
        Phase::GameOver => Box::new(GameOverScreen),
    }
}
