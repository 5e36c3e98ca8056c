pub mod screen;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::game::Session;
use self::theme::Theme;

const HORIZONTAL_MARGIN: u16 = 5;

/// Draw the screen for the session's current phase
pub fn draw(f: &mut Frame, session: &Session, theme: Theme) {
    screen::current_screen(session.phase()).render(session, theme, f);
}

/// Split `area` into rows of the given heights, vertically centered
pub(crate) fn centered_rows(area: Rect, heights: &[u16]) -> Vec<Rect> {
    let content: u16 = heights.iter().sum();
    let padding = area.height.saturating_sub(content) / 2;

    let constraints = std::iter::once(Constraint::Length(padding))
        .chain(heights.iter().map(|h| Constraint::Length(*h)))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect::<Vec<Constraint>>();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(constraints)
        .split(area);

    chunks[1..=heights.len()].to_vec()
}
