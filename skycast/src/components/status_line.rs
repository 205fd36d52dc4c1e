use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use skycast_core::{Status, StatusState};

use super::{Component, ERROR_ICON, spinner};
use crate::action::Action;

/// One-line rendering of a [`Status`].
pub struct StatusLine;

pub struct StatusLineProps<'a> {
    pub status: &'a Status,
    pub spinner_frame: usize,
}

impl StatusLine {
    /// Styled line for `status`, with a spinner frame while loading.
    pub fn line(status: &Status, spinner_frame: usize) -> Line<'static> {
        let message = status.message().to_string();
        match status.state() {
            StatusState::Loading => Line::from(vec![
                Span::styled(
                    format!("{} ", spinner(spinner_frame)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(message, Style::default().fg(Color::Yellow)),
            ]),
            StatusState::Error => Line::from(vec![
                Span::styled(ERROR_ICON, Style::default().fg(Color::Red)),
                Span::styled(message, Style::default().fg(Color::Red)),
            ]),
            StatusState::Idle => Line::styled(message, Style::default().fg(Color::Gray)),
        }
    }
}

impl Component<Action> for StatusLine {
    type Props<'a> = StatusLineProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let line = Self::line(props.status, props.spinner_frame);
        frame.render_widget(Paragraph::new(line.centered()), area);
    }
}
