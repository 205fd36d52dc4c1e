//! Saved-location list overlay
//!
//! Highlight moves with j/k or the arrows; Enter switches to the highlighted
//! place and x/Delete removes it.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};
use skycast_core::LocationStore;
use tui_dispatch::EventKind;

use super::{Component, LOCATION_ICON};
use crate::action::Action;

pub struct LocationListProps<'a> {
    pub locations: &'a LocationStore,
    /// Highlighted row
    pub highlighted: usize,
}

/// Saved-location list with a highlighted row.
#[derive(Default)]
pub struct LocationList {
    scroll_offset: usize,
}

impl LocationList {
    pub const WIDTH: u16 = 48;
    pub const MAX_HEIGHT: u16 = 14;

    /// Create a new list scrolled to the top.
    pub fn new() -> Self {
        Self::default()
    }

    fn area(outer: Rect, rows: usize) -> Rect {
        let height = (rows.max(1) as u16 + 2).min(Self::MAX_HEIGHT);
        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(outer);
        let [area] = Layout::horizontal([Constraint::Length(Self::WIDTH)])
            .flex(Flex::Center)
            .areas(row);
        area
    }

    fn ensure_visible(&mut self, row: usize, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + viewport_height {
            self.scroll_offset = row + 1 - viewport_height;
        }
    }
}

impl Component<Action> for LocationList {
    type Props<'a> = LocationListProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return vec![];
        };
        let len = props.locations.len();
        let row = props.highlighted;

        match key.code {
            KeyCode::Esc | KeyCode::Char('l') => vec![Action::PickerClose],
            _ if len == 0 => vec![],
            KeyCode::Char('j') | KeyCode::Down if row + 1 < len => {
                vec![Action::PickerHighlight(row + 1)]
            }
            KeyCode::Char('k') | KeyCode::Up if row > 0 => {
                vec![Action::PickerHighlight(row - 1)]
            }
            KeyCode::Enter => vec![Action::LocationSelect(row), Action::PickerClose],
            KeyCode::Char('x') | KeyCode::Delete => vec![Action::LocationRemove(row)],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let locations = props.locations.locations();
        let area = Self::area(area, locations.len());
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Saved locations ")
            .title_style(Style::default().fg(Color::Cyan).bold());

        if locations.is_empty() {
            let empty = Paragraph::new(Line::styled(
                "No saved locations.",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }

        self.ensure_visible(props.highlighted, area.height.saturating_sub(2) as usize);

        let current = props.locations.current_index();
        let items: Vec<ListItem> = locations
            .iter()
            .enumerate()
            .map(|(i, location)| {
                let marker = if Some(i) == current { LOCATION_ICON } else { "   " };
                ListItem::new(Line::raw(format!("{marker}{}", location.display_name())))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

        let mut state = ListState::default().with_selected(Some(props.highlighted));
        *state.offset_mut() = self.scroll_offset;
        frame.render_stateful_widget(list, area, &mut state);
    }
}
