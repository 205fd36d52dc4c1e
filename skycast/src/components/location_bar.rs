use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use skycast_core::{LocationStore, MeasureUnits};

use super::{Component, LOCATION_ICON};
use crate::action::Action;

pub struct LocationBar;

pub struct LocationBarProps<'a> {
    pub locations: &'a LocationStore,
    pub units: MeasureUnits,
}

impl Component<Action> for LocationBar {
    type Props<'a> = LocationBarProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let units = Span::styled(
            format!("  [{}]", props.units),
            Style::default().fg(Color::DarkGray),
        );

        let line = match (props.locations.current(), props.locations.current_index()) {
            (Some(location), Some(index)) => Line::from(vec![
                Span::raw(LOCATION_ICON),
                Span::styled(
                    location.display_name(),
                    Style::default().fg(Color::White).bold(),
                ),
                Span::styled(
                    format!("  ({}/{})", index + 1, props.locations.len()),
                    Style::default().fg(Color::Cyan),
                ),
                units,
            ]),
            _ => Line::from(vec![
                Span::styled(
                    "No saved locations. Press a to add one.",
                    Style::default().fg(Color::Yellow),
                ),
                units,
            ]),
        };

        frame.render_widget(Paragraph::new(line.centered()), area);
    }
}
