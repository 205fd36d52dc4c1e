//! Root component: lays out the panels and maps dashboard keys

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders},
};
use skycast_core::Surface;

use super::{
    AddLocation, AddLocationProps, Component, CurrentPanel, CurrentPanelProps, ForecastPanel,
    ForecastPanelProps, HelpBar, HelpBarProps, HelpMode, LocationBar, LocationBarProps,
    LocationList, LocationListProps, StatusLine, StatusLineProps, spinner,
};
use crate::action::Action;
use tui_dispatch::EventKind;
use crate::state::AppState;

pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Root component. Owns the overlays and routes keys to the topmost one.
#[derive(Default)]
pub struct Dashboard {
    add_location: AddLocation,
    location_list: LocationList,
}

impl Dashboard {
    /// Create a new dashboard with both overlays closed.
    pub fn new() -> Self {
        Self::default()
    }

    fn dashboard_keys(state: &AppState, code: KeyCode) -> Vec<Action> {
        let current = state.locations.current_index();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            KeyCode::Char('a') => vec![Action::EditorOpen],
            KeyCode::Char('l') => vec![Action::PickerOpen],
            KeyCode::Left => vec![Action::LocationPrev],
            KeyCode::Right => vec![Action::LocationNext],
            KeyCode::Char('<') => match current {
                Some(i) if i > 0 => vec![Action::LocationReorder(i, i - 1)],
                _ => vec![],
            },
            KeyCode::Char('>') => match current {
                Some(i) if i + 1 < state.locations.len() => {
                    vec![Action::LocationReorder(i, i + 1)]
                }
                _ => vec![],
            },
            KeyCode::Char('d') | KeyCode::Delete => match current {
                Some(i) => vec![Action::LocationRemove(i)],
                None => vec![],
            },
            KeyCode::Char('u') => vec![Action::UnitsCycle],
            KeyCode::Char('r') => vec![Action::WeatherRefresh],
            KeyCode::Char(c @ '1'..='4') => {
                vec![Action::PageSelect(Surface::Current, c as usize - '1' as usize)]
            }
            KeyCode::F(n @ 1..=5) => vec![Action::PageSelect(Surface::Extended, n as usize - 1)],
            _ => vec![],
        }
    }
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return vec![];
        }
        let EventKind::Key(key) = event else {
            return vec![];
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return vec![Action::Quit];
        }

        let state = props.state;
        if let Some(editor) = &state.editor {
            return self
                .add_location
                .handle_event(event, AddLocationProps { editor })
                .into_iter()
                .collect();
        }
        if let Some(highlighted) = state.picker {
            return self
                .location_list
                .handle_event(
                    event,
                    LocationListProps {
                        locations: &state.locations,
                        highlighted,
                    },
                )
                .into_iter()
                .collect();
        }
        Self::dashboard_keys(state, key.code)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;

        let busy = if state.is_busy() {
            format!(" {}", spinner(state.spinner_frame))
        } else {
            String::new()
        };
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" ☁ Skycast{busy} "))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let [location, current, forecast, status, help] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(CurrentPanel::HEIGHT),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        LocationBar.render(
            frame,
            location,
            LocationBarProps {
                locations: &state.locations,
                units: state.units,
            },
        );
        CurrentPanel.render(
            frame,
            current,
            CurrentPanelProps {
                surface: &state.current,
                carousel: &state.current_carousel,
                spinner_frame: state.spinner_frame,
            },
        );
        ForecastPanel.render(
            frame,
            forecast,
            ForecastPanelProps {
                surface: &state.extended,
                carousel: &state.extended_carousel,
                spinner_frame: state.spinner_frame,
            },
        );
        StatusLine.render(
            frame,
            status,
            StatusLineProps {
                status: &state.location_status,
                spinner_frame: state.spinner_frame,
            },
        );
        HelpBar.render(
            frame,
            help,
            HelpBarProps {
                mode: HelpMode::for_state(state),
            },
        );

        if let Some(highlighted) = state.picker {
            self.location_list.render(
                frame,
                area,
                LocationListProps {
                    locations: &state.locations,
                    highlighted,
                },
            );
        }
        if let Some(editor) = &state.editor {
            self.add_location
                .render(frame, area, AddLocationProps { editor });
        }
    }
}
