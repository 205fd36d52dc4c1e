use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::Component;
use crate::action::Action;
use crate::state::AppState;

pub struct HelpBar;

/// Which key set the bar lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpMode {
    Dashboard,
    Editor,
    LocationList,
}

impl HelpMode {
    /// The topmost open overlay wins.
    pub fn for_state(state: &AppState) -> Self {
        if state.editor.is_some() {
            HelpMode::Editor
        } else if state.picker.is_some() {
            HelpMode::LocationList
        } else {
            HelpMode::Dashboard
        }
    }
}

pub struct HelpBarProps {
    pub mode: HelpMode,
}

const DASHBOARD_KEYS: &[(&str, &str)] = &[
    ("a", "add"),
    ("l", "list"),
    ("←→", "place"),
    ("u", "units"),
    ("r", "refresh"),
    ("1-4", "page"),
    ("F1-5", "day"),
    ("q", "quit"),
];

const LIST_KEYS: &[(&str, &str)] = &[
    ("↑↓", "move"),
    ("Enter", "select"),
    ("x", "remove"),
    ("Esc", "close"),
];

const EDITOR_KEYS: &[(&str, &str)] = &[
    ("Tab", "mode"),
    ("Enter", "add"),
    ("Esc", "cancel"),
];

impl Component<Action> for HelpBar {
    type Props<'a> = HelpBarProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let keys = match props.mode {
            HelpMode::Dashboard => DASHBOARD_KEYS,
            HelpMode::Editor => EDITOR_KEYS,
            HelpMode::LocationList => LIST_KEYS,
        };

        let spans: Vec<Span> = keys
            .iter()
            .flat_map(|(key, label)| {
                [
                    Span::styled(format!(" {key}"), Style::default().fg(Color::Cyan).bold()),
                    Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
