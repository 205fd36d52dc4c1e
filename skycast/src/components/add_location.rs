//! Add-location overlay
//!
//! Text entry in one of three modes (zip, city, coordinates). Parsing and
//! validation happen in the reducer on submit.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::{Component, ERROR_ICON};
use crate::action::Action;
use tui_dispatch::EventKind;
use crate::state::{EditorMode, LocationEditor};

#[derive(Default)]
pub struct AddLocation;

pub struct AddLocationProps<'a> {
    pub editor: &'a LocationEditor,
}

impl AddLocation {
    pub const WIDTH: u16 = 56;
    pub const HEIGHT: u16 = 8;

    fn area(outer: Rect) -> Rect {
        let [row] = Layout::vertical([Constraint::Length(Self::HEIGHT)])
            .flex(Flex::Center)
            .areas(outer);
        let [area] = Layout::horizontal([Constraint::Length(Self::WIDTH)])
            .flex(Flex::Center)
            .areas(row);
        area
    }
}

impl Component<Action> for AddLocation {
    type Props<'a> = AddLocationProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        _props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let EventKind::Key(key) = event else {
            return None;
        };
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return None;
        }
        match key.code {
            KeyCode::Esc => Some(Action::EditorClose),
            KeyCode::Tab => Some(Action::EditorCycleMode),
            KeyCode::Enter => Some(Action::EditorSubmit),
            KeyCode::Backspace => Some(Action::EditorBackspace),
            KeyCode::Char(c) => Some(Action::EditorInput(c)),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let editor = props.editor;
        let area = Self::area(area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Add location ")
            .title_style(Style::default().fg(Color::Cyan).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let modes: Vec<Span> = EditorMode::ALL
            .iter()
            .map(|mode| {
                let style = if *mode == editor.mode {
                    Style::default().fg(Color::Black).bg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                Span::styled(format!(" {mode} "), style)
            })
            .collect();

        let input = if editor.input.is_empty() {
            Line::from(vec![
                Span::raw("> "),
                Span::styled(editor.mode.placeholder(), Style::default().fg(Color::DarkGray)),
            ])
        } else {
            Line::from(vec![
                Span::raw("> "),
                Span::styled(editor.input.clone(), Style::default().fg(Color::White)),
                Span::styled("_", Style::default().fg(Color::Cyan)),
            ])
        };

        let mut lines = vec![Line::from(modes), Line::raw(""), input, Line::raw("")];
        if let Some(error) = &editor.error {
            lines.push(Line::from(vec![
                Span::styled(ERROR_ICON, Style::default().fg(Color::Red)),
                Span::styled(error.clone(), Style::default().fg(Color::Red)),
            ]));
        }
        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_dispatch::testing::*;

    #[test]
    fn test_keys_map_to_editor_actions() {
        let mut overlay = AddLocation;
        let editor = LocationEditor::new();
        let mut send = |keys: &str| -> Vec<Action> {
            overlay
                .handle_event(&EventKind::Key(key(keys)), AddLocationProps { editor: &editor })
                .into_iter()
                .collect()
        };

        assert_eq!(send("q"), vec![Action::EditorInput('q')]);
        assert_eq!(send("tab"), vec![Action::EditorCycleMode]);
        assert_eq!(send("enter"), vec![Action::EditorSubmit]);
        assert_eq!(send("esc"), vec![Action::EditorClose]);
        assert!(send("up").is_empty());
    }

    #[test]
    fn test_render_shows_mode_and_error() {
        let mut render = RenderHarness::new(60, 12);
        let editor = LocationEditor {
            mode: EditorMode::City,
            input: "Paris".into(),
            error: Some("Enter City,Country or City,State,Country.".into()),
        };

        let output = render.render_to_string_plain(|frame| {
            AddLocation.render(frame, frame.area(), AddLocationProps { editor: &editor });
        });

        assert!(output.contains("Add location"));
        assert!(output.contains("> Paris_"));
        assert!(output.contains("Enter City,Country"));
    }
}
