//! Current conditions, one of four revolving pages at a time

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use skycast_core::{Carousel, SurfaceState, WeatherSnapshot};

use super::{Component, StatusLine, page_dots};
use crate::action::Action;

pub const PAGE_TITLES: [&str; 4] = ["Conditions", "Temperature", "Wind", "Details"];

pub struct CurrentPanel;

pub struct CurrentPanelProps<'a> {
    pub surface: &'a SurfaceState<WeatherSnapshot>,
    pub carousel: &'a Carousel,
    pub spinner_frame: usize,
}

impl CurrentPanel {
    pub const HEIGHT: u16 = 10;

    fn page_lines(snapshot: &WeatherSnapshot, page: usize) -> Vec<Line<'static>> {
        let t = &snapshot.temperature;
        let w = &snapshot.wind;
        let m = &snapshot.misc;
        match page {
            0 => vec![
                Line::styled(
                    snapshot.condition.name.clone(),
                    Style::default().fg(Color::White).bold(),
                ),
                Line::raw(snapshot.condition.description.clone()),
                Line::styled(
                    snapshot.condition.icon_ref.clone(),
                    Style::default().fg(Color::DarkGray),
                ),
            ],
            1 => vec![
                row("Air", format!("{:.1} {}", t.air, t.unit)),
                row("Feels like", format!("{:.1} {}", t.feels_like, t.unit)),
                row("Low / High", format!("{:.1} / {:.1} {}", t.min, t.max, t.unit)),
                row("Humidity", format!("{:.0}%", t.humidity)),
                row("Pressure", format!("{:.0} hPa", t.pressure)),
            ],
            2 => {
                let mut lines = vec![
                    row("Speed", format!("{:.1} {}", w.speed, w.unit)),
                    row(
                        "Direction",
                        format!("{} ({:.0}°)", w.direction_compass, w.direction_degrees),
                    ),
                ];
                if let Some(gust) = w.gust {
                    lines.push(row("Gusts", format!("{gust:.1} {}", w.unit)));
                }
                lines
            }
            _ => vec![
                row("Visibility", format!("{:.1} km", m.visibility / 1000.0)),
                row("Cloud cover", format!("{:.0}%", m.cloud_cover)),
                row("Observed", m.timestamp.format("%Y-%m-%d %H:%M UTC").to_string()),
            ],
        }
    }
}

fn row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:>12}  "), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(Color::White)),
    ])
}

impl Component<Action> for CurrentPanel {
    type Props<'a> = CurrentPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let page = props.carousel.page();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" Current · {} ", PAGE_TITLES[page % PAGE_TITLES.len()]))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_bottom(Line::from(page_dots(page, props.carousel.page_count())).centered());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [body, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
            .areas(inner);

        let status_line = StatusLine::line(props.surface.status(), props.spinner_frame);
        match props.surface.data() {
            Some(snapshot) => {
                let lines = Self::page_lines(snapshot, page);
                frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
                frame.render_widget(Paragraph::new(status_line.centered()), status);
            }
            // Cold surface: status only
            None => {
                let [_, middle, _] = Layout::vertical([
                    Constraint::Fill(1),
                    Constraint::Length(1),
                    Constraint::Fill(1),
                ])
                .areas(inner);
                frame.render_widget(Paragraph::new(status_line.centered()), middle);
            }
        }
    }
}
