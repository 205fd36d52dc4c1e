//! Extended forecast: one day of 3-hour steps per page

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use skycast_core::weather::forecast_pages;
use skycast_core::{Carousel, SurfaceState, WeatherSnapshot};

use super::{Component, StatusLine, page_dots};
use crate::action::Action;

pub struct ForecastPanel;

pub struct ForecastPanelProps<'a> {
    pub surface: &'a SurfaceState<Vec<WeatherSnapshot>>,
    pub carousel: &'a Carousel,
    pub spinner_frame: usize,
}

fn step_row(step: &WeatherSnapshot) -> Row<'static> {
    let precip = step
        .condition
        .chance_of_precip
        .map(|p| format!("{p}%"))
        .unwrap_or_default();
    Row::new(vec![
        step.misc.timestamp.format("%H:%M").to_string(),
        step.condition.name.clone(),
        format!("{:.1} {}", step.temperature.air, step.temperature.unit),
        precip,
        format!("{:.1} {} {}", step.wind.speed, step.wind.unit, step.wind.direction_compass),
    ])
}

impl Component<Action> for ForecastPanel {
    type Props<'a> = ForecastPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let page = props.carousel.page();
        let pages = props
            .surface
            .data()
            .map(|steps| forecast_pages(steps))
            .unwrap_or_default();
        let day = pages
            .get(page)
            .and_then(|steps| steps.first())
            .map(|step| step.misc.timestamp.format("%a %b %d").to_string());

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(match &day {
                Some(day) => format!(" Forecast · {day} "),
                None => " Forecast ".to_string(),
            })
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_bottom(Line::from(page_dots(page, props.carousel.page_count())).centered());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = StatusLine::line(props.surface.status(), props.spinner_frame);
        if props.surface.data().is_none() {
            let [_, middle, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(inner);
            frame.render_widget(Paragraph::new(status_line.centered()), middle);
            return;
        }

        let [body, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)])
            .areas(inner);

        match pages.get(page) {
            Some(steps) => {
                let header = Row::new(vec!["Time", "Sky", "Temp", "Precip", "Wind"])
                    .style(Style::default().fg(Color::DarkGray));
                let table = Table::new(
                    steps.iter().map(step_row),
                    [
                        Constraint::Length(6),
                        Constraint::Length(14),
                        Constraint::Length(10),
                        Constraint::Length(7),
                        Constraint::Min(12),
                    ],
                )
                .header(header);
                frame.render_widget(table, body);
            }
            None => {
                frame.render_widget(
                    Paragraph::new(Line::from("No forecast for this day.").centered()),
                    body,
                );
            }
        }
        frame.render_widget(Paragraph::new(status_line.centered()), status);
    }
}
