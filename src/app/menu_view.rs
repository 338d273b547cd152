use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{List, ListItem, ListState, Paragraph},
};

use super::{App, MENU_ITEMS, view_style};

impl App {
    pub(super) fn render_menu(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Length(3),
                Constraint::Length(MENU_ITEMS.len() as u16 + 1),
                Constraint::Min(0),
            ])
            .split(area);

        let question_total: usize = self
            .session
            .categories()
            .entries()
            .iter()
            .flat_map(|entry| {
                entry
                    .topics
                    .iter()
                    .map(move |topic| self.session.question_count(&entry.name, topic))
            })
            .sum();

        let subtitle = if question_total == 0 {
            Span::styled("no questions loaded", Style::default().fg(Color::Red))
        } else {
            Span::styled(
                format!(
                    "{} questions in {} categories",
                    question_total,
                    self.session.categories().len()
                ),
                Style::default().fg(Color::Gray),
            )
        };

        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                "quizline",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(subtitle),
        ])
        .alignment(Alignment::Center);
        f.render_widget(header, chunks[1]);

        let items: Vec<ListItem> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let line = Line::from(vec![
                    Span::raw(if i == self.menu_index { "› " } else { "  " })
                        .fg(view_style::ACCENT_COLOR),
                    view_style::label_span(label, i == self.menu_index),
                ]);
                ListItem::new(line)
            })
            .collect();

        let mut list_state = ListState::default();
        list_state.select(Some(self.menu_index));

        let menu_area = centered_column(chunks[2], 24);
        f.render_stateful_widget(List::new(items), menu_area, &mut list_state);
    }
}

pub(super) fn centered_column(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y,
        width,
        area.height,
    )
}
