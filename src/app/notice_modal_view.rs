use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::quiz::Notice;

use super::{App, view_style};

impl App {
    pub(super) fn render_notice_modal(&self, f: &mut Frame, terminal_size: Rect) {
        let Some(notice) = &self.notice else {
            return;
        };

        let (title, body) = match notice {
            Notice::NoQuestions { category, topic } => (
                "No questions available",
                if category.is_empty() || topic.is_empty() {
                    "Pick a category and a topic first.".to_string()
                } else {
                    format!("There are no questions for {} / {}.", category, topic)
                },
            ),
        };

        let modal_rect = self.modal_rect(terminal_size);
        let paragraph = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(body, Style::default().fg(Color::White))),
            Line::from(""),
            Line::from(Span::styled(
                "[ OK ]",
                Style::default()
                    .fg(Color::White)
                    .bg(view_style::ACCENT_COLOR)
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(Line::from(Span::styled(
                    title,
                    Style::default()
                        .fg(view_style::WRONG_COLOR)
                        .add_modifier(Modifier::BOLD),
                )))
                .title_alignment(Alignment::Center)
                .border_style(Style::default().fg(view_style::WRONG_COLOR)),
        );

        f.render_widget(Clear, modal_rect);
        f.render_widget(paragraph, modal_rect);
    }
}
