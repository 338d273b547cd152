use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::{App, Screen, view_style};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();

        let screen_label = match self.screen {
            Screen::Menu => "menu",
            Screen::Selection => "choose a test",
            Screen::Quiz => "test",
            Screen::History => "scores",
        };

        let hint = match self.screen {
            Screen::Menu => "↑↓ move · enter select · q quit",
            Screen::Selection => "←→ column · ↑↓ move · enter start · esc menu",
            Screen::Quiz => "1-9/↑↓ enter answer · r restart · esc leave",
            Screen::History => "↑↓ move · n new test · esc menu",
        };

        let border_color = if self.screen == Screen::Quiz {
            view_style::countdown_color(self.session.time_left())
        } else {
            view_style::ACCENT_COLOR
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(
                Line::from(vec![
                    Span::styled(
                        "quizline",
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(
                        format!(" {}", screen_label),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::ITALIC),
                    ),
                ])
                .alignment(Alignment::Left),
            )
            .title_bottom(
                Line::from(Span::styled(hint, Style::default().fg(Color::Gray)))
                    .alignment(Alignment::Center),
            )
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(size);
        f.render_widget(block, size);

        match self.screen {
            Screen::Menu => self.render_menu(f, inner),
            Screen::Selection => self.render_selection(f, inner),
            Screen::Quiz => self.render_quiz(f, inner),
            Screen::History => self.render_history(f, inner),
        }

        if self.in_notice() {
            self.render_notice_modal(f, size);
        }
    }

    pub(super) fn render_empty_state(&self, f: &mut Frame, area: Rect, message: &str) {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}
