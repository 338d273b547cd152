use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::quiz::Phase;

use super::{App, ui_helpers, view_style};

impl App {
    pub(super) fn render_quiz(&self, f: &mut Frame, area: Rect) {
        let Some(question) = self.session.current_question() else {
            self.render_empty_state(f, area, "No test in progress.");
            return;
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(question.options.len() as u16 + 2),
                Constraint::Length(1),
            ])
            .split(area);

        let countdown = self.session.time_left();
        let countdown_color = if self.session.is_timer_running() {
            view_style::countdown_color(countdown)
        } else {
            Color::DarkGray
        };
        let status = Line::from(vec![
            Span::styled(
                format!(
                    "Question {} of {}",
                    self.session.current_index() + 1,
                    self.session.total()
                ),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(
                format!("Score: {}", self.session.score()),
                Style::default().fg(Color::White).bg(view_style::ACCENT_COLOR),
            ),
            Span::raw("   "),
            Span::styled(
                format!(" ⏱ {} ", ui_helpers::format_countdown(countdown)),
                Style::default()
                    .fg(view_style::text_color_for_bg(countdown_color))
                    .bg(countdown_color)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        f.render_widget(Paragraph::new(status).alignment(Alignment::Center), rows[0]);

        let heading = Line::from(Span::styled(
            format!(
                "{} · {}",
                self.session.selected_category(),
                self.session.selected_topic()
            ),
            Style::default().fg(Color::Gray),
        ));
        f.render_widget(Paragraph::new(heading).alignment(Alignment::Center), rows[1]);

        let prompt = Paragraph::new(Line::from(Span::styled(
            question.question.clone(),
            Style::default().fg(Color::White),
        )))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Left);
        f.render_widget(prompt, rows[2]);

        let items: Vec<ListItem> = question
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let mark = view_style::option_mark(
                    i,
                    question.correct,
                    self.session.selected_answer(),
                    self.session.revealed_correct(),
                    self.session.is_answered(),
                    self.option_index,
                );
                ListItem::new(Line::from(format!(" {}. {}", i + 1, option)))
                    .style(view_style::option_style(mark))
            })
            .collect();

        let options = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(options, rows[3]);

        let footer = match self.session.phase() {
            Phase::Revealing if self.session.selected_answer().is_none() => {
                Span::styled("Time is up.", Style::default().fg(view_style::WRONG_COLOR))
            }
            Phase::Revealing if self.session.revealed_correct().is_none() => {
                Span::styled("Correct!", Style::default().fg(view_style::CORRECT_COLOR))
            }
            Phase::Revealing => {
                Span::styled("Not quite.", Style::default().fg(view_style::WRONG_COLOR))
            }
            _ => Span::raw(""),
        };
        f.render_widget(
            Paragraph::new(Line::from(footer)).alignment(Alignment::Center),
            rows[4],
        );
    }
}
