use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use super::{App, ui_helpers, view_style};

const RECENT_LIMIT: usize = 50;

impl App {
    pub(super) fn render_history(&self, f: &mut Frame, area: Rect) {
        let banner_height = if self.last_result.is_some() { 3 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(banner_height), Constraint::Min(0)])
            .split(area);

        if let Some(result) = &self.last_result {
            let color = view_style::score_color(result.percent());
            let banner = Paragraph::new(vec![
                Line::from(Span::styled(
                    format!("{} · {}", result.category, result.topic),
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    format!("You scored {} of {}", result.score, result.total),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
            ])
            .alignment(Alignment::Center);
            f.render_widget(banner, rows[0]);
        }

        if self.results.is_empty() {
            self.render_empty_state(f, rows[1], "No saved results yet.");
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(rows[1]);

        self.render_summary_list(f, columns[0]);
        self.render_recent_results(f, columns[1]);
    }

    fn render_summary_list(&self, f: &mut Frame, area: Rect) {
        let name_width = area.width.saturating_sub(24) as usize;

        let items: Vec<ListItem> = self
            .summaries
            .iter()
            .enumerate()
            .map(|(i, summary)| {
                let label = ui_helpers::truncate_label(
                    &format!("{} / {}", summary.category, summary.topic),
                    name_width.max(8),
                );
                let metric = format!(
                    "{:>3}× {:>3}/{:<3} {:>5.0}%",
                    summary.attempts,
                    summary.best_score,
                    summary.best_total,
                    summary.average_percent
                );
                let line = Line::from(vec![
                    Span::raw(format!("{:<width$} ", label, width = name_width.max(8)))
                        .fg(Color::White),
                    Span::raw(metric).fg(view_style::score_color(summary.average_percent)),
                ]);

                if i == self.history_index {
                    ListItem::new(line).style(Style::default().bg(Color::DarkGray))
                } else {
                    ListItem::new(line)
                }
            })
            .collect();

        let mut list_state = ListState::default();
        if !self.summaries.is_empty() {
            list_state.select(Some(self.history_index.min(self.summaries.len() - 1)));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(Line::from(view_style::label_span("By topic", true)))
                    .title(
                        Line::from(view_style::label_span("runs  best   avg", false))
                            .alignment(Alignment::Right),
                    )
                    .border_style(Style::default().fg(view_style::ACCENT_COLOR)),
            )
            .highlight_style(Style::default());

        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_recent_results(&self, f: &mut Frame, area: Rect) {
        let selected = self.summaries.get(self.history_index);

        let items: Vec<ListItem> = self
            .results
            .iter()
            .rev()
            .filter(|result| {
                selected.is_none_or(|s| s.category == result.category && s.topic == result.topic)
            })
            .take(RECENT_LIMIT)
            .map(|result| {
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}  ", result.date)).fg(Color::Gray),
                    Span::raw(format!("{}/{}", result.score, result.total))
                        .fg(view_style::score_color(result.percent())),
                ]))
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(Line::from(view_style::label_span("Recent", true)))
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(list, area);
    }
}
