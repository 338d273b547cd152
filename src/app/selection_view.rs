use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
};

use super::{App, SelectionFocus, ui_helpers, view_style};

impl App {
    pub(super) fn render_selection(&self, f: &mut Frame, area: Rect) {
        let categories = self.session.categories();
        if categories.is_empty() {
            self.render_empty_state(f, area, "No categories available. Check the questions file.");
            return;
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);
        let label_width = columns[0].width.saturating_sub(8) as usize;

        let category_items: Vec<ListItem> = categories
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                selection_item(
                    &ui_helpers::truncate_label(&entry.name, label_width),
                    None,
                    i == self.category_index,
                    self.selection_focus == SelectionFocus::Category,
                )
            })
            .collect();

        let category_name = self.session.selected_category().to_string();
        let topic_items: Vec<ListItem> = self
            .current_topics()
            .iter()
            .enumerate()
            .map(|(i, topic)| {
                selection_item(
                    &ui_helpers::truncate_label(topic, label_width.saturating_sub(5)),
                    Some(self.session.question_count(&category_name, topic)),
                    i == self.topic_index,
                    self.selection_focus == SelectionFocus::Topic,
                )
            })
            .collect();

        self.render_selection_list(
            f,
            columns[0],
            "Category",
            category_items,
            self.category_index,
            self.selection_focus == SelectionFocus::Category,
        );
        self.render_selection_list(
            f,
            columns[1],
            "Topic",
            topic_items,
            self.topic_index,
            self.selection_focus == SelectionFocus::Topic,
        );
    }

    fn render_selection_list(
        &self,
        f: &mut Frame,
        area: Rect,
        title: &str,
        items: Vec<ListItem>,
        selected: usize,
        focused: bool,
    ) {
        let border_color = if focused {
            view_style::ACCENT_COLOR
        } else {
            Color::DarkGray
        };

        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(selected));
        }

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title(Line::from(view_style::label_span(title, focused)))
                    .title_alignment(ratatui::layout::Alignment::Center)
                    .border_style(Style::default().fg(border_color)),
            )
            .highlight_style(Style::default());

        f.render_stateful_widget(list, area, &mut list_state);
    }
}

fn selection_item(label: &str, count: Option<usize>, selected: bool, focused: bool) -> ListItem<'static> {
    let count_span = match count {
        Some(count) => Span::raw(format!(" ({})", count)).fg(Color::Gray),
        None => Span::raw(""),
    };

    if selected && focused {
        let bg = view_style::ACCENT_COLOR;
        ListItem::new(Line::from(vec![
            Span::raw("● ").fg(view_style::text_color_for_bg(bg)),
            Span::raw(label.to_string()).fg(view_style::text_color_for_bg(bg)),
            count_span,
        ]))
        .style(Style::default().bg(bg))
    } else if selected {
        ListItem::new(Line::from(vec![
            Span::raw("● ").fg(view_style::ACCENT_COLOR),
            Span::raw(label.to_string()).fg(Color::White),
            count_span,
        ]))
    } else {
        ListItem::new(Line::from(vec![
            Span::raw("  "),
            Span::raw(label.to_string()).fg(Color::White),
            count_span,
        ]))
    }
}
