use ratatui::{
    prelude::Span,
    style::{Color, Modifier, Style},
};

use crate::constants::COUNTDOWN_COLORS;

pub(super) const CORRECT_COLOR: Color = Color::Rgb(0, 176, 80);
pub(super) const WRONG_COLOR: Color = Color::Rgb(220, 38, 38);
pub(super) const ACCENT_COLOR: Color = Color::Rgb(102, 51, 255);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum OptionMark {
    Plain,
    Cursor,
    Correct,
    Wrong,
}

pub(super) fn option_mark(
    index: usize,
    correct: usize,
    selected: Option<usize>,
    revealed: Option<usize>,
    answered: bool,
    cursor: usize,
) -> OptionMark {
    if selected == Some(index) {
        if index == correct {
            OptionMark::Correct
        } else {
            OptionMark::Wrong
        }
    } else if revealed == Some(index) {
        OptionMark::Correct
    } else if !answered && cursor == index {
        OptionMark::Cursor
    } else {
        OptionMark::Plain
    }
}

pub(super) fn option_style(mark: OptionMark) -> Style {
    match mark {
        OptionMark::Plain => Style::default().fg(Color::White),
        OptionMark::Cursor => Style::default().fg(Color::White).bg(ACCENT_COLOR),
        OptionMark::Correct => Style::default()
            .fg(text_color_for_bg(CORRECT_COLOR))
            .bg(CORRECT_COLOR)
            .add_modifier(Modifier::BOLD),
        OptionMark::Wrong => Style::default()
            .fg(text_color_for_bg(WRONG_COLOR))
            .bg(WRONG_COLOR)
            .add_modifier(Modifier::BOLD),
    }
}

pub(super) fn countdown_color(seconds: u32) -> Color {
    if seconds <= COUNTDOWN_COLORS.danger_at {
        COUNTDOWN_COLORS.danger
    } else if seconds <= COUNTDOWN_COLORS.warn_at {
        COUNTDOWN_COLORS.warn
    } else {
        COUNTDOWN_COLORS.calm
    }
}

pub(super) fn text_color_for_bg(bg_color: Color) -> Color {
    if let Color::Rgb(r, g, b) = bg_color {
        let brightness = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if brightness > 128 {
            Color::Black
        } else {
            Color::White
        }
    } else {
        Color::White
    }
}

pub(super) fn label_span(label: &str, active: bool) -> Span<'static> {
    let style = if active {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Span::styled(label.to_string(), style)
}

pub(super) fn score_color(percent: f64) -> Color {
    if percent >= 80.0 {
        CORRECT_COLOR
    } else if percent >= 50.0 {
        COUNTDOWN_COLORS.warn
    } else {
        WRONG_COLOR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_color_thresholds() {
        assert_eq!(countdown_color(30), COUNTDOWN_COLORS.calm);
        assert_eq!(countdown_color(21), COUNTDOWN_COLORS.calm);
        assert_eq!(countdown_color(20), COUNTDOWN_COLORS.warn);
        assert_eq!(countdown_color(11), COUNTDOWN_COLORS.warn);
        assert_eq!(countdown_color(10), COUNTDOWN_COLORS.danger);
        assert_eq!(countdown_color(0), COUNTDOWN_COLORS.danger);
    }

    #[test]
    fn test_option_marks_after_wrong_answer() {
        let mark = |index| option_mark(index, 2, Some(0), Some(2), true, 0);
        assert_eq!(mark(0), OptionMark::Wrong);
        assert_eq!(mark(1), OptionMark::Plain);
        assert_eq!(mark(2), OptionMark::Correct);
    }

    #[test]
    fn test_option_marks_before_answer_follow_cursor() {
        assert_eq!(option_mark(1, 2, None, None, false, 1), OptionMark::Cursor);
        assert_eq!(option_mark(0, 2, None, None, false, 1), OptionMark::Plain);
    }

    #[test]
    fn test_text_color_for_bg() {
        assert_eq!(text_color_for_bg(Color::Rgb(255, 255, 0)), Color::Black);
        assert_eq!(text_color_for_bg(Color::Rgb(0, 0, 255)), Color::White);
    }
}
