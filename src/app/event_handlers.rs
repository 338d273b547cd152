use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};

use crate::quiz::Phase;

use super::{App, MENU_ITEMS, Screen, SelectionFocus, ui_helpers};

impl App {
    pub(super) fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.render_needed = true;

        if self.in_notice() {
            self.handle_notice_key(key);
            return false;
        }

        match self.screen {
            Screen::Menu => self.handle_menu_key(key),
            Screen::Selection => {
                self.handle_selection_key(key);
                false
            }
            Screen::Quiz => {
                self.handle_quiz_key(key);
                false
            }
            Screen::History => {
                self.handle_history_key(key);
                false
            }
        }
    }

    fn handle_notice_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.notice = None;
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => true,
            KeyCode::Up => {
                self.menu_index = ui_helpers::wrap_prev_index(self.menu_index, MENU_ITEMS.len());
                false
            }
            KeyCode::Down => {
                self.menu_index = ui_helpers::wrap_next_index(self.menu_index, MENU_ITEMS.len());
                false
            }
            KeyCode::Char('s') => {
                self.open_screen(Screen::Selection);
                false
            }
            KeyCode::Char('h') => {
                self.open_screen(Screen::History);
                false
            }
            KeyCode::Enter => match self.menu_index {
                0 => {
                    self.open_screen(Screen::Selection);
                    false
                }
                1 => {
                    self.open_screen(Screen::History);
                    false
                }
                _ => true,
            },
            _ => false,
        }
    }

    fn handle_selection_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                let effects = self.session.leave();
                self.apply_effects(effects);
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.selection_focus = match self.selection_focus {
                    SelectionFocus::Category => SelectionFocus::Topic,
                    SelectionFocus::Topic => SelectionFocus::Category,
                };
            }
            KeyCode::Left => self.selection_focus = SelectionFocus::Category,
            KeyCode::Right => self.selection_focus = SelectionFocus::Topic,
            KeyCode::Up => match self.selection_focus {
                SelectionFocus::Category => self.move_category(false),
                SelectionFocus::Topic => self.move_topic(false),
            },
            KeyCode::Down => match self.selection_focus {
                SelectionFocus::Category => self.move_category(true),
                SelectionFocus::Topic => self.move_topic(true),
            },
            KeyCode::Enter => self.start_quiz(),
            _ => {}
        }
    }

    fn handle_quiz_key(&mut self, key: KeyEvent) {
        let option_count = self
            .session
            .current_question()
            .map_or(0, |question| question.options.len());

        match key.code {
            KeyCode::Esc => {
                let effects = self.session.abandon();
                self.apply_effects(effects);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                if self.session.reset(Instant::now()) {
                    self.option_index = 0;
                }
            }
            _ if self.session.phase() != Phase::AwaitingAnswer => {}
            KeyCode::Up => {
                self.option_index = ui_helpers::wrap_prev_index(self.option_index, option_count);
            }
            KeyCode::Down => {
                self.option_index = ui_helpers::wrap_next_index(self.option_index, option_count);
            }
            KeyCode::Enter => self.answer_selected(self.option_index),
            KeyCode::Char(c) => {
                if let Some(option) = ui_helpers::option_for_key(c) {
                    if option < option_count {
                        self.option_index = option;
                        self.answer_selected(option);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_history_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => {
                self.last_result = None;
                self.open_screen(Screen::Menu);
            }
            KeyCode::Char('n') => {
                self.last_result = None;
                self.open_screen(Screen::Selection);
            }
            KeyCode::Up => {
                self.history_index =
                    ui_helpers::wrap_prev_index(self.history_index, self.summaries.len());
            }
            KeyCode::Down => {
                self.history_index =
                    ui_helpers::wrap_next_index(self.history_index, self.summaries.len());
            }
            _ => {}
        }
    }
}
