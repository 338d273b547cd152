use std::time::Instant;

use log::{error, warn};

use crate::{
    domain,
    quiz::{Effect, Route},
    storage,
};

use super::{App, Screen, SelectionFocus};

impl App {
    pub(super) fn apply_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Notice(notice) => self.notice = Some(notice),
                Effect::Persist(result) => {
                    if let Err(e) = storage::append_result(&self.results_path, &result) {
                        error!("Could not save result: {}", e);
                    }
                    self.last_result = Some(result);
                }
                Effect::Navigate(Route::Menu) => {
                    self.option_index = 0;
                    self.open_screen(Screen::Menu);
                }
                Effect::Navigate(Route::Results) => {
                    self.option_index = 0;
                    self.open_screen(Screen::History);
                }
            }
        }
        self.render_needed = true;
    }

    pub(super) fn poll_session(&mut self, now: Instant) {
        let question_before = self.session.current_index();
        let effects = self.session.poll(now);
        if self.session.current_index() != question_before {
            self.option_index = 0;
            self.render_needed = true;
        }
        if !effects.is_empty() {
            self.apply_effects(effects);
        }
    }

    pub(super) fn reload_history(&mut self) {
        self.results = match storage::load_results(&self.results_path) {
            Ok(results) => results,
            Err(e) => {
                warn!("Could not read results: {}", e);
                Vec::new()
            }
        };
        self.summaries = domain::summarize_results(&self.results);
    }

    pub(super) fn sync_selection(&mut self) {
        let categories = self.session.categories();
        if categories.is_empty() {
            self.category_index = 0;
            self.topic_index = 0;
            return;
        }

        self.category_index = self.category_index.min(categories.len() - 1);
        let Some(entry) = categories.by_index(self.category_index).cloned() else {
            return;
        };
        if entry.topics.is_empty() {
            self.topic_index = 0;
        } else {
            self.topic_index = self.topic_index.min(entry.topics.len() - 1);
        }

        self.session.select_category(&entry.name);
        if let Some(topic) = entry.topics.get(self.topic_index) {
            self.session.select_topic(topic);
        }
    }

    pub(super) fn move_category(&mut self, forward: bool) {
        let len = self.session.categories().len();
        self.category_index = if forward {
            super::ui_helpers::wrap_next_index(self.category_index, len)
        } else {
            super::ui_helpers::wrap_prev_index(self.category_index, len)
        };
        self.topic_index = 0;
        self.sync_selection();
    }

    pub(super) fn move_topic(&mut self, forward: bool) {
        let len = self.current_topics().len();
        self.topic_index = if forward {
            super::ui_helpers::wrap_next_index(self.topic_index, len)
        } else {
            super::ui_helpers::wrap_prev_index(self.topic_index, len)
        };
        self.sync_selection();
    }

    pub(super) fn current_topics(&self) -> Vec<String> {
        self.session
            .categories()
            .by_index(self.category_index)
            .map(|entry| entry.topics.clone())
            .unwrap_or_default()
    }

    pub(super) fn start_quiz(&mut self) {
        let effects = self.session.start(Instant::now());
        let refused = !self.session.is_started();
        self.apply_effects(effects);
        if !refused {
            self.option_index = 0;
            self.screen = Screen::Quiz;
            self.selection_focus = SelectionFocus::Category;
        }
    }

    pub(super) fn answer_selected(&mut self, option: usize) {
        let effects = self.session.answer(Instant::now(), option);
        self.apply_effects(effects);
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::{Path, PathBuf},
        time::{Duration, SystemTime},
    };

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use log::LevelFilter;

    use super::*;
    use crate::{
        config::Settings,
        domain::{Question, TestResult},
        quiz::{Notice, Phase},
    };

    fn unique_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("{}_{}", prefix, now));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn question(text: &str, options: usize, correct: usize) -> Question {
        Question {
            category: "Science".to_string(),
            topic: "Physics".to_string(),
            question: text.to_string(),
            options: (1..=options).map(|n| format!("option {}", n)).collect(),
            correct,
        }
    }

    fn app_over(dir: &Path, questions: &[Question]) -> App {
        let questions_path = dir.join("questions.json");
        fs::write(&questions_path, serde_json::to_string(questions).unwrap()).unwrap();
        let settings = Settings {
            questions_path,
            question_seconds: 30,
            reveal_seconds: 3,
            score_offset: 1,
            shuffle_questions: false,
            log_level: LevelFilter::Off,
        };
        App::with_results_path(&settings, dir.join("results.json"))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn result() -> TestResult {
        TestResult::new(
            "Science",
            "Physics",
            3,
            2,
            chrono::NaiveDate::from_ymd_opt(2026, 4, 2).unwrap(),
        )
    }

    #[test]
    fn test_persist_appends_and_remembers_result() {
        let dir = unique_dir("quizline_app_persist");
        let mut app = app_over(&dir, &[question("Q1", 4, 0)]);

        app.apply_effects(vec![
            Effect::Persist(result()),
            Effect::Navigate(Route::Results),
        ]);

        let stored = storage::load_results(&dir.join("results.json")).unwrap();
        assert_eq!(stored, vec![result()]);
        assert_eq!(app.last_result, Some(result()));
        assert_eq!(app.screen, Screen::History);
        assert_eq!(app.results, vec![result()]);
        assert_eq!(app.summaries.len(), 1);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_unreadable_results_file_keeps_app_running() {
        let dir = unique_dir("quizline_app_corrupt");
        let results_path = dir.join("results.json");
        fs::write(&results_path, "{ not json").unwrap();
        let mut app = app_over(&dir, &[question("Q1", 4, 0)]);
        assert!(app.results.is_empty());

        app.apply_effects(vec![
            Effect::Persist(result()),
            Effect::Navigate(Route::Results),
        ]);

        assert_eq!(app.last_result, Some(result()));
        assert_eq!(app.screen, Screen::History);
        assert!(app.results.is_empty());
        assert_eq!(fs::read_to_string(&results_path).unwrap(), "{ not json");
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert_eq!(app.screen, Screen::Menu);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_notice_is_cleared_by_enter_or_esc() {
        let dir = unique_dir("quizline_app_notice");
        let mut app = app_over(&dir, &[]);

        app.start_quiz();
        assert_eq!(
            app.notice,
            Some(Notice::NoQuestions {
                category: String::new(),
                topic: String::new(),
            })
        );
        assert_eq!(app.screen, Screen::Menu);

        assert!(!app.handle_key(key(KeyCode::Enter)));
        assert!(app.notice.is_none());

        app.apply_effects(vec![Effect::Notice(Notice::NoQuestions {
            category: "Science".to_string(),
            topic: "Physics".to_string(),
        })]);
        assert!(app.in_notice());
        // Keys other than the acknowledgements leave the modal up.
        assert!(!app.handle_key(key(KeyCode::Char('q'))));
        assert!(app.in_notice());
        assert!(!app.handle_key(key(KeyCode::Esc)));
        assert!(app.notice.is_none());

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn test_cursor_resets_when_next_question_has_fewer_options() {
        let dir = unique_dir("quizline_app_cursor");
        let mut app = app_over(&dir, &[question("Q1", 4, 0), question("Q2", 2, 1)]);

        app.start_quiz();
        assert_eq!(app.screen, Screen::Quiz);

        app.option_index = 3;
        app.answer_selected(3);
        assert_eq!(app.session.phase(), Phase::Revealing);

        app.poll_session(Instant::now() + Duration::from_secs(4));
        assert_eq!(app.session.current_index(), 1);
        assert_eq!(app.session.phase(), Phase::AwaitingAnswer);
        assert_eq!(app.option_index, 0);

        assert!(!app.handle_key(key(KeyCode::Enter)));
        assert!(app.session.is_answered());
        assert_eq!(app.session.selected_answer(), Some(0));

        let _ = fs::remove_dir_all(dir);
    }
}
