use std::time::{Duration, Instant};

use chrono::NaiveDate;
use log::{debug, info};
use rand::seq::SliceRandom;

use crate::domain::{self, Categories, Question, TestResult};

use super::scheduler::{Scheduler, TaskHandle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Selecting,
    AwaitingAnswer,
    Revealing,
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Menu,
    Results,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    NoQuestions { category: String, topic: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    Notice(Notice),
    Persist(TestResult),
    Navigate(Route),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TimerTask {
    Countdown,
    Advance,
}

#[derive(Clone, Debug)]
pub struct SessionSettings {
    pub question_seconds: u32,
    pub tick: Duration,
    pub reveal: Duration,
    pub score_offset: u32,
    pub shuffle: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        use crate::constants::{QUIZ_DEFAULTS, TIME_SETTINGS};

        Self {
            question_seconds: QUIZ_DEFAULTS.question_seconds,
            tick: Duration::from_millis(TIME_SETTINGS.tick_ms),
            reveal: Duration::from_secs(u64::from(QUIZ_DEFAULTS.reveal_seconds)),
            score_offset: QUIZ_DEFAULTS.score_offset,
            shuffle: false,
        }
    }
}

pub struct QuizSession {
    settings: SessionSettings,
    questions: Vec<Question>,
    categories: Categories,
    selected_category: String,
    selected_topic: String,
    started: bool,
    phase: Phase,
    current_index: usize,
    score: u32,
    time_left: u32,
    timer_running: bool,
    answered: bool,
    selected_answer: Option<usize>,
    revealed_correct: Option<usize>,
    active: Vec<Question>,
    scheduler: Scheduler<TimerTask>,
    countdown: Option<TaskHandle>,
    reveal: Option<TaskHandle>,
    date_source: fn() -> NaiveDate,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, settings: SessionSettings) -> Self {
        let categories = Categories::from_questions(&questions);
        let time_left = settings.question_seconds;

        Self {
            settings,
            questions,
            categories,
            selected_category: String::new(),
            selected_topic: String::new(),
            started: false,
            phase: Phase::Selecting,
            current_index: 0,
            score: 0,
            time_left,
            timer_running: false,
            answered: false,
            selected_answer: None,
            revealed_correct: None,
            active: Vec::new(),
            scheduler: Scheduler::new(),
            countdown: None,
            reveal: None,
            date_source: domain::today,
        }
    }

    pub fn with_date_source(mut self, date_source: fn() -> NaiveDate) -> Self {
        self.date_source = date_source;
        self
    }

    pub fn categories(&self) -> &Categories {
        &self.categories
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total(&self) -> usize {
        self.active.len()
    }

    pub fn selected_answer(&self) -> Option<usize> {
        self.selected_answer
    }

    pub fn revealed_correct(&self) -> Option<usize> {
        self.revealed_correct
    }

    pub fn selected_category(&self) -> &str {
        &self.selected_category
    }

    pub fn selected_topic(&self) -> &str {
        &self.selected_topic
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.started {
            self.active.get(self.current_index)
        } else {
            None
        }
    }

    pub fn question_count(&self, category: &str, topic: &str) -> usize {
        self.questions
            .iter()
            .filter(|q| q.matches(category, topic))
            .count()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_due()
    }

    pub fn select_category(&mut self, category: &str) -> bool {
        if self.started {
            return false;
        }
        if self.selected_category != category {
            self.selected_topic.clear();
        }
        self.selected_category = category.to_string();
        true
    }

    pub fn select_topic(&mut self, topic: &str) -> bool {
        if self.started {
            return false;
        }
        self.selected_topic = topic.to_string();
        true
    }

    pub fn start(&mut self, now: Instant) -> Vec<Effect> {
        if self.started {
            return Vec::new();
        }

        let filtered =
            domain::filter_questions(&self.questions, &self.selected_category, &self.selected_topic);
        if filtered.is_empty() {
            info!(
                "No questions for category '{}' topic '{}'",
                self.selected_category, self.selected_topic
            );
            return vec![Effect::Notice(Notice::NoQuestions {
                category: self.selected_category.clone(),
                topic: self.selected_topic.clone(),
            })];
        }

        info!(
            "Starting session: {} / {} ({} questions)",
            self.selected_category,
            self.selected_topic,
            filtered.len()
        );
        self.active = filtered;
        self.started = true;
        self.restart_progress(now);
        Vec::new()
    }

    pub fn answer(&mut self, now: Instant, option: usize) -> Vec<Effect> {
        if self.phase != Phase::AwaitingAnswer || self.answered {
            return Vec::new();
        }
        let Some(correct) = self
            .active
            .get(self.current_index)
            .filter(|q| option < q.options.len())
            .map(|q| q.correct)
        else {
            return Vec::new();
        };

        self.answered = true;
        self.selected_answer = Some(option);
        if option == correct {
            self.score += 1;
        } else {
            self.revealed_correct = Some(correct);
        }
        debug!(
            "Answered question {} with option {} (correct: {})",
            self.current_index + 1,
            option,
            correct
        );

        self.begin_reveal(now);
        Vec::new()
    }

    pub fn poll(&mut self, now: Instant) -> Vec<Effect> {
        let mut effects = Vec::new();

        while let Some(due) = self.scheduler.pop_due(now) {
            match due.task {
                TimerTask::Countdown => {
                    if self.countdown != Some(due.handle) {
                        continue;
                    }
                    self.time_left = self.time_left.saturating_sub(1);
                    if self.time_left == 0 {
                        self.time_out(due.at);
                    }
                }
                TimerTask::Advance => {
                    if self.reveal != Some(due.handle) {
                        continue;
                    }
                    self.reveal = None;
                    effects.extend(self.advance(due.at));
                }
            }
        }

        effects
    }

    pub fn reset(&mut self, now: Instant) -> bool {
        if !self.started {
            return false;
        }
        info!("Resetting session: {} / {}", self.selected_category, self.selected_topic);
        self.restart_progress(now);
        true
    }

    pub fn abandon(&mut self) -> Vec<Effect> {
        if !self.started {
            return Vec::new();
        }
        info!(
            "Abandoned session at question {} of {}",
            self.current_index + 1,
            self.active.len()
        );
        self.stop_timers();
        self.started = false;
        self.phase = Phase::Selecting;
        self.clear_progress();
        self.active.clear();
        vec![Effect::Navigate(Route::Menu)]
    }

    pub fn leave(&mut self) -> Vec<Effect> {
        if self.started {
            return Vec::new();
        }
        self.phase = Phase::Selecting;
        vec![Effect::Navigate(Route::Menu)]
    }

    fn restart_progress(&mut self, now: Instant) {
        self.stop_timers();
        if self.settings.shuffle {
            self.active.shuffle(&mut rand::thread_rng());
        }
        self.score = 0;
        self.current_index = 0;
        self.begin_question(now);
    }

    fn begin_question(&mut self, now: Instant) {
        self.phase = Phase::AwaitingAnswer;
        self.time_left = self.settings.question_seconds;
        self.answered = false;
        self.selected_answer = None;
        self.revealed_correct = None;
        self.timer_running = true;
        self.countdown = Some(self.scheduler.schedule_repeating(
            now,
            self.settings.tick,
            TimerTask::Countdown,
        ));
    }

    fn time_out(&mut self, at: Instant) {
        debug!("Question {} timed out", self.current_index + 1);
        self.answered = true;
        self.selected_answer = None;
        self.revealed_correct = self.active.get(self.current_index).map(|q| q.correct);
        self.begin_reveal(at);
    }

    fn begin_reveal(&mut self, at: Instant) {
        self.stop_countdown();
        self.phase = Phase::Revealing;
        self.reveal = Some(
            self.scheduler
                .schedule(at, self.settings.reveal, TimerTask::Advance),
        );
    }

    fn advance(&mut self, at: Instant) -> Vec<Effect> {
        if self.current_index + 1 < self.active.len() {
            self.current_index += 1;
            self.begin_question(at);
            Vec::new()
        } else {
            self.finish()
        }
    }

    fn finish(&mut self) -> Vec<Effect> {
        self.stop_timers();
        self.started = false;
        self.phase = Phase::Finished;

        let result = TestResult::new(
            &self.selected_category,
            &self.selected_topic,
            self.score + self.settings.score_offset,
            self.active.len() as u32,
            (self.date_source)(),
        );
        info!(
            "Finished session: {} / {} scored {} of {}",
            result.category, result.topic, result.score, result.total
        );

        vec![Effect::Persist(result), Effect::Navigate(Route::Results)]
    }

    fn stop_countdown(&mut self) {
        if let Some(handle) = self.countdown.take() {
            self.scheduler.cancel(handle);
        }
        self.timer_running = false;
    }

    fn stop_timers(&mut self) {
        self.stop_countdown();
        if let Some(handle) = self.reveal.take() {
            self.scheduler.cancel(handle);
        }
    }

    fn clear_progress(&mut self) {
        self.score = 0;
        self.current_index = 0;
        self.time_left = self.settings.question_seconds;
        self.answered = false;
        self.selected_answer = None;
        self.revealed_correct = None;
    }
}
