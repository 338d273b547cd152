use std::{
    io,
    path::PathBuf,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::info;
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::{
    config::Settings,
    constants::TIME_SETTINGS,
    domain::{TestResult, TopicSummary},
    quiz::{Notice, QuizSession},
    storage,
};

mod event_handlers;
mod history_view;
mod menu_view;
mod notice_modal_view;
mod quiz_view;
mod render_views;
mod selection_view;
mod session_state;
mod ui_helpers;
mod view_style;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Menu,
    Selection,
    Quiz,
    History,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SelectionFocus {
    Category,
    Topic,
}

const MENU_ITEMS: [&str; 3] = ["Start a quiz", "Scores", "Quit"];

struct App {
    session: QuizSession,
    screen: Screen,
    notice: Option<Notice>,
    menu_index: usize,
    category_index: usize,
    topic_index: usize,
    selection_focus: SelectionFocus,
    option_index: usize,
    results_path: PathBuf,
    results: Vec<TestResult>,
    summaries: Vec<TopicSummary>,
    history_index: usize,
    last_result: Option<TestResult>,
    render_needed: bool,
}

impl App {
    fn new(settings: &Settings) -> Self {
        Self::with_results_path(settings, storage::get_results_path())
    }

    fn with_results_path(settings: &Settings, results_path: PathBuf) -> Self {
        let questions = storage::load_questions_or_empty(&settings.questions_path);
        let session = QuizSession::new(questions, settings.session_settings());

        let mut app = Self {
            session,
            screen: Screen::Menu,
            notice: None,
            menu_index: 0,
            category_index: 0,
            topic_index: 0,
            selection_focus: SelectionFocus::Category,
            option_index: 0,
            results_path,
            results: Vec::new(),
            summaries: Vec::new(),
            history_index: 0,
            last_result: None,
            render_needed: true,
        };

        app.sync_selection();
        app.reload_history();
        app
    }

    fn open_screen(&mut self, screen: Screen) {
        if screen == Screen::History {
            self.reload_history();
            self.history_index = 0;
        }
        if screen == Screen::Selection {
            self.sync_selection();
        }
        self.screen = screen;
        self.render_needed = true;
    }

    fn in_notice(&self) -> bool {
        self.notice.is_some()
    }

    fn modal_rect(&self, terminal_size: Rect) -> Rect {
        self.modal_rect_ratio(terminal_size, 1, 3)
    }

    fn modal_rect_ratio(&self, terminal_size: Rect, numerator: u16, denominator: u16) -> Rect {
        let target_width = terminal_size.width.saturating_mul(numerator) / denominator;
        let target_height = (terminal_size.height.saturating_mul(numerator) / denominator).max(7);

        let max_width = terminal_size.width.saturating_sub(2).max(1);
        let max_height = terminal_size.height.saturating_sub(2).max(1);

        let modal_width = target_width.max(36).clamp(1, max_width);
        let modal_height = target_height.clamp(1, max_height);

        let modal_x = (terminal_size.width.saturating_sub(modal_width)) / 2;
        let modal_y = (terminal_size.height.saturating_sub(modal_height)) / 2;

        Rect::new(modal_x, modal_y, modal_width, modal_height)
    }
}

pub fn run_ui(settings: &Settings) -> Result<(), io::Error> {
    let mut app = App::new(settings);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let render_rate = Duration::from_millis(1000 / TIME_SETTINGS.target_fps);
    let poll_rate = Duration::from_millis(TIME_SETTINGS.poll_ms);
    let mut last_render = Instant::now() - render_rate;

    let outcome = loop {
        app.poll_session(Instant::now());
        if app.session.is_started() {
            app.render_needed = true;
        }

        if last_render.elapsed() >= render_rate && app.render_needed {
            if let Err(e) = terminal.draw(|f| app.draw_frame(f)) {
                break Err(e);
            }
            app.render_needed = false;
            last_render = Instant::now();
        }

        let timeout = app
            .session
            .next_deadline()
            .map(|due| due.saturating_duration_since(Instant::now()))
            .unwrap_or(poll_rate)
            .min(poll_rate);

        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break Ok(());
                    }
                }
                Ok(Event::Resize(_, _)) => app.render_needed = true,
                Ok(_) => {}
                Err(e) => break Err(e),
            },
            Ok(false) => {}
            Err(e) => break Err(e),
        }
    };

    info!("Leaving terminal UI");
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    outcome
}
