use ratatui::style::Color;

pub const TIME_SETTINGS: TimeSettings = TimeSettings {
    tick_ms: 1000,
    poll_ms: 50,
    target_fps: 24,
};

pub const QUIZ_DEFAULTS: QuizDefaults = QuizDefaults {
    question_seconds: 30,
    reveal_seconds: 3,
    score_offset: 1,
};

pub const COUNTDOWN_COLORS: CountdownColors = CountdownColors {
    warn_at: 20,
    danger_at: 10,
    calm: Color::Rgb(0, 176, 80),
    warn: Color::Rgb(255, 204, 0),
    danger: Color::Rgb(255, 0, 0),
};

pub const FILE_NAMES: FileNames = FileNames {
    results: "results.json",
    questions: "questions.json",
    legacy_questions: "./preguntas.json",
    config: "config.toml",
    log: "quizline.log",
};

pub const MAX_BACKUPS: usize = 10;

pub struct TimeSettings {
    pub tick_ms: u64,
    pub poll_ms: u64,
    pub target_fps: u64,
}

pub struct QuizDefaults {
    pub question_seconds: u32,
    pub reveal_seconds: u32,
    pub score_offset: u32,
}

pub struct CountdownColors {
    pub warn_at: u32,
    pub danger_at: u32,
    pub calm: Color,
    pub warn: Color,
    pub danger: Color,
}

pub struct FileNames {
    pub results: &'static str,
    pub questions: &'static str,
    pub legacy_questions: &'static str,
    pub config: &'static str,
    pub log: &'static str,
}
