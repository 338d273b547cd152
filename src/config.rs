use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{FILE_NAMES, QUIZ_DEFAULTS, TIME_SETTINGS},
    error::{QuizError, Result},
    quiz::SessionSettings,
    storage,
};

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileConfig {
    pub questions_path: Option<PathBuf>,
    pub question_seconds: Option<u32>,
    pub reveal_seconds: Option<u32>,
    pub score_offset: Option<u32>,
    pub shuffle_questions: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub questions_path: PathBuf,
    pub question_seconds: u32,
    pub reveal_seconds: u32,
    pub score_offset: u32,
    pub shuffle_questions: bool,
    pub log_level: LevelFilter,
}

impl Settings {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            question_seconds: self.question_seconds,
            tick: Duration::from_millis(TIME_SETTINGS.tick_ms),
            reveal: Duration::from_secs(u64::from(self.reveal_seconds)),
            score_offset: self.score_offset,
            shuffle: self.shuffle_questions,
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    storage::get_config_dir().map(|dir| dir.join(FILE_NAMES.config))
}

pub fn read_config(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path).map_err(|e| QuizError::io(path, e))?;
    toml::from_str(&content).map_err(|source| QuizError::Config {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config() -> FileConfig {
    let Some(path) = config_path() else {
        warn!("Could not determine config directory, using defaults");
        return FileConfig::default();
    };

    if !path.exists() {
        debug!("No config file at {}, using defaults", path.display());
        return FileConfig::default();
    }

    match read_config(&path) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            debug!("Config: {:?}", config);
            config
        }
        Err(e) => {
            warn!("Ignoring config: {}", e);
            FileConfig::default()
        }
    }
}

pub fn resolve(file: FileConfig, questions_override: Option<PathBuf>) -> Settings {
    let questions_path = questions_override
        .or(file.questions_path)
        .unwrap_or_else(storage::default_questions_path);

    let log_level = file
        .log_level
        .as_deref()
        .and_then(|level| level.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info);

    Settings {
        questions_path,
        question_seconds: file
            .question_seconds
            .filter(|&s| s > 0)
            .unwrap_or(QUIZ_DEFAULTS.question_seconds),
        reveal_seconds: file.reveal_seconds.unwrap_or(QUIZ_DEFAULTS.reveal_seconds),
        score_offset: file.score_offset.unwrap_or(QUIZ_DEFAULTS.score_offset),
        shuffle_questions: file.shuffle_questions.unwrap_or(false),
        log_level,
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use super::*;

    fn unique_path(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        std::env::temp_dir().join(format!("{}_{}.toml", prefix, now))
    }

    #[test]
    fn test_resolve_defaults() {
        let settings = resolve(FileConfig::default(), Some(PathBuf::from("q.json")));

        assert_eq!(settings.questions_path, PathBuf::from("q.json"));
        assert_eq!(settings.question_seconds, 30);
        assert_eq!(settings.reveal_seconds, 3);
        assert_eq!(settings.score_offset, 1);
        assert!(!settings.shuffle_questions);
        assert_eq!(settings.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_cli_path_beats_file_path() {
        let file = FileConfig {
            questions_path: Some(PathBuf::from("from_file.json")),
            ..FileConfig::default()
        };

        let from_file = resolve(file.clone(), None);
        assert_eq!(from_file.questions_path, PathBuf::from("from_file.json"));

        let from_cli = resolve(file, Some(PathBuf::from("from_cli.json")));
        assert_eq!(from_cli.questions_path, PathBuf::from("from_cli.json"));
    }

    #[test]
    fn test_read_sparse_config() {
        let path = unique_path("quizline_config");
        fs::write(
            &path,
            "question_seconds = 15\nscore_offset = 0\nlog_level = \"debug\"\n",
        )
        .unwrap();

        let file = read_config(&path).unwrap();
        let settings = resolve(file, Some(PathBuf::from("q.json")));

        assert_eq!(settings.question_seconds, 15);
        assert_eq!(settings.score_offset, 0);
        assert_eq!(settings.reveal_seconds, 3);
        assert_eq!(settings.log_level, LevelFilter::Debug);

        let session = settings.session_settings();
        assert_eq!(session.reveal, Duration::from_secs(3));
        assert_eq!(session.score_offset, 0);

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let path = unique_path("quizline_bad_config");
        fs::write(&path, "question_seconds = \"soon\"\n").unwrap();

        assert!(matches!(read_config(&path), Err(QuizError::Config { .. })));

        fs::remove_file(path).ok();
    }

    #[test]
    fn test_zero_question_seconds_falls_back() {
        let file = FileConfig {
            question_seconds: Some(0),
            ..FileConfig::default()
        };
        assert_eq!(resolve(file, None).question_seconds, 30);
    }
}
