use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::Local;
use directories::ProjectDirs;
use log::{error, info, warn};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    constants::{FILE_NAMES, MAX_BACKUPS},
    domain::{Question, TestResult},
    error::{QuizError, Result},
};

pub struct LoadedQuestions {
    pub questions: Vec<Question>,
    pub dropped: usize,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "quizline", "quizline")
}

pub fn get_data_dir() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        let data_dir = proj_dirs.data_dir().to_path_buf();
        fs::create_dir_all(&data_dir).ok();
        data_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn get_state_dir() -> PathBuf {
    if let Some(proj_dirs) = project_dirs() {
        if let Some(state_dir) = proj_dirs.state_dir() {
            let dir = state_dir.to_path_buf();
            fs::create_dir_all(&dir).ok();
            return dir;
        }
    }
    get_data_dir()
}

pub fn get_config_dir() -> Option<PathBuf> {
    project_dirs().map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

pub fn get_results_path() -> PathBuf {
    get_data_dir().join(FILE_NAMES.results)
}

pub fn get_log_path() -> PathBuf {
    get_state_dir().join(FILE_NAMES.log)
}

pub fn default_questions_path() -> PathBuf {
    let local = Path::new(FILE_NAMES.legacy_questions);
    if local.exists() {
        return local.to_path_buf();
    }
    get_data_dir().join(FILE_NAMES.questions)
}

pub fn load_questions(path: &Path) -> Result<LoadedQuestions> {
    let all: Vec<Question> = read_json(path)?;
    let total = all.len();

    let questions: Vec<Question> = all
        .into_iter()
        .enumerate()
        .filter_map(|(index, question)| {
            if question.is_valid() {
                Some(question)
            } else {
                warn!(
                    "Dropping question #{} ({} / {}): correct index {} with {} options",
                    index,
                    question.category,
                    question.topic,
                    question.correct,
                    question.options.len()
                );
                None
            }
        })
        .collect();

    Ok(LoadedQuestions {
        dropped: total - questions.len(),
        questions,
    })
}

pub fn load_questions_or_empty(path: &Path) -> Vec<Question> {
    match load_questions(path) {
        Ok(loaded) => {
            info!(
                "Loaded {} questions from {} ({} dropped)",
                loaded.questions.len(),
                path.display(),
                loaded.dropped
            );
            loaded.questions
        }
        Err(e) => {
            error!("Could not load questions: {}", e);
            Vec::new()
        }
    }
}

pub fn load_results(path: &Path) -> Result<Vec<TestResult>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    read_json(path)
}

pub fn append_result(path: &Path, result: &TestResult) -> Result<()> {
    let mut results = load_results(path)?;
    results.push(result.clone());
    write_json_atomic(path, &results)
}

pub fn export_results_csv<W: Write>(results: &[TestResult], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(result)?;
    }
    csv_writer
        .flush()
        .map_err(|e| QuizError::io("<csv output>", e))?;
    Ok(())
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| QuizError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| QuizError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, &json)
}

pub fn write_text_file(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content)
}

pub fn create_backup(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    let backup_dir = path.parent().unwrap_or(Path::new(".")).join("backups");
    fs::create_dir_all(&backup_dir).map_err(|e| QuizError::io(&backup_dir, e))?;

    let timestamp = Local::now().format("%Y%m%d_%H%M%S%.3f");
    let filename = format!(
        "{}.{}",
        path.file_name().unwrap_or_default().to_string_lossy(),
        timestamp
    );
    let backup_path = backup_dir.join(&filename);
    fs::copy(path, &backup_path).map_err(|e| QuizError::io(&backup_path, e))?;

    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    if let Ok(entries) = fs::read_dir(&backup_dir) {
        let mut backups: Vec<_> = entries
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().starts_with(&*stem))
            .collect();
        backups.sort_by_key(|e| e.file_name());

        while backups.len() > MAX_BACKUPS {
            let oldest = backups.remove(0);
            let _ = fs::remove_file(oldest.path());
        }
    }

    Ok(())
}

pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| QuizError::io(parent, e))?;
    }
    if path.exists() {
        create_backup(path)?;
    }

    let tmp_path = path.with_extension("tmp");
    let write = |tmp: &Path| -> io::Result<()> {
        let mut tmp_file = File::create(tmp)?;
        tmp_file.write_all(content.as_bytes())?;
        tmp_file.sync_all()?;
        fs::rename(tmp, path)
    };
    write(&tmp_path).map_err(|e| QuizError::io(path, e))
}

#[cfg(test)]
mod tests {
    use std::{fs, path::PathBuf, time::SystemTime};

    use chrono::NaiveDate;
    use serde::{Deserialize, Serialize};

    use super::*;

    fn unique_dir(prefix: &str) -> PathBuf {
        let now = SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("{}_{}", prefix, now));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn result(score: u32) -> TestResult {
        TestResult::new(
            "Science",
            "Physics",
            score,
            5,
            NaiveDate::from_ymd_opt(2026, 2, 25).unwrap(),
        )
    }

    #[test]
    fn test_load_questions_drops_invalid_entries() {
        let dir = unique_dir("quizline_questions");
        let path = dir.join("preguntas.json");
        let content = r#"[
            {"category":"Science","topic":"Physics","question":"g?","options":["9.8","1"],"correct":0},
            {"category":"Science","topic":"Physics","question":"bad","options":["a"],"correct":4},
            {"category":"Science","topic":"Physics","question":"empty","options":[],"correct":0}
        ]"#;
        fs::write(&path, content).unwrap();

        let loaded = load_questions(&path).unwrap();

        assert_eq!(loaded.questions.len(), 1);
        assert_eq!(loaded.dropped, 2);
        assert_eq!(loaded.questions[0].options, vec!["9.8", "1"]);

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_missing_questions_file_yields_empty_set() {
        let dir = unique_dir("quizline_missing");
        let path = dir.join("nope.json");

        assert!(matches!(load_questions(&path), Err(QuizError::Io { .. })));
        assert!(load_questions_or_empty(&path).is_empty());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_questions_file_is_json_error() {
        let dir = unique_dir("quizline_malformed");
        let path = dir.join("questions.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(load_questions(&path), Err(QuizError::Json { .. })));

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_append_result_keeps_earlier_records() {
        let dir = unique_dir("quizline_results");
        let path = dir.join("results.json");

        assert!(load_results(&path).unwrap().is_empty());

        append_result(&path, &result(3)).unwrap();
        append_result(&path, &result(4)).unwrap();
        append_result(&path, &result(3)).unwrap();

        let loaded = load_results(&path).unwrap();
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded[0].score, 3);
        assert_eq!(loaded[1].score, 4);
        assert_eq!(loaded[2], result(3));
        assert!(dir.join("backups").exists());

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_results_file_uses_plain_field_names() {
        let dir = unique_dir("quizline_results_format");
        let path = dir.join("results.json");
        append_result(&path, &result(2)).unwrap();

        let raw: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(raw[0]["category"], "Science");
        assert_eq!(raw[0]["score"], 2);
        assert_eq!(raw[0]["total"], 5);
        assert_eq!(raw[0]["date"], "2026-02-25");

        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_export_results_csv() {
        let mut out = Vec::new();
        export_results_csv(&[result(4)], &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("category,topic,score,total,date"));
        assert_eq!(lines.next(), Some("Science,Physics,4,5,2026-02-25"));
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct TestJsonValue {
        name: String,
        count: usize,
    }

    #[test]
    fn test_backups_are_capped() {
        let dir = unique_dir("quizline_backups");
        let path = dir.join("value.json");

        for count in 0..(MAX_BACKUPS + 5) {
            let value = TestJsonValue {
                name: "sample".to_string(),
                count,
            };
            write_json_atomic(&path, &value).unwrap();
        }

        let loaded: TestJsonValue = read_json(&path).unwrap();
        assert_eq!(loaded.count, MAX_BACKUPS + 4);
        let backups = fs::read_dir(dir.join("backups")).unwrap().count();
        assert!(backups <= MAX_BACKUPS);

        fs::remove_dir_all(dir).ok();
    }
}
