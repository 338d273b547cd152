use std::collections::HashMap;

use chrono::{Local, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub category: String,
    pub topic: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct: usize,
}

impl Question {
    pub fn is_valid(&self) -> bool {
        !self.options.is_empty() && self.correct < self.options.len()
    }

    pub fn matches(&self, category: &str, topic: &str) -> bool {
        self.category == category && self.topic == topic
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryTopics {
    pub name: String,
    pub topics: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Categories {
    entries: Vec<CategoryTopics>,
}

impl Categories {
    pub fn from_questions(questions: &[Question]) -> Self {
        let entries = questions
            .iter()
            .map(|q| q.category.as_str())
            .unique()
            .map(|name| CategoryTopics {
                name: name.to_string(),
                topics: questions
                    .iter()
                    .filter(|q| q.category == name)
                    .map(|q| q.topic.clone())
                    .unique()
                    .collect(),
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[CategoryTopics] {
        &self.entries
    }

    pub fn by_index(&self, index: usize) -> Option<&CategoryTopics> {
        self.entries.get(index)
    }

    pub fn topics(&self, category: &str) -> &[String] {
        self.entries
            .iter()
            .find(|entry| entry.name == category)
            .map(|entry| entry.topics.as_slice())
            .unwrap_or(&[])
    }
}

pub fn filter_questions(questions: &[Question], category: &str, topic: &str) -> Vec<Question> {
    questions
        .iter()
        .filter(|q| q.matches(category, topic))
        .cloned()
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    pub category: String,
    pub topic: String,
    pub score: u32,
    pub total: u32,
    pub date: String,
}

impl TestResult {
    pub fn new(category: &str, topic: &str, score: u32, total: u32, date: NaiveDate) -> Self {
        Self {
            category: category.to_string(),
            topic: topic.to_string(),
            score,
            total,
            date: date.format(DATE_FORMAT).to_string(),
        }
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.score) * 100.0 / f64::from(self.total)
        }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone, Debug, PartialEq)]
pub struct TopicSummary {
    pub category: String,
    pub topic: String,
    pub attempts: usize,
    pub best_score: u32,
    pub best_total: u32,
    pub last_date: String,
    pub average_percent: f64,
}

pub fn summarize_results(results: &[TestResult]) -> Vec<TopicSummary> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut grouped: HashMap<(String, String), Vec<&TestResult>> = HashMap::new();

    for result in results {
        let key = (result.category.clone(), result.topic.clone());
        grouped
            .entry(key.clone())
            .or_insert_with(|| {
                order.push(key);
                Vec::new()
            })
            .push(result);
    }

    order
        .into_iter()
        .filter_map(|key| {
            let runs = grouped.remove(&key)?;
            let best = runs.iter().max_by(|a, b| {
                a.percent()
                    .partial_cmp(&b.percent())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })?;
            let last_date = runs.iter().map(|r| r.date.as_str()).max()?.to_string();
            let average_percent =
                runs.iter().map(|r| r.percent()).sum::<f64>() / runs.len() as f64;

            Some(TopicSummary {
                category: key.0,
                topic: key.1,
                attempts: runs.len(),
                best_score: best.score,
                best_total: best.total,
                last_date,
                average_percent,
            })
        })
        .collect()
}

pub fn filter_results<'a>(
    results: &'a [TestResult],
    category: Option<&str>,
    topic: Option<&str>,
) -> Vec<&'a TestResult> {
    results
        .iter()
        .filter(|r| category.is_none_or(|c| r.category == c))
        .filter(|r| topic.is_none_or(|t| r.topic == t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(category: &str, topic: &str, correct: usize) -> Question {
        Question {
            category: category.to_string(),
            topic: topic.to_string(),
            question: format!("{} / {}?", category, topic),
            options: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            correct,
        }
    }

    #[test]
    fn test_categories_keep_first_seen_order_without_duplicates() {
        let questions = vec![
            question("Science", "Physics", 0),
            question("History", "Rome", 1),
            question("Science", "Biology", 2),
            question("Science", "Physics", 1),
            question("History", "Egypt", 0),
        ];

        let categories = Categories::from_questions(&questions);

        let names: Vec<&str> = categories
            .entries()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["Science", "History"]);
        assert_eq!(categories.topics("Science"), ["Physics", "Biology"]);
        assert_eq!(categories.topics("History"), ["Rome", "Egypt"]);
        assert!(categories.topics("Art").is_empty());
    }

    #[test]
    fn test_filter_questions_matches_category_and_topic() {
        let questions = vec![
            question("Science", "Physics", 0),
            question("Science", "Biology", 2),
            question("History", "Physics", 1),
        ];

        let filtered = filter_questions(&questions, "Science", "Physics");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].correct, 0);
        assert!(filter_questions(&questions, "Science", "Rome").is_empty());
    }

    #[test]
    fn test_question_validity() {
        assert!(question("a", "b", 2).is_valid());
        assert!(!question("a", "b", 3).is_valid());

        let mut empty = question("a", "b", 0);
        empty.options.clear();
        assert!(!empty.is_valid());
    }

    #[test]
    fn test_result_date_format() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        let result = TestResult::new("Science", "Physics", 4, 5, date);
        assert_eq!(result.date, "2026-03-07");
        assert!((result.percent() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summarize_results_groups_by_topic() {
        let d1 = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        let results = vec![
            TestResult::new("Science", "Physics", 1, 4, d1),
            TestResult::new("History", "Rome", 2, 2, d1),
            TestResult::new("Science", "Physics", 3, 4, d2),
        ];

        let summary = summarize_results(&results);

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].topic, "Physics");
        assert_eq!(summary[0].attempts, 2);
        assert_eq!(summary[0].best_score, 3);
        assert_eq!(summary[0].last_date, "2026-01-05");
        assert!((summary[0].average_percent - 50.0).abs() < 1e-9);
        assert_eq!(summary[1].category, "History");
    }

    #[test]
    fn test_filter_results_by_category() {
        let d = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let results = vec![
            TestResult::new("Science", "Physics", 1, 4, d),
            TestResult::new("History", "Rome", 2, 2, d),
        ];

        assert_eq!(filter_results(&results, Some("History"), None).len(), 1);
        assert_eq!(filter_results(&results, None, None).len(), 2);
        assert!(filter_results(&results, Some("Science"), Some("Rome")).is_empty());
    }
}
