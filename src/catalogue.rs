//! Quiz questions grouped by genre
//!
//! Loaded from `quizData.json`:
//!
//! ```json
//! { "Geography": [ { "q": "Capital of Japan?", "a": ["Osaka", "Tokyo", "Kyoto", "Fukuoka"], "c": 1 } ] }
//! ```
//!
//! The long field names `prompt` / `options` / `correctIndex` are accepted too.
//! A missing, unreadable or empty file is never fatal: the built-in catalogue
//! stands in for it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::CatalogueError;

/// One multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(alias = "q")]
    pub prompt: String,
    #[serde(alias = "a")]
    pub options: Vec<String>,
    #[serde(alias = "c", alias = "correctIndex")]
    pub correct_index: usize,
}

impl Question {
    pub fn new(prompt: &str, options: &[&str], correct_index: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_index,
        }
    }

    #[inline]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct_index
    }

    fn is_well_formed(&self) -> bool {
        self.correct_index < self.options.len()
    }
}

/// Genre name -> questions. Genres iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuizCatalogue {
    genres: BTreeMap<String, Vec<Question>>,
}

impl QuizCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a genre
    pub fn with_genre(mut self, genre: &str, questions: Vec<Question>) -> Self {
        self.genres.insert(genre.to_string(), questions);
        self
    }

    /// Parse quiz JSON. Questions whose answer index points past their option
    /// list are dropped; a genre left empty by that is kept, empty.
    pub fn from_json(json: &str) -> Result<Self, CatalogueError> {
        let mut catalogue: QuizCatalogue = serde_json::from_str(json)?;
        if catalogue.genres.is_empty() {
            return Err(CatalogueError::Empty);
        }

        for (genre, questions) in catalogue.genres.iter_mut() {
            let before = questions.len();
            questions.retain(Question::is_well_formed);
            if questions.len() != before {
                log::warn!(
                    "Dropped {} malformed question(s) from genre '{}'",
                    before - questions.len(),
                    genre
                );
            }
        }

        Ok(catalogue)
    }

    /// The catalogue used when quiz data can't be loaded
    pub fn fallback() -> Self {
        Self::new().with_genre(
            "Test",
            vec![
                Question::new("What is 1 + 1?", &["1", "2", "3", "4"], 1),
                Question::new(
                    "What is the capital of Japan?",
                    &["Osaka", "Tokyo", "Kyoto", "Fukuoka"],
                    1,
                ),
            ],
        )
    }

    /// Take a load result, substituting the fallback on any failure
    pub fn load_or_fallback(result: Result<Self, CatalogueError>) -> Self {
        match result {
            Ok(catalogue) if !catalogue.is_empty() => {
                log::info!(
                    "Quiz data loaded: {} genres ({})",
                    catalogue.genre_count(),
                    catalogue.genres().collect::<Vec<_>>().join(", ")
                );
                catalogue
            }
            Ok(_) => {
                log::error!("Quiz data load failed: {}", CatalogueError::Empty);
                log::info!("Using built-in quiz data");
                Self::fallback()
            }
            Err(e) => {
                log::error!("Quiz data load failed: {}", e);
                log::info!("Using built-in quiz data");
                Self::fallback()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.genres.is_empty()
    }

    pub fn genre_count(&self) -> usize {
        self.genres.len()
    }

    /// Genre names in sorted order
    pub fn genres(&self) -> impl Iterator<Item = &str> {
        self.genres.keys().map(String::as_str)
    }

    /// Questions for a genre, `None` if the genre is unknown
    pub fn questions(&self, genre: &str) -> Option<&[Question]> {
        self.genres.get(genre).map(Vec::as_slice)
    }
}
