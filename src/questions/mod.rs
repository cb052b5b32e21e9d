//! Question data: where category files come from and how they are cached.
//!
//! Each category has one JSON data file holding an array of
//! `{q, a, level, img?}` records. A [`QuestionSource`] fetches the raw file;
//! the [`QuestionRepository`] parses it once per category and keeps it for the
//! lifetime of the process.

mod file;
mod http;

use async_trait::async_trait;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::shuffle::shuffled;
use crate::types::{Category, Question};

pub use file::FileSource;
pub use http::HttpSource;

/// Result type for question loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors that can occur while fetching a category data file
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Request for {url} failed: {msg}")]
    Request { url: String, msg: String },

    #[error("Failed to parse {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Trait that all question data backends implement
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch and parse the data file referenced by a category
    async fn fetch(&self, file: &str) -> LoadResult<Vec<Question>>;

    /// Get the name of this source (for logging)
    fn name(&self) -> &str;
}

/// Parse the body of a category data file
pub fn parse_questions(file: &str, bytes: &[u8]) -> LoadResult<Vec<Question>> {
    serde_json::from_slice(bytes).map_err(|source| LoadError::Parse {
        file: file.to_string(),
        source,
    })
}

/// Filter questions to a difficulty level, in a freshly shuffled order
pub fn select_by_level<R: Rng + ?Sized>(
    questions: &[Question],
    level: u32,
    rng: &mut R,
) -> Vec<Question> {
    let filtered: Vec<Question> = questions
        .iter()
        .filter(|q| q.level == level)
        .cloned()
        .collect();
    shuffled(&filtered, rng)
}

/// Lazily loads category data and caches it by category id
pub struct QuestionRepository {
    source: Box<dyn QuestionSource>,
    cache: RwLock<HashMap<String, Arc<Vec<Question>>>>,
}

impl QuestionRepository {
    pub fn new(source: Box<dyn QuestionSource>) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Questions for a category, fetched on first use.
    ///
    /// Failures are logged and come back as an empty set. Nothing is cached
    /// for a failed fetch, so a later open retries it.
    pub async fn load(&self, category: &Category) -> Arc<Vec<Question>> {
        if let Some(cached) = self.cache.read().await.get(category.id) {
            return cached.clone();
        }

        match self.source.fetch(category.file).await {
            Ok(questions) => {
                tracing::info!(
                    "Loaded {} questions for category {} from {}",
                    questions.len(),
                    category.id,
                    self.source.name()
                );
                let questions = Arc::new(questions);
                self.cache
                    .write()
                    .await
                    .insert(category.id.to_string(), questions.clone());
                questions
            }
            Err(e) => {
                tracing::warn!("Error loading category {}: {}", category.id, e);
                Arc::new(Vec::new())
            }
        }
    }

    /// Whether a category's data is already in memory
    pub async fn is_cached(&self, category_id: &str) -> bool {
        self.cache.read().await.contains_key(category_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn question(prompt: &str, level: u32) -> Question {
        Question {
            prompt: prompt.to_string(),
            answer: format!("{} answer", prompt),
            level,
            image: None,
        }
    }

    /// Source that counts fetches and optionally fails
    struct CountingSource {
        questions: Vec<Question>,
        fail: bool,
        fetches: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl QuestionSource for CountingSource {
        async fn fetch(&self, file: &str) -> LoadResult<Vec<Question>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(LoadError::Request {
                    url: file.to_string(),
                    msg: "unreachable".to_string(),
                });
            }
            Ok(self.questions.clone())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    const ANIMALS: Category = Category {
        id: "animals",
        title: "Animals",
        file: "animals.json",
    };

    #[tokio::test]
    async fn test_load_caches_by_category() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let repo = QuestionRepository::new(Box::new(CountingSource {
            questions: vec![question("Q1", 1), question("Q2", 2)],
            fail: false,
            fetches: fetches.clone(),
        }));

        assert!(!repo.is_cached("animals").await);
        let first = repo.load(&ANIMALS).await;
        let second = repo.load(&ANIMALS).await;

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert!(repo.is_cached("animals").await);
    }

    #[tokio::test]
    async fn test_failed_load_is_empty_and_not_cached() {
        let fetches = Arc::new(AtomicUsize::new(0));
        let repo = QuestionRepository::new(Box::new(CountingSource {
            questions: vec![],
            fail: true,
            fetches: fetches.clone(),
        }));

        assert!(repo.load(&ANIMALS).await.is_empty());
        assert!(repo.load(&ANIMALS).await.is_empty());
        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert!(!repo.is_cached("animals").await);
    }

    #[test]
    fn test_select_by_level_filters() {
        let mut rng = StdRng::seed_from_u64(5);
        let questions = vec![
            question("a", 1),
            question("b", 2),
            question("c", 1),
            question("d", 3),
        ];

        let level_one = select_by_level(&questions, 1, &mut rng);
        assert_eq!(level_one.len(), 2);
        assert!(level_one.iter().all(|q| q.level == 1));

        assert!(select_by_level(&questions, 4, &mut rng).is_empty());
    }

    #[test]
    fn test_parse_questions_rejects_malformed() {
        let err = parse_questions("bad.json", b"{not json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));

        let ok = parse_questions("ok.json", br#"[{"q": "x", "a": "y", "level": 1}]"#).unwrap();
        assert_eq!(ok.len(), 1);
    }
}
