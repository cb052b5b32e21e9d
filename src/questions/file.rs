use super::*;
use std::path::PathBuf;

/// Reads category data files from a local directory
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl QuestionSource for FileSource {
    async fn fetch(&self, file: &str) -> LoadResult<Vec<Question>> {
        let path = self.dir.join(file);
        let bytes = tokio::fs::read(&path).await.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        parse_questions(file, &bytes)
    }

    fn name(&self) -> &str {
        "file"
    }
}
