use super::*;
use std::time::Duration;

/// Fetches category data files relative to a base URL
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });

        Self { base_url, client }
    }

    /// Full URL of a data file
    fn url_for(&self, file: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), file)
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    async fn fetch(&self, file: &str) -> LoadResult<Vec<Question>> {
        let url = self.url_for(file);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoadError::Request {
                url: url.clone(),
                msg: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(LoadError::Request {
                msg: format!("status {}", response.status()),
                url,
            });
        }

        let bytes = response.bytes().await.map_err(|e| LoadError::Request {
            url: url.clone(),
            msg: format!("Failed to read body: {}", e),
        })?;

        parse_questions(file, &bytes)
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_for_joins_paths() {
        let source = HttpSource::new("http://localhost:8080/data/".to_string());
        assert_eq!(
            source.url_for("music.json"),
            "http://localhost:8080/data/music.json"
        );

        let source = HttpSource::new("http://localhost:8080/data".to_string());
        assert_eq!(
            source.url_for("music.json"),
            "http://localhost:8080/data/music.json"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_request_error() {
        // Port 9 (discard) on loopback is not expected to serve HTTP
        let source = HttpSource::new("http://127.0.0.1:9".to_string());
        let err = source.fetch("words.json").await.unwrap_err();
        assert!(matches!(err, LoadError::Request { .. }));
    }
}
