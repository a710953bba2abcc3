//! GitHub file loader.
//!
//! Lists a branch's tree through the git trees API, filters blob paths with
//! a caller-supplied predicate, then fetches each matching file through the
//! contents API and decodes its base64 payload. One document per matching
//! file; ordering is whatever the tree listing returns. No retries -- any
//! failed request aborts the load.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use repodigest_types::document::{Document, SourceMetadata};
use repodigest_types::error::LoaderError;

const GITHUB_API_URL: &str = "https://api.github.com";

/// Fetches matching files from one repository branch.
pub struct GithubLoader {
    client: reqwest::Client,
    api_base: String,
    repo: String,
    branch: String,
    token: SecretString,
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Debug, Deserialize)]
struct ContentsResponse {
    content: String,
    encoding: String,
}

impl GithubLoader {
    /// Create a loader for `repo` ("owner/name") at `branch`.
    ///
    /// Every request carries the given timeout; a hung remote call fails the
    /// load instead of stalling it indefinitely.
    pub fn new(
        repo: impl Into<String>,
        branch: impl Into<String>,
        token: SecretString,
        timeout: Duration,
    ) -> Result<Self, LoaderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("repodigest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LoaderError::Network(e.to_string()))?;
        Ok(Self {
            client,
            api_base: GITHUB_API_URL.to_string(),
            repo: repo.into(),
            branch: branch.into(),
            token,
        })
    }

    /// Override the API base URL (tests point this at a local mock server).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Fetch every blob whose path satisfies `filter`.
    #[tracing::instrument(name = "github_load", skip(self, filter), fields(repo = %self.repo, branch = %self.branch))]
    pub async fn load<F>(&self, filter: F) -> Result<Vec<Document>, LoaderError>
    where
        F: Fn(&str) -> bool,
    {
        let tree = self.fetch_tree().await?;
        if tree.truncated {
            tracing::warn!(repo = %self.repo, "tree listing truncated by the API; some files may be missing");
        }

        let paths: Vec<String> = tree
            .tree
            .into_iter()
            .filter(|entry| entry.kind == "blob" && filter(&entry.path))
            .map(|entry| entry.path)
            .collect();
        tracing::info!(matched = paths.len(), "tree listed");

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            let content = self.fetch_file(&path).await?;
            documents.push(Document {
                content,
                metadata: SourceMetadata {
                    path,
                    repo: self.repo.clone(),
                    branch: self.branch.clone(),
                },
            });
        }
        Ok(documents)
    }

    async fn fetch_tree(&self) -> Result<TreeResponse, LoaderError> {
        let url = format!(
            "{}/repos/{}/git/trees/{}?recursive=1",
            self.api_base, self.repo, self.branch
        );
        let response = self.get(&url, &format!("{}@{}", self.repo, self.branch)).await?;
        response
            .json::<TreeResponse>()
            .await
            .map_err(|e| LoaderError::Network(e.to_string()))
    }

    async fn fetch_file(&self, path: &str) -> Result<String, LoaderError> {
        let url = format!(
            "{}/repos/{}/contents/{}?ref={}",
            self.api_base, self.repo, path, self.branch
        );
        let response = self.get(&url, path).await?;
        let contents = response
            .json::<ContentsResponse>()
            .await
            .map_err(|e| LoaderError::Network(e.to_string()))?;

        if contents.encoding != "base64" {
            return Err(LoaderError::Decode {
                path: path.to_string(),
                reason: format!("unexpected encoding '{}'", contents.encoding),
            });
        }

        // The contents API wraps base64 at 60 columns; strip the newlines.
        let compact: String = contents.content.split_whitespace().collect();
        let bytes = BASE64.decode(compact).map_err(|e| LoaderError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        String::from_utf8(bytes).map_err(|e| LoaderError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    async fn get(&self, url: &str, resource: &str) -> Result<reqwest::Response, LoaderError> {
        let response = self
            .client
            .get(url)
            .bearer_auth(self.token.expose_secret())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| LoaderError::Network(e.to_string()))?;

        let status = response.status();
        match status.as_u16() {
            401 | 403 => Err(LoaderError::AuthFailed),
            404 => Err(LoaderError::NotFound(resource.to_string())),
            _ if !status.is_success() => {
                let message = response.text().await.unwrap_or_default();
                Err(LoaderError::Api {
                    status: status.as_u16(),
                    message,
                })
            }
            _ => Ok(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn loader(server: &mockito::Server) -> GithubLoader {
        GithubLoader::new(
            "o/r",
            "main",
            SecretString::from("gh-token"),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_api_base(server.url())
    }

    async fn tree_mock(server: &mut mockito::Server, body: serde_json::Value) -> mockito::Mock {
        server
            .mock("GET", "/repos/o/r/git/trees/main")
            .match_query(Matcher::UrlEncoded("recursive".into(), "1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .create_async()
            .await
    }

    #[tokio::test]
    async fn test_load_fetches_only_filtered_blobs() {
        let mut server = mockito::Server::new_async().await;
        let _tree = tree_mock(
            &mut server,
            json!({
                "tree": [
                    {"path": "src/Main.scala", "type": "blob"},
                    {"path": "README.md", "type": "blob"},
                    {"path": "src", "type": "tree"},
                ],
                "truncated": false,
            }),
        )
        .await;
        let _file = server
            .mock("GET", "/repos/o/r/contents/src/Main.scala")
            .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "content": BASE64.encode("object Main extends App"),
                    "encoding": "base64",
                })
                .to_string(),
            )
            .create_async()
            .await;

        let docs = loader(&server)
            .load(|path| path.ends_with(".scala"))
            .await
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].content, "object Main extends App");
        assert_eq!(docs[0].metadata.path, "src/Main.scala");
        assert_eq!(docs[0].metadata.repo, "o/r");
        assert_eq!(docs[0].metadata.branch, "main");
    }

    #[tokio::test]
    async fn test_wrapped_base64_payload_is_decoded() {
        let mut server = mockito::Server::new_async().await;
        let _tree = tree_mock(
            &mut server,
            json!({"tree": [{"path": "A.scala", "type": "blob"}]}),
        )
        .await;
        // 60-column wrapping as the contents API produces.
        let encoded = BASE64.encode("a".repeat(100));
        let wrapped = format!("{}\n{}", &encoded[..60], &encoded[60..]);
        let _file = server
            .mock("GET", "/repos/o/r/contents/A.scala")
            .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
            .with_body(json!({"content": wrapped, "encoding": "base64"}).to_string())
            .create_async()
            .await;

        let docs = loader(&server).load(|_| true).await.unwrap();
        assert_eq!(docs[0].content, "a".repeat(100));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_failed() {
        let mut server = mockito::Server::new_async().await;
        let _tree = server
            .mock("GET", "/repos/o/r/git/trees/main")
            .match_query(Matcher::UrlEncoded("recursive".into(), "1".into()))
            .with_status(401)
            .with_body(r#"{"message": "Bad credentials"}"#)
            .create_async()
            .await;

        let err = loader(&server).load(|_| true).await.unwrap_err();
        assert!(matches!(err, LoaderError::AuthFailed));
    }

    #[tokio::test]
    async fn test_missing_branch_maps_to_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _tree = server
            .mock("GET", "/repos/o/r/git/trees/main")
            .match_query(Matcher::UrlEncoded("recursive".into(), "1".into()))
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let err = loader(&server).load(|_| true).await.unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_server_error_surfaces_status() {
        let mut server = mockito::Server::new_async().await;
        let _tree = server
            .mock("GET", "/repos/o/r/git/trees/main")
            .match_query(Matcher::UrlEncoded("recursive".into(), "1".into()))
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let err = loader(&server).load(|_| true).await.unwrap_err();
        match err {
            LoaderError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_base64_encoding_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _tree = tree_mock(
            &mut server,
            json!({"tree": [{"path": "A.scala", "type": "blob"}]}),
        )
        .await;
        let _file = server
            .mock("GET", "/repos/o/r/contents/A.scala")
            .match_query(Matcher::UrlEncoded("ref".into(), "main".into()))
            .with_body(json!({"content": "raw text", "encoding": "utf-8"}).to_string())
            .create_async()
            .await;

        let err = loader(&server).load(|_| true).await.unwrap_err();
        assert!(matches!(err, LoaderError::Decode { .. }));
    }
}
