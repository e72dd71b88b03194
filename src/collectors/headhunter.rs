use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::collectors::{SearchParams, VacancySource};
use crate::config::Config;
use crate::error::AppError;
use crate::models::posting::{RawPosting, page_items};

/// Client for the public hh.ru vacancy search.
pub struct HeadHunter {
    client: reqwest::Client,
    url: String,
}

impl HeadHunter {
    pub fn new(
        url: impl Into<String>,
        user_agent: &str,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.api_url, &config.user_agent, config.timeout())
    }
}

#[async_trait]
impl VacancySource for HeadHunter {
    fn name(&self) -> &str {
        "headhunter"
    }

    async fn connect(&self) -> Result<(), AppError> {
        let resp = self.client.get(&self.url).send().await?;

        if resp.status() != reqwest::StatusCode::OK {
            return Err(AppError::Connectivity {
                status: resp.status().as_u16(),
            });
        }
        Ok(())
    }

    async fn fetch_page(&self, params: &SearchParams) -> Result<Vec<RawPosting>, AppError> {
        let resp = self.client.get(&self.url).query(params).send().await?;

        if !resp.status().is_success() {
            return Err(AppError::UnexpectedResponse(format!(
                "HeadHunter returned {} for page {}",
                resp.status(),
                params.page
            )));
        }

        let body = resp.bytes().await?;
        let data: Value = serde_json::from_slice(&body).map_err(|e| {
            AppError::UnexpectedResponse(format!(
                "HeadHunter page {} is not JSON: {e}",
                params.page
            ))
        })?;
        page_items(data)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client(server: &MockServer) -> HeadHunter {
        HeadHunter::new(
            format!("{}/vacancies", server.uri()),
            "test-agent",
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_connect_accepts_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vacancies"))
            .and(query_param_is_missing("page"))
            .and(header("user-agent", "test-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).connect().await.unwrap();
    }

    #[tokio::test]
    async fn test_connect_rejects_non_200() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vacancies"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = client(&server).connect().await.unwrap_err();
        assert!(matches!(err, AppError::Connectivity { status: 503 }));
    }

    #[tokio::test]
    async fn test_connect_transport_failure_is_distinct() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        let url = format!("http://127.0.0.1:{port}/vacancies");

        let hh = HeadHunter::new(url, "test-agent", Duration::from_secs(2)).unwrap();
        let err = hh.connect().await.unwrap_err();
        assert!(matches!(err, AppError::Transport(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_page_sends_search_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vacancies"))
            .and(query_param("text", "python developer"))
            .and(query_param("page", "2"))
            .and(query_param("per_page", "100"))
            .and(query_param("only_with_salary", "true"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"items": [{"id": "1"}, {"id": "2"}]})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let params = SearchParams::new("python developer").next_page().next_page();
        let items = client(&server).fetch_page(&params).await.unwrap();
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_page_without_items_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"errors": []})))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_page(&SearchParams::new("rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnexpectedResponse(_)));
    }

    #[tokio::test]
    async fn test_fetch_page_non_json_body_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_page(&SearchParams::new("rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnexpectedResponse(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_page_error_status_is_unexpected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let err = client(&server)
            .fetch_page(&SearchParams::new("rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnexpectedResponse(_)));
    }
}
