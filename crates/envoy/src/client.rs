use anyhow::Result;
use std::time::Duration;
use tracing::debug;
use relay_shared::types::{ErrorResponse, GenerateRequest, GenerateResponse, HealthResponse};

#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Every call is bounded by `timeout`; a timeout surfaces as an ordinary error.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse> {
        let url = format!("{}/generate", self.base_url);
        debug!(%url, max_length = request.max_length, "Sending prompt");

        let response = self.client
            .post(&url)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(err) => Err(anyhow::anyhow!("Server error ({}): {}", status, err.error)),
                Err(_) => Err(anyhow::anyhow!("Request failed: {}", status)),
            };
        }

        let response = response.json::<GenerateResponse>().await?;
        Ok(response)
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let url = format!("{}/health", self.base_url);

        let response = self.client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<HealthResponse>()
            .await?;

        Ok(response)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use axum::{extract::State, http::StatusCode, routing::{get, post}, Json, Router};
    use serde_json::{json, Value};
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Stand-in for the engine: replays canned `/generate` replies and records prompts.
    /// Each request may be held back by the next queued delay before it is answered.
    #[derive(Clone, Default)]
    pub(crate) struct StubServer {
        pub replies: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
        pub delays: Arc<Mutex<VecDeque<Duration>>>,
        pub prompts: Arc<Mutex<Vec<String>>>,
    }

    impl StubServer {
        pub(crate) fn replying(replies: Vec<(StatusCode, Value)>) -> Self {
            Self {
                replies: Arc::new(Mutex::new(replies.into())),
                ..Self::default()
            }
        }

        pub(crate) fn with_delays(self, delays: Vec<Duration>) -> Self {
            *self.delays.lock().unwrap() = delays.into();
            self
        }

        pub(crate) async fn spawn(&self) -> String {
            async fn generate(
                State(stub): State<StubServer>,
                Json(req): Json<GenerateRequest>,
            ) -> (StatusCode, Json<Value>) {
                stub.prompts.lock().unwrap().push(req.prompt);
                let reply = stub.replies.lock().unwrap().pop_front();
                let delay = stub.delays.lock().unwrap().pop_front();
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                let (status, body) =
                    reply.unwrap_or((StatusCode::OK, json!({ "response": "", "tool_call": null })));
                (status, Json(body))
            }

            let app = Router::new()
                .route("/generate", post(generate))
                .route("/health", get(|| async { Json(json!({ "status": "healthy" })) }))
                .with_state(self.clone());

            let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            format!("http://{}", addr)
        }
    }

    pub(crate) fn completion(text: &str, tool_call: Value) -> (StatusCode, Value) {
        (StatusCode::OK, json!({ "response": text, "tool_call": tool_call }))
    }

    #[tokio::test]
    async fn generate_round_trips_request_and_response() {
        let stub = StubServer::replying(vec![completion("Hello!", Value::Null)]);
        let url = stub.spawn().await;
        let client = ApiClient::new(&format!("{}/", url), Duration::from_secs(5)).unwrap();

        let response = client.generate(&GenerateRequest::new("Hi")).await.unwrap();
        assert_eq!(response.response, "Hello!");
        assert!(response.tool_call.is_none());
        assert_eq!(stub.prompts.lock().unwrap().as_slice(), ["Hi"]);
    }

    #[tokio::test]
    async fn server_error_text_is_surfaced() {
        let stub = StubServer::replying(vec![(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "model backend unavailable" }),
        )]);
        let url = stub.spawn().await;
        let client = ApiClient::new(&url, Duration::from_secs(5)).unwrap();

        let err = client.generate(&GenerateRequest::new("Hi")).await.unwrap_err();
        assert!(err.to_string().contains("model backend unavailable"));
    }

    #[tokio::test]
    async fn health_reads_status() {
        let url = StubServer::default().spawn().await;
        let client = ApiClient::new(&url, Duration::from_secs(5)).unwrap();

        assert_eq!(client.health().await.unwrap(), HealthResponse::healthy());
    }

    #[tokio::test]
    async fn slow_server_hits_client_timeout() {
        let stub = StubServer::replying(vec![completion("Too late.", Value::Null)])
            .with_delays(vec![Duration::from_millis(500)]);
        let url = stub.spawn().await;
        let client = ApiClient::new(&url, Duration::from_millis(100)).unwrap();

        let err = client.generate(&GenerateRequest::new("Hi")).await.unwrap_err();
        let err = err.downcast::<reqwest::Error>().unwrap();
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn unreachable_server_is_an_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ApiClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        assert!(client.generate(&GenerateRequest::new("Hi")).await.is_err());
    }
}
