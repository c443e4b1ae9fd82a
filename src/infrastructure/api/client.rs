//! Image API HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use super::dto::{ImageRecordResponse, RatingUpdateRequest};
use crate::domain::entities::{ImageRecord, RatingSelection};
use crate::domain::errors::GalleryError;
use crate::domain::ports::ImageApiPort;

const USER_AGENT: &str = concat!("lazy-gallery/", env!("CARGO_PKG_VERSION"));
const MAX_ERROR_BODY: usize = 200;

/// Client for `GET /api/images` and `PUT /api/images/{id}`.
pub struct HttpImageApi {
    client: Client,
    base_url: Url,
}

impl std::fmt::Debug for HttpImageApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpImageApi")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpImageApi {
    /// Creates client for the given server.
    ///
    /// # Errors
    /// Returns error if the URL is invalid or the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GalleryError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GalleryError::transport(format!("invalid server URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GalleryError::transport(format!(
                "server URL '{base_url}' cannot carry a path"
            )));
        }

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| GalleryError::transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    fn endpoint(&self, record_id: Option<&str>) -> Result<Url, GalleryError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| GalleryError::transport("server URL cannot carry a path"))?;
            segments.pop_if_empty().extend(["api", "images"]);
            if let Some(id) = record_id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    async fn error_message(response: reqwest::Response) -> String {
        let status = response.status();
        match response.text().await {
            Ok(body) if !body.trim().is_empty() => {
                body.trim().chars().take(MAX_ERROR_BODY).collect()
            }
            _ => status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        }
    }
}

fn map_send_error(e: &reqwest::Error) -> GalleryError {
    warn!(error = %e, "Failed to reach image server");
    if e.is_timeout() {
        GalleryError::transport("request timed out")
    } else if e.is_connect() {
        GalleryError::transport("failed to connect to image server")
    } else {
        GalleryError::transport(e.to_string())
    }
}

#[async_trait]
impl ImageApiPort for HttpImageApi {
    async fn fetch_images(&self) -> Result<Vec<ImageRecord>, GalleryError> {
        let url = self.endpoint(None)?;
        debug!(url = %url, "Fetching image records");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let message = Self::error_message(response).await;
            return Err(GalleryError::server(status.as_u16(), message));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GalleryError::transport(format!("failed to read body: {e}")))?;

        let records: Vec<ImageRecordResponse> = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Failed to parse image records");
            GalleryError::parse(e.to_string())
        })?;

        debug!(count = records.len(), "Fetched image records");
        records
            .into_iter()
            .map(ImageRecord::try_from)
            .collect::<Result<_, _>>()
            .inspect_err(|e| warn!(error = %e, "Rejected image record"))
    }

    async fn update_rating(&self, selection: &RatingSelection) -> Result<(), GalleryError> {
        let url = self.endpoint(Some(selection.record_id.as_str()))?;
        debug!(url = %url, rating = selection.star, "Updating rating");

        let response = self
            .client
            .put(url)
            .json(&RatingUpdateRequest {
                rating: selection.wire_value(),
            })
            .send()
            .await
            .map_err(|e| map_send_error(&e))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = Self::error_message(response).await;
        warn!(
            record_id = %selection.record_id,
            status = %status,
            message = %message,
            "Rating update rejected"
        );
        Err(GalleryError::UpdateRejected {
            id: selection.record_id.to_string(),
            status: status.as_u16(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::sync::Arc;
    use std::thread::JoinHandle;

    use parking_lot::Mutex;
    use tiny_http::{Response, Server};

    #[derive(Debug, Clone)]
    struct Seen {
        method: String,
        url: String,
        content_type: Option<String>,
        body: String,
    }

    /// Serves `replies` in order, one per request, then stops.
    fn serve(
        replies: Vec<(u16, &'static str)>,
    ) -> (String, Arc<Mutex<Vec<Seen>>>, JoinHandle<()>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();

        let handle = std::thread::spawn(move || {
            for (status, body) in replies {
                let Ok(mut request) = server.recv() else {
                    return;
                };
                let mut received = String::new();
                let _ = request.as_reader().read_to_string(&mut received);
                let content_type = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Content-Type"))
                    .map(|h| h.value.as_str().to_string());
                log.lock().push(Seen {
                    method: request.method().as_str().to_string(),
                    url: request.url().to_string(),
                    content_type,
                    body: received,
                });
                let _ = request.respond(Response::from_string(body).with_status_code(status));
            }
        });

        (format!("http://{addr}"), seen, handle)
    }

    fn client(base: &str) -> HttpImageApi {
        HttpImageApi::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(HttpImageApi::new("not a url", Duration::from_secs(1)).is_err());
        assert!(HttpImageApi::new("mailto:someone@example.com", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn test_endpoint_keeps_base_path_and_encodes_id() {
        let api = client("http://localhost:3000/gallery/");
        assert_eq!(
            api.endpoint(None).unwrap().as_str(),
            "http://localhost:3000/gallery/api/images"
        );
        assert_eq!(
            api.endpoint(Some("a b/c")).unwrap().as_str(),
            "http://localhost:3000/gallery/api/images/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn test_fetch_images() {
        let (base, seen, handle) = serve(vec![(
            200,
            r#"[{"_id":"a","id":"a","image":"x.jpg","description":"cat","rating":3}]"#,
        )]);

        let records = client(&base).fetch_images().await.unwrap();
        handle.join().unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id.as_str(), "a");
        assert_eq!(records[0].caption(), "cat (3)");

        let seen = seen.lock();
        assert_eq!(seen[0].method, "GET");
        assert_eq!(seen[0].url, "/api/images");
    }

    #[tokio::test]
    async fn test_fetch_maps_server_error() {
        let (base, _seen, handle) = serve(vec![(503, "maintenance")]);

        let result = client(&base).fetch_images().await;
        handle.join().unwrap();

        match result {
            Err(GalleryError::Server { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_maps_parse_error() {
        let (base, _seen, handle) = serve(vec![(200, "<html>oops</html>")]);

        let result = client(&base).fetch_images().await;
        handle.join().unwrap();

        assert!(matches!(result, Err(GalleryError::Parse { .. })));
    }

    #[tokio::test]
    async fn test_update_rating_sends_json_string() {
        let (base, seen, handle) = serve(vec![(200, "")]);

        let selection = RatingSelection::new("a", 5).unwrap();
        client(&base).update_rating(&selection).await.unwrap();
        handle.join().unwrap();

        let seen = seen.lock();
        assert_eq!(seen[0].method, "PUT");
        assert_eq!(seen[0].url, "/api/images/a");
        assert_eq!(seen[0].body, r#"{"rating":"5"}"#);
        assert_eq!(seen[0].content_type.as_deref(), Some("application/json"));
    }

    #[tokio::test]
    async fn test_update_rating_rejected() {
        let (base, _seen, handle) = serve(vec![(404, "no such image")]);

        let selection = RatingSelection::new("missing", 2).unwrap();
        let result = client(&base).update_rating(&selection).await;
        handle.join().unwrap();

        assert!(matches!(
            result,
            Err(GalleryError::UpdateRejected { ref id, status: 404 }) if id == "missing"
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        drop(server);

        let result = client(&format!("http://{addr}")).fetch_images().await;
        assert!(matches!(result, Err(ref e @ GalleryError::Transport { .. }) if e.is_transient()));
    }
}
