// SPDX-FileCopyrightText: 2024 Noah Fontes
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::{header, multipart::Form, redirect, Method, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;

use crate::{
    error::{Error, RequestError, Result},
    metadata,
    model::Credential,
};

/// Where the client gets the bearer credential for each request.
#[async_trait]
pub(crate) trait Credentials: Send + Sync {
    async fn credential(&self) -> Option<Credential>;
}

/// Never has a credential.
pub(crate) struct Anonymous;

#[async_trait]
impl Credentials for Anonymous {
    async fn credential(&self) -> Option<Credential> {
        None
    }
}

pub(crate) enum Body {
    Empty,
    /// A body that has already been serialized to JSON.
    Json(String),
    Multipart(Form),
}

pub(crate) struct Request {
    method: Method,
    path: String,
    query: Vec<(&'static str, String)>,
    body: Body,
}

impl Request {
    pub(crate) fn new<P: Into<String>>(method: Method, path: P) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: Body::Empty,
        }
    }

    pub(crate) fn get<P: Into<String>>(path: P) -> Self {
        Self::new(Method::GET, path)
    }

    pub(crate) fn post<P: Into<String>>(path: P) -> Self {
        Self::new(Method::POST, path)
    }

    pub(crate) fn put<P: Into<String>>(path: P) -> Self {
        Self::new(Method::PUT, path)
    }

    pub(crate) fn delete<P: Into<String>>(path: P) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub(crate) fn with_query<V: ToString>(mut self, key: &'static str, value: V) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub(crate) fn with_json<T: Serialize + ?Sized>(self, data: &T) -> Result<Self> {
        Ok(self.with_body(Body::Json(serde_json::to_string(data)?)))
    }

    pub(crate) fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    #[cfg(test)]
    pub(crate) const fn method(&self) -> &Method {
        &self.method
    }
}

/// A decoded success body.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Payload {
    Json(Value),
    Text(String),
}

impl Payload {
    /// Decodes the payload as `T`. A text body decodes as a JSON string, which
    /// lets plain acknowledgements land in a `String`.
    pub(crate) fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let value = match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
        };
        Ok(serde_json::from_value(value)?)
    }
}

pub(crate) struct Client {
    base_url: Url,
    inner: reqwest::Client,
    no_redirect: reqwest::Client,
    credentials: Arc<dyn Credentials>,
}

impl Client {
    pub(crate) fn new(base_url: Url, credentials: Arc<dyn Credentials>) -> Result<Self> {
        Ok(Self {
            base_url,
            inner: reqwest::Client::builder()
                .user_agent(metadata::USER_AGENT.as_str())
                .build()?,
            no_redirect: reqwest::Client::builder()
                .user_agent(metadata::USER_AGENT.as_str())
                .redirect(redirect::Policy::none())
                .build()?,
            credentials,
        })
    }

    fn url(&self, path: &str) -> Result<Url> {
        // Joining would drop the last segment of the versioned prefix, so the
        // path is appended instead.
        Ok(Url::parse(&format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        ))?)
    }

    async fn send(&self, http: &reqwest::Client, req: Request) -> Result<Response> {
        let url = self.url(&req.path)?;
        debug!("{} {}", req.method, url);

        let mut builder = http.request(req.method, url);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(credential) = self.credentials.credential().await {
            builder = builder.bearer_auth(credential.expose());
        }
        builder = match req.body {
            Body::Multipart(form) => builder.multipart(form),
            Body::Empty => builder.header(header::CONTENT_TYPE, "application/json"),
            Body::Json(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(json),
        };

        Ok(builder.send().await?)
    }

    /// Performs a single request and decodes the response body.
    pub(crate) async fn request(&self, req: Request) -> Result<Payload> {
        let response = self.send(&self.inner, req).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(into_request_error(response).await.into());
        }

        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains("application/json"));
        let text = response.text().await?;
        debug!("{} response ({} bytes)", status, text.len());

        if is_json {
            Ok(Payload::Json(serde_json::from_str(&text)?))
        } else {
            Ok(Payload::Text(text))
        }
    }

    /// Performs a request that the backend answers with a redirect, and
    /// returns where it points instead of following it.
    pub(crate) async fn locate(&self, req: Request) -> Result<Url> {
        let response = self.send(&self.no_redirect, req).await?;
        let status = response.status();
        if status.is_redirection() {
            let location = response
                .headers()
                .get(header::LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or(Error::MissingLocation)?;
            debug!("{} redirect to {}", status, location);
            Ok(response.url().join(location)?)
        } else if status.is_success() {
            Err(Error::MissingLocation)
        } else {
            Err(into_request_error(response).await.into())
        }
    }
}

async fn into_request_error(response: Response) -> RequestError {
    let status = response.status();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<Value>(&text).ok())
        .and_then(|body| {
            body.get("message")
                .and_then(Value::as_str)
                .filter(|message| !message.is_empty())
                .map(str::to_owned)
        });
    debug!("{} error response", status);
    RequestError::new(status, message)
}

#[cfg(test)]
pub(crate) mod tests {
    use wiremock::{
        matchers::{body_json, header as has_header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    pub(crate) struct Fixed(pub(crate) &'static str);

    #[async_trait]
    impl Credentials for Fixed {
        async fn credential(&self) -> Option<Credential> {
            Some(Credential::new(self.0))
        }
    }

    pub(crate) fn base_url(server: &MockServer) -> Url {
        #[allow(clippy::unwrap_used)]
        Url::parse(&format!("{}/api/v1", server.uri())).unwrap()
    }

    fn client(server: &MockServer, credentials: Arc<dyn Credentials>) -> Result<Client> {
        Client::new(base_url(server), credentials)
    }

    #[tokio::test]
    async fn attaches_bearer_credential() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/games/my-games"))
            .and(has_header("authorization", "Bearer t1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client(&server, Arc::new(Fixed("t1")))?
            .request(Request::get("/games/my-games"))
            .await?;
        assert_eq!(payload, Payload::Json(serde_json::json!([])));
        Ok(())
    }

    #[tokio::test]
    async fn omits_authorization_without_credential() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/games/public"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let _ = client(&server, Arc::new(Anonymous))?
            .request(Request::get("/games/public"))
            .await?;

        let requests = server.received_requests().await.unwrap_or_default();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].headers.get("authorization").is_none());
        assert_eq!(
            requests[0]
                .headers
                .get("content-type")
                .and_then(|value| value.to_str().ok()),
            Some("application/json")
        );
        Ok(())
    }

    #[tokio::test]
    async fn sends_serialized_json_body() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/reviews"))
            .and(has_header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"gameId": 7, "rating": 5})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let payload = client(&server, Arc::new(Anonymous))?
            .request(
                Request::post("/reviews")
                    .with_json(&serde_json::json!({"gameId": 7, "rating": 5}))?,
            )
            .await?;
        assert_eq!(payload, Payload::Json(serde_json::json!({"id": 1})));
        Ok(())
    }

    #[tokio::test]
    async fn multipart_body_keeps_its_own_content_type() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/games/create"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let form = Form::new().text("name", "Star Miner");
        let _ = client(&server, Arc::new(Anonymous))?
            .request(Request::post("/games/create").with_body(Body::Multipart(form)))
            .await?;

        let requests = server.received_requests().await.unwrap_or_default();
        let content_type = requests[0]
            .headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        assert!(content_type.starts_with("multipart/form-data"));
        Ok(())
    }

    #[tokio::test]
    async fn plain_text_success_is_returned_raw() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/admin/approve"))
            .respond_with(ResponseTemplate::new(200).set_body_string("User approved"))
            .mount(&server)
            .await;

        let payload = client(&server, Arc::new(Anonymous))?
            .request(Request::post("/admin/approve"))
            .await?;
        assert_eq!(payload, Payload::Text("User approved".to_owned()));
        assert_eq!(payload.decode::<String>()?, "User approved");
        Ok(())
    }

    #[tokio::test]
    async fn error_carries_server_message() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "X"})),
            )
            .mount(&server)
            .await;

        let err = client(&server, Arc::new(Anonymous))?
            .request(Request::post("/auth/login"))
            .await
            .err();
        match err {
            Some(Error::Request(e)) => {
                assert_eq!(e.message(), "X");
                assert_eq!(e.status().as_u16(), 401);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        Ok(())
    }

    #[tokio::test]
    async fn error_without_json_carries_status_code() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/leaderboard"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let err = client(&server, Arc::new(Anonymous))?
            .request(Request::get("/leaderboard"))
            .await
            .err();
        assert!(matches!(err, Some(Error::Request(ref e)) if e.message().contains("503")));
        Ok(())
    }

    #[tokio::test]
    async fn error_json_without_message_carries_status_code() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/games/9"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"error": "Not Found"})),
            )
            .mount(&server)
            .await;

        let err = client(&server, Arc::new(Anonymous))?
            .request(Request::get("/games/9"))
            .await
            .err();
        assert_eq!(
            err.map(|e| e.to_string()).as_deref(),
            Some("HTTP error! status: 404")
        );
        Ok(())
    }

    #[tokio::test]
    async fn locate_returns_redirect_target() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/points/track-download"))
            .and(query_param("playerId", "5"))
            .and(query_param("gameId", "7"))
            .respond_with(
                ResponseTemplate::new(302).insert_header("Location", "https://cdn.test/star.apk"),
            )
            .mount(&server)
            .await;

        let url = client(&server, Arc::new(Fixed("t1")))?
            .locate(
                Request::get("/points/track-download")
                    .with_query("playerId", 5)
                    .with_query("gameId", 7),
            )
            .await?;
        assert_eq!(url.as_str(), "https://cdn.test/star.apk");
        Ok(())
    }

    #[tokio::test]
    async fn locate_without_redirect_fails() -> Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/points/track-download"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let result = client(&server, Arc::new(Anonymous))?
            .locate(Request::get("/points/track-download"))
            .await;
        assert!(matches!(result, Err(Error::MissingLocation)));
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() -> Result<()> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        drop(listener);

        let result = Client::new(
            Url::parse(&format!("http://127.0.0.1:{port}/api/v1"))?,
            Arc::new(Anonymous),
        )?
        .request(Request::get("/games/public"))
        .await;
        assert!(matches!(result, Err(Error::Transport(_))));
        Ok(())
    }
}
