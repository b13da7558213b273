use async_trait::async_trait;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, Request, Response, Url};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;

use crate::domain::Message;
use crate::email_request::SendEmailRequest;
use crate::email_response::{BatchResponse, SendResult};
use crate::error::PostmarkError;
use crate::telemetry::spawn_blocking_with_tracing;

pub const DEFAULT_HOST: &str = "api.postmarkapp.com";

const SERVER_TOKEN_HEADER: &str = "x-postmark-server-token";

/// The single capability the client needs from an HTTP stack.
///
/// Implemented for `reqwest::Client`; inject a shared client to reuse
/// connections, or a double in tests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, reqwest::Error>;
}

#[async_trait]
impl HttpTransport for Client {
    async fn execute(&self, request: Request) -> Result<Response, reqwest::Error> {
        Client::execute(self, request).await
    }
}

/// Client for the Postmark email API.
///
/// Holds configuration only, so one instance can serve any number of
/// concurrent sends.
pub struct EmailClient {
    http_client: Box<dyn HttpTransport>,
    api_key: Secret<String>,
    secure: bool,
    host: Option<String>,
}

impl EmailClient {
    pub fn new(api_key: impl Into<String>, secure: bool) -> Self {
        Self::with_transport(Client::new(), api_key, secure)
    }

    pub fn with_transport<T>(http_client: T, api_key: impl Into<String>, secure: bool) -> Self
    where
        T: HttpTransport + 'static,
    {
        Self {
            http_client: Box::new(http_client),
            api_key: Secret::new(api_key.into()),
            secure,
            host: None,
        }
    }

    /// Targets `host` (optionally `host:port`) instead of the public API.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into()).filter(|h| !h.is_empty());
        self
    }

    /// Absolute URL of an API `path`. Does no I/O.
    pub fn endpoint(&self, path: &str) -> Result<Url, PostmarkError> {
        let scheme = if self.secure { "https" } else { "http" };
        let host = self.host.as_deref().unwrap_or(DEFAULT_HOST);

        Url::parse(&format!("{}://{}/{}", scheme, host, path.trim_start_matches('/')))
            .map_err(|source| PostmarkError::InvalidHost {
                host: host.to_owned(),
                source,
            })
    }

    /// Sends one message, through the template endpoint when the message
    /// carries a non-zero template id.
    ///
    /// `Ok` only means the API answered: a rejected message comes back as a
    /// [`SendResult`] with a non-zero error code.
    #[tracing::instrument(
        name = "Send an email",
        skip(self, message),
        fields(endpoint = tracing::field::Empty, recipients = message.to.len())
    )]
    pub async fn send_email(&self, message: Message) -> Result<SendResult, PostmarkError> {
        let path = match message.active_template_id() {
            Some(_) => "email/withTemplate",
            None => "email",
        };
        let url = self.endpoint(path)?;
        tracing::Span::current().record("endpoint", &tracing::field::display(&url));

        let body = spawn_blocking_with_tracing(move || {
            SendEmailRequest::from_message(message).and_then(|request| encode(&request))
        })
            .await
            .map_err(PostmarkError::Marshal)??;

        let result: SendResult = self.post(url, body).await?;
        if !result.is_success() {
            tracing::warn!(
                error_code = result.error_code(),
                reason = %result.message(),
                "Postmark rejected the email"
            );
        }
        Ok(result)
    }

    /// Sends `messages` in one call to the batch endpoint. Results come
    /// back in the order of the messages.
    ///
    /// When the API refuses the batch as a whole, the returned vector holds
    /// that single rejection instead of one result per message.
    #[tracing::instrument(
        name = "Send an email batch",
        skip(self, messages),
        fields(batch_size = messages.len())
    )]
    pub async fn send_email_batch(
        &self,
        messages: Vec<Message>,
    ) -> Result<Vec<SendResult>, PostmarkError> {
        let batch_size = messages.len();
        let url = self.endpoint("email/batch")?;

        let body = spawn_blocking_with_tracing(move || {
            let requests = messages
                .into_iter()
                .map(SendEmailRequest::from_message)
                .collect::<Result<Vec<_>, _>>()?;
            encode(&requests)
        })
            .await
            .map_err(PostmarkError::Marshal)??;

        let results = match self.post(url, body).await? {
            BatchResponse::Results(results) => results,
            BatchResponse::Rejected(rejection) => {
                tracing::warn!(
                    error_code = rejection.error_code(),
                    reason = %rejection.message(),
                    "Postmark rejected the whole batch"
                );
                return Ok(vec![rejection]);
            }
        };
        if results.len() != batch_size {
            tracing::warn!(
                expected = batch_size,
                received = results.len(),
                "Batch response does not have one result per message"
            );
        }
        let rejected = results.iter().filter(|r| !r.is_success()).count();
        if rejected > 0 {
            tracing::warn!(rejected, "Postmark rejected part of the batch");
        }
        Ok(results)
    }

    async fn post<T: DeserializeOwned>(&self, url: Url, body: Vec<u8>) -> Result<T, PostmarkError> {
        let mut api_key = HeaderValue::from_str(self.api_key.expose_secret())
            .map_err(PostmarkError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        let mut request = Request::new(Method::POST, url);
        let headers = request.headers_mut();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(HeaderName::from_static(SERVER_TOKEN_HEADER), api_key);
        *request.body_mut() = Some(body.into());

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(PostmarkError::Transport)?;

        // the status is not checked: rejections carry their reason in the body
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(PostmarkError::Transport)?;
        tracing::debug!(status, "Received Postmark response");

        serde_json::from_slice(&bytes).map_err(|source| PostmarkError::Decode { status, source })
    }
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Vec<u8>, PostmarkError> {
    serde_json::to_vec(value).map_err(PostmarkError::Encode)
}
