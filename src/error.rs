use std::fmt::{Debug, Formatter};

#[derive(thiserror::Error)]
pub enum PostmarkError {
    #[error("Failed to read message content")]
    Content(#[source] std::io::Error),
    #[error("Message body is not valid UTF-8")]
    InvalidUtf8(#[source] std::string::FromUtf8Error),
    #[error("Failed to encode the request body")]
    Encode(#[source] serde_json::Error),
    #[error("Failed to marshal the message")]
    Marshal(#[source] tokio::task::JoinError),
    #[error("`{host}` is not a valid API host")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },
    #[error("The API key cannot be sent as a header value")]
    InvalidApiKey(#[source] reqwest::header::InvalidHeaderValue),
    #[error("Failed to execute the request")]
    Transport(#[source] reqwest::Error),
    #[error("Failed to decode the response body (HTTP {status})")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl Debug for PostmarkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Writes the error followed by every cause in its `source()` chain.
pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}
