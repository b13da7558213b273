//! Client for the Postmark transactional email API.
//!
//! Build a [`Message`], hand it to [`EmailClient::send_email`] (or a batch to
//! [`EmailClient::send_email_batch`]) and inspect the returned [`SendResult`].
pub mod configuration;
pub mod domain;
pub mod email_client;
pub mod email_request;
pub mod email_response;
pub mod error;
pub mod telemetry;

pub use domain::{Address, Attachment, Content, EmailAddress, Headers, Message};
pub use email_client::{EmailClient, HttpTransport, DEFAULT_HOST};
pub use email_response::SendResult;
pub use error::PostmarkError;
