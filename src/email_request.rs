use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};

use crate::domain::address::join_addresses;
use crate::domain::{Attachment, Content, Headers, Message};
use crate::error::PostmarkError;

#[derive(serde::Serialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct HeaderRequest {
    pub name: String,
    pub value: String,
}

#[derive(serde::Serialize, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AttachmentRequest {
    pub name: String,
    /// Base64 of the attachment bytes.
    pub content: String,
    pub content_type: String,
}

impl AttachmentRequest {
    pub fn from_attachment(attachment: Attachment) -> Result<Self, PostmarkError> {
        let content = attachment
            .content
            .read_to_end()
            .map_err(PostmarkError::Content)?;

        Ok(Self {
            name: attachment.name,
            content: STANDARD.encode(content),
            content_type: attachment.content_type,
        })
    }
}

/// The flat JSON document accepted by the `email`, `email/withTemplate`
/// and (as array items) `email/batch` endpoints.
#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct SendEmailRequest {
    pub from: String,
    pub to: String,
    pub cc: String,
    pub bcc: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subject: String,
    pub tag: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub html_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_model: Option<Map<String, Value>>,
    pub reply_to: String,
    pub headers: Vec<HeaderRequest>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<AttachmentRequest>,
}

impl SendEmailRequest {
    /// Flattens `message` into its wire form, draining its bodies and
    /// attachments.
    pub fn from_message(message: Message) -> Result<Self, PostmarkError> {
        let template_id = message.active_template_id();
        let template_model = template_id.map(|_| message.template_model);

        let attachments = message
            .attachments
            .into_iter()
            .map(AttachmentRequest::from_attachment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            from: message.from.to_string(),
            to: join_addresses(&message.to),
            cc: join_addresses(&message.cc),
            bcc: join_addresses(&message.bcc),
            subject: message.subject,
            tag: message.tag,
            html_body: drain_body(message.html_body)?,
            text_body: drain_body(message.text_body)?,
            template_id,
            template_model,
            reply_to: message
                .reply_to
                .map(|address| address.to_string())
                .unwrap_or_default(),
            headers: header_requests(&message.headers),
            attachments,
        })
    }
}

fn drain_body(body: Option<Content>) -> Result<Option<String>, PostmarkError> {
    let Some(body) = body else {
        return Ok(None);
    };
    let bytes = body.read_to_end().map_err(PostmarkError::Content)?;
    let text = String::from_utf8(bytes).map_err(PostmarkError::InvalidUtf8)?;

    // empty bodies are left out of the document entirely
    Ok(Some(text).filter(|t| !t.is_empty()))
}

fn header_requests(headers: &Headers) -> Vec<HeaderRequest> {
    headers
        .iter()
        .map(|(name, value)| HeaderRequest {
            name: name.to_owned(),
            value: value.to_owned(),
        })
        .collect()
}
