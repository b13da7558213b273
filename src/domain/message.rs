use serde_json::{Map, Value};

use crate::domain::address::Address;
use crate::domain::attachment::Attachment;
use crate::domain::content::Content;
use crate::domain::headers::Headers;

/// An outgoing email.
///
/// Bodies and attachments are single-pass [`Content`]; sending a message
/// moves it into the client, which drains them while building the request.
#[derive(Debug)]
pub struct Message {
    pub from: Address,
    pub to: Vec<Address>,
    pub cc: Vec<Address>,
    pub bcc: Vec<Address>,
    pub subject: String,
    pub tag: String,
    pub html_body: Option<Content>,
    pub text_body: Option<Content>,
    /// A non-zero id sends through the template endpoint.
    pub template_id: Option<i64>,
    /// Variables for the template; ignored without a template id.
    pub template_model: Map<String, Value>,
    pub reply_to: Option<Address>,
    pub headers: Headers,
    pub attachments: Vec<Attachment>,
}

impl Message {
    pub fn new(from: Address) -> Self {
        Self {
            from,
            to: Vec::new(),
            cc: Vec::new(),
            bcc: Vec::new(),
            subject: String::new(),
            tag: String::new(),
            html_body: None,
            text_body: None,
            template_id: None,
            template_model: Map::new(),
            reply_to: None,
            headers: Headers::new(),
            attachments: Vec::new(),
        }
    }

    pub fn to(mut self, recipient: Address) -> Self {
        self.to.push(recipient);
        self
    }

    pub fn cc(mut self, recipient: Address) -> Self {
        self.cc.push(recipient);
        self
    }

    pub fn bcc(mut self, recipient: Address) -> Self {
        self.bcc.push(recipient);
        self
    }

    pub fn subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn html_body(mut self, body: impl Into<Content>) -> Self {
        self.html_body = Some(body.into());
        self
    }

    pub fn text_body(mut self, body: impl Into<Content>) -> Self {
        self.text_body = Some(body.into());
        self
    }

    pub fn template(mut self, template_id: i64, model: Map<String, Value>) -> Self {
        self.template_id = Some(template_id);
        self.template_model = model;
        self
    }

    pub fn reply_to(mut self, address: Address) -> Self {
        self.reply_to = Some(address);
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    pub fn attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }

    /// The template id, if one is set and non-zero.
    pub fn active_template_id(&self) -> Option<i64> {
        self.template_id.filter(|id| *id != 0)
    }
}
