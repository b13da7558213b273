use crate::domain::content::Content;

#[derive(Debug)]
pub struct Attachment {
    pub name: String,
    pub content: Content,
    pub content_type: String,
}

impl Attachment {
    pub fn new(
        name: impl Into<String>,
        content: impl Into<Content>,
        content_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            content_type: content_type.into(),
        }
    }
}
