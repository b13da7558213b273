pub mod address;
pub mod attachment;
pub mod content;
pub mod email_address;
pub mod headers;
pub mod message;

pub use address::Address;
pub use attachment::Attachment;
pub use content::Content;
pub use email_address::EmailAddress;
pub use headers::Headers;
pub use message::Message;
