use std::fmt::{Debug, Formatter};
use std::io::{Cursor, Read};

/// A single-pass source of bytes for message bodies and attachments.
///
/// `Content` owns its reader. Reading it consumes the value, so a drained
/// stream can never be marshalled a second time.
pub struct Content(Box<dyn Read + Send>);

impl Content {
    pub fn from_reader<R>(reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self(Box::new(reader))
    }

    /// Drains the underlying reader.
    pub fn read_to_end(mut self) -> std::io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.0.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

impl Debug for Content {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Content(..)")
    }
}

impl From<Vec<u8>> for Content {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl From<&[u8]> for Content {
    fn from(bytes: &[u8]) -> Self {
        bytes.to_vec().into()
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        text.into_bytes().into()
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        text.to_owned().into()
    }
}
