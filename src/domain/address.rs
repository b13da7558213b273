use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::domain::email_address::EmailAddress;

// RFC 5322 specials; a display name containing any of them must be quoted
const SPECIALS: [char; 12] = ['(', ')', '<', '>', '[', ']', ':', ';', '@', '\\', ',', '.'];

/// A mailbox: an optional display name and an email address.
///
/// Renders as `Name <email>`, or as the bare email when the name is empty.
/// Names containing specials or double quotes are rendered as a quoted
/// string so that comma separated lists stay unambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    name: String,
    email: EmailAddress,
}

impl Address {
    /// Control characters in `name` become spaces and the result is
    /// trimmed, so a blank name yields a bare address.
    pub fn new(name: impl Into<String>, email: EmailAddress) -> Self {
        let name: String = name
            .into()
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        Self {
            name: name.trim().to_owned(),
            email,
        }
    }

    /// An address without a display name.
    pub fn bare(email: EmailAddress) -> Self {
        Self::new(String::new(), email)
    }

    /// Parses the display name and the email in one go.
    pub fn parse(name: impl Into<String>, email: String) -> Result<Self, String> {
        Ok(Self::new(name, EmailAddress::parse(email)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

impl From<EmailAddress> for Address {
    fn from(email: EmailAddress) -> Self {
        Self::bare(email)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.name.is_empty() {
            return write!(f, "{}", self.email);
        }

        let needs_quoting = self
            .name
            .chars()
            .any(|c| c == '"' || SPECIALS.contains(&c));

        if needs_quoting {
            let escaped = self.name.replace('\\', "\\\\").replace('"', "\\\"");
            write!(f, "\"{}\" <{}>", escaped, self.email)
        } else {
            write!(f, "{} <{}>", self.name, self.email)
        }
    }
}

/// Accepts `email`, `Name <email>` and `"Quoted, Name" <email>`.
impl FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, email) = match (s.rfind('<'), s.ends_with('>')) {
            (Some(open), true) => (s[..open].trim(), &s[open + 1..s.len() - 1]),
            (None, false) => ("", s),
            _ => return Err(format!("{} is not a valid mailbox.", s)),
        };

        let name = match name
            .strip_prefix('"')
            .and_then(|n| n.strip_suffix('"'))
        {
            Some(quoted) => unescape(quoted),
            None => name.to_owned(),
        };

        Address::parse(name, email.trim().to_owned())
    }
}

fn unescape(quoted: &str) -> String {
    let mut out = String::with_capacity(quoted.len());
    let mut chars = quoted.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

/// Renders a list of addresses the way the API expects recipient fields.
pub fn join_addresses(addresses: &[Address]) -> String {
    addresses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
