use serde::{Deserialize, Serialize};

use crate::{DomainError, DomainResult};

/// Name of a person to greet. Never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    pub fn parse(raw: impl Into<String>) -> DomainResult<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DomainError::validation("name must not be blank"));
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Greeting payload returned by the JSON endpoints: `{"message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
}

impl Greeting {
    /// Echo `name`, with `suffix` appended when present.
    pub fn echo(name: &str, suffix: Option<&str>) -> Self {
        let mut message = String::with_capacity(name.len() + suffix.map_or(0, str::len));
        message.push_str(name);
        if let Some(suffix) = suffix {
            message.push_str(suffix);
        }
        Self { message }
    }

    pub fn hello(person: &PersonName) -> Self {
        Self {
            message: format!("hello {}", person.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn echo_without_suffix_is_the_name() {
        assert_eq!(Greeting::echo("hello", None).message, "hello");
    }

    #[test]
    fn echo_appends_suffix() {
        assert_eq!(Greeting::echo("hello", Some("000")).message, "hello000");
    }

    #[test]
    fn hello_prefixes_name() {
        let name = PersonName::parse("George").unwrap();
        assert_eq!(Greeting::hello(&name).message, "hello George");
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(PersonName::parse("").is_err());
        assert!(PersonName::parse("   ").is_err());
    }

    #[test]
    fn serializes_as_message_object() {
        let json = serde_json::to_string(&Greeting::echo("hi", None)).unwrap();
        assert_eq!(json, r#"{"message":"hi"}"#);
    }

    proptest! {
        /// Property: any name with a visible character parses and round-trips.
        #[test]
        fn non_blank_names_parse(name in " {0,3}[A-Za-z][A-Za-z ]{0,20}") {
            let parsed = PersonName::parse(name.clone()).unwrap();
            prop_assert_eq!(parsed.as_str(), name.as_str());
        }
    }
}
