use base64::{Engine as _, engine::general_purpose::STANDARD};
use thiserror::Error;

/// Username/password pair carried by an HTTP Basic `Authorization` header.
///
/// `Debug` redacts the password so credentials can sit inside logged structs.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl core::fmt::Debug for BasicCredentials {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BasicCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("authorization scheme is not Basic")]
    UnsupportedScheme,

    #[error("credentials are not valid base64")]
    InvalidEncoding,

    #[error("credentials are not valid UTF-8")]
    InvalidUtf8,

    #[error("credentials are missing the ':' separator")]
    MissingSeparator,
}

/// Parse the value of an `Authorization` header using the Basic scheme.
///
/// The scheme name is matched case-insensitively. The password may itself
/// contain `:`; only the first one separates it from the username.
pub fn parse_basic(header_value: &str) -> Result<BasicCredentials, CredentialsError> {
    let (scheme, encoded) = header_value
        .trim()
        .split_once(' ')
        .ok_or(CredentialsError::UnsupportedScheme)?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return Err(CredentialsError::UnsupportedScheme);
    }

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| CredentialsError::InvalidEncoding)?;
    let decoded = String::from_utf8(decoded).map_err(|_| CredentialsError::InvalidUtf8)?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or(CredentialsError::MissingSeparator)?;

    Ok(BasicCredentials {
        username: username.to_string(),
        password: password.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(raw: &str) -> String {
        format!("Basic {}", STANDARD.encode(raw))
    }

    #[test]
    fn parses_username_and_password() {
        let creds = parse_basic(&header("stuart:test")).unwrap();
        assert_eq!(creds.username, "stuart");
        assert_eq!(creds.password, "test");
    }

    #[test]
    fn password_may_contain_colons() {
        let creds = parse_basic(&header("scott:jb:0ss")).unwrap();
        assert_eq!(creds.username, "scott");
        assert_eq!(creds.password, "jb:0ss");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        let value = format!("bAsIc {}", STANDARD.encode("a:b"));
        assert!(parse_basic(&value).is_ok());
    }

    #[test]
    fn rejects_bearer_tokens() {
        assert_eq!(parse_basic("Bearer abc.def"), Err(CredentialsError::UnsupportedScheme));
        assert_eq!(parse_basic("Basic"), Err(CredentialsError::UnsupportedScheme));
    }

    #[test]
    fn rejects_garbage_payloads() {
        assert_eq!(parse_basic("Basic !!!"), Err(CredentialsError::InvalidEncoding));
        assert_eq!(parse_basic(&header("no-separator")), Err(CredentialsError::MissingSeparator));
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = parse_basic(&header("stuart:test")).unwrap();
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("test\""));
        assert!(rendered.contains("<redacted>"));
    }
}
