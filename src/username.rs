use crate::BoxdlyError;
use std::fmt;

const MIN_LEN: usize = 2;
const MAX_LEN: usize = 15;

/// A validated listing-site username
///
/// Account names are 2 to 15 characters of ASCII letters, digits and
/// underscores, which also makes them safe to embed in a URL path segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validates a username, trimming surrounding whitespace first
    ///
    /// # Examples
    ///
    /// ```
    /// use boxdly::Username;
    ///
    /// assert!(Username::parse("film_fan").is_ok());
    /// assert!(Username::parse("no spaces").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, BoxdlyError> {
        let name = raw.trim();
        let invalid = |reason: String| BoxdlyError::InvalidUsername {
            username: raw.to_string(),
            reason,
        };

        if name.is_empty() {
            return Err(invalid("username cannot be empty".to_string()));
        }

        let len = name.chars().count();
        if !(MIN_LEN..=MAX_LEN).contains(&len) {
            return Err(invalid(format!(
                "must be between {} and {} characters, got {}",
                MIN_LEN, MAX_LEN, len
            )));
        }

        if let Some(bad) = name
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '_'))
        {
            return Err(invalid(format!(
                "may only contain letters, numbers and underscores, found '{}'",
                bad
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
