//! Object URI value object
//!
//! URIs follow `<scheme>:/<path>[?<k>=<v>[&<k>=<v>]*]`. The scheme is
//! everything before the first `":/"`; parameter names are looked up
//! case-insensitively; values stay strings (the caller converts).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A parsed object URI
///
/// Parameter order is preserved so that [`fmt::Display`] round-trips
/// the original string.
///
/// # Example
///
/// ```
/// use vce_domain::ObjectUri;
///
/// let uri: ObjectUri = "data:/reports/daily?Format=csv&tz=utc".parse().unwrap();
/// assert_eq!(uri.scheme(), "data");
/// assert_eq!(uri.path(), "reports/daily");
/// assert_eq!(uri.parameter("format"), Some("csv"));
/// assert_eq!(uri.to_string(), "data:/reports/daily?Format=csv&tz=utc");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectUri {
    scheme: String,
    path: String,
    params: Vec<(String, String)>,
}

impl ObjectUri {
    /// Parse a URI string
    pub fn parse(input: &str) -> Result<Self> {
        let (scheme, rest) = input
            .split_once(":/")
            .ok_or_else(|| Error::uri_parse(input, "missing ':/' after scheme"))?;

        if scheme.is_empty() || !scheme.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(Error::uri_parse(
                input,
                format!("invalid scheme '{scheme}'"),
            ));
        }

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        let mut params = Vec::new();
        if let Some(query) = query {
            for pair in query.split('&') {
                let parts: Vec<&str> = pair.split('=').collect();
                if parts.len() != 2 {
                    return Err(Error::uri_parse(
                        input,
                        format!("malformed query pair '{pair}'"),
                    ));
                }
                params.push((parts[0].to_string(), parts[1].to_string()));
            }
        }

        Ok(Self {
            scheme: scheme.to_string(),
            path: path.to_string(),
            params,
        })
    }

    /// The URI scheme as written
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The scheme normalized for registry lookup
    pub fn scheme_lowercase(&self) -> String {
        self.scheme.to_ascii_lowercase()
    }

    /// The path between `":/"` and the optional query
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Look up a parameter value, name compared case-insensitively
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All parameters in declaration order
    pub fn parameters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ObjectUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:/{}", self.scheme, self.path)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            write!(f, "{}{k}={v}", if i == 0 { '?' } else { '&' })?;
        }
        Ok(())
    }
}

impl FromStr for ObjectUri {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ObjectUri {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<ObjectUri> for String {
    fn from(uri: ObjectUri) -> Self {
        uri.to_string()
    }
}
