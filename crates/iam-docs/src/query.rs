//! Request query parameters.
//!
//! [`QueryParams`] is the decoded parameter set of the page request. It is
//! passed to the selector explicitly instead of being read from an ambient
//! location object.

use serde_urlencoded::de::Error as UrlEncodedError;

/// Name of the query parameter that overrides the initial document.
pub const URL_PARAM: &str = "url";

/// Decoded `application/x-www-form-urlencoded` query parameters.
///
/// Keeps every pair in request order. Lookups return the first value for a
/// name, matching `URLSearchParams.get` in the browser.
///
/// # Example
///
/// ```
/// use iam_docs::QueryParams;
///
/// let params = QueryParams::parse("url=%2Fopenapi%2Fidp.v1.yaml&x=1");
/// assert_eq!(params.get("url"), Some("/openapi/idp.v1.yaml"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// An empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a raw query string (without the leading `?`).
    ///
    /// Malformed input is not an error for the viewer; it yields an empty
    /// parameter set. Use [`QueryParams::try_parse`] to observe the failure.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        Self::try_parse(query).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "ignoring undecodable query string");
            Self::new()
        })
    }

    /// Decode a raw query string, reporting decoding failures.
    pub fn try_parse(query: &str) -> Result<Self, UrlEncodedError> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query)?;
        Ok(Self { pairs })
    }

    /// Decode the query component of an optional URI query.
    #[must_use]
    pub fn from_query(query: Option<&str>) -> Self {
        query.map(Self::parse).unwrap_or_default()
    }

    /// First value for `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Number of decoded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether no pairs were decoded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_percent_encoded() {
        let params = QueryParams::parse("url=%2Fopenapi%2Fauthz.v1.yaml");
        assert_eq!(params.get(URL_PARAM), Some("/openapi/authz.v1.yaml"));
    }

    #[test]
    fn test_parse_leading_question_mark() {
        let params = QueryParams::parse("?url=/openapi/idp.v1.yaml");
        assert_eq!(params.get(URL_PARAM), Some("/openapi/idp.v1.yaml"));
    }

    #[test]
    fn test_first_value_wins() {
        let params = QueryParams::parse("url=/first.yaml&url=/second.yaml");
        assert_eq!(params.get(URL_PARAM), Some("/first.yaml"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_empty_value_is_present() {
        let params = QueryParams::parse("url=");
        assert_eq!(params.get(URL_PARAM), Some(""));
    }

    #[test]
    fn test_missing_parameter() {
        let params = QueryParams::parse("deepLinking=false");
        assert_eq!(params.get(URL_PARAM), None);
    }

    #[test]
    fn test_plus_decodes_to_space() {
        let params = QueryParams::parse("url=my+spec.yaml");
        assert_eq!(params.get(URL_PARAM), Some("my spec.yaml"));
    }

    #[test]
    fn test_from_query_none() {
        assert!(QueryParams::from_query(None).is_empty());
    }

    #[test]
    fn test_from_iterator() {
        let params: QueryParams = [("url", "/openapi/identity.v1.yaml")].into_iter().collect();
        assert_eq!(params.get(URL_PARAM), Some("/openapi/identity.v1.yaml"));
    }
}
