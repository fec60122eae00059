//! Query string encoding for parameters a rule leaves over.

use url::form_urlencoded;

use crate::routing::rule::{Params, QueryEncoder};

/// Form-urlencoded `key=value` pairs joined by a configurable ampersand.
#[derive(Debug, Clone)]
pub struct FormEncoder {
    ampersand: String,
}

impl FormEncoder {
    pub fn new(ampersand: impl Into<String>) -> Self {
        Self {
            ampersand: ampersand.into(),
        }
    }

    pub fn ampersand(&self) -> &str {
        &self.ampersand
    }
}

impl Default for FormEncoder {
    fn default() -> Self {
        Self::new("&")
    }
}

impl QueryEncoder for FormEncoder {
    fn encode(&self, params: &Params) -> String {
        params
            .iter()
            .map(|(key, value)| format!("{}={}", escape(key), escape(value)))
            .collect::<Vec<_>>()
            .join(&self.ampersand)
    }
}

fn escape(raw: &str) -> String {
    form_urlencoded::byte_serialize(raw.as_bytes()).collect()
}

/// Parse a query string split on `ampersand`. Later duplicates win.
pub fn parse_query(query: &str, ampersand: &str) -> Params {
    let mut params = Params::new();
    for pair in query.split(ampersand).filter(|p| !p.is_empty()) {
        for (key, value) in form_urlencoded::parse(pair.as_bytes()) {
            params.insert(key.into_owned(), value.into_owned());
        }
    }
    params
}
