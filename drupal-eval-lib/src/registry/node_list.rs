use crate::error::EvalError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

/// One page of results from the node API.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct NodeList {
    #[serde(default)]
    pub list: Vec<Value>,

    /// Link to the final page of the result set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,

    /// The request that produced this page; not part of the payload.
    #[serde(skip)]
    pub source: String,
}

impl NodeList {
    /// Number of pages in the full result set, read from the `page`
    /// parameter of the last-page link. A missing link or a zero index
    /// both count as a single page.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.last
            .as_deref()
            .and_then(page_param)
            .map_or(1, |page| page.max(1))
    }

    /// Decodes the listed items into typed records.
    pub fn items<T: DeserializeOwned>(&self) -> Result<Vec<T>, EvalError> {
        self.list.iter().map(|item| self.decode(item)).collect()
    }

    /// Decodes only the first listed item, ignoring the rest of the page.
    pub fn first_item<T: DeserializeOwned>(&self) -> Result<Option<T>, EvalError> {
        self.list.first().map(|item| self.decode(item)).transpose()
    }

    fn decode<T: DeserializeOwned>(&self, item: &Value) -> Result<T, EvalError> {
        T::deserialize(item).map_err(|e| EvalError::Registry {
            url: self.source.clone(),
            status: None,
            reason: format!("malformed node: {e}"),
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

fn page_param(link: &str) -> Option<u64> {
    let base = Url::parse("https://registry.invalid/").ok()?;
    let url = base.join(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}
