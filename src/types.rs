//! Core types: queries, page offsets, merged payloads, and catalog projections.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SearchError;

/// A JSON object as returned by the search service.
pub type JsonMap = serde_json::Map<String, Value>;

/// Key under which a search response carries its result entries.
pub const ITEMS_KEY: &str = "items";

/// A validated, non-blank search query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query(String);

impl Query {
    /// Create a query from user text. Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidQuery`] if the text is blank.
    pub fn new(text: &str) -> Result<Self, SearchError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidQuery("query must not be blank".into()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rank of the first record on a page (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageOffset(u32);

impl PageOffset {
    pub fn new(start: u32) -> Self {
        Self(start)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PageOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome of fetching one page: the raw response object, or the error
/// that stopped it. Exactly one exists per offset per aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    /// Which page this is.
    pub offset: PageOffset,
    /// The response object, or why there is none.
    pub outcome: Result<JsonMap, SearchError>,
}

impl PageResult {
    /// Number of entries in a successful response's `items`, if present.
    pub fn entry_count(&self) -> Option<usize> {
        self.outcome
            .as_ref()
            .ok()
            .and_then(|page| page.get(ITEMS_KEY))
            .and_then(Value::as_array)
            .map(Vec::len)
    }
}

/// Several pages merged into one response object.
///
/// All keys except `items` come from the first successful page; `items`
/// holds every successful page's entries in offset order. Empty when no
/// page succeeded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergedResult(JsonMap);

impl MergedResult {
    /// The merged result entries, or an empty slice if there are none.
    pub fn entries(&self) -> &[Value] {
        self.0
            .get(ITEMS_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &JsonMap {
        &self.0
    }
}

impl From<JsonMap> for MergedResult {
    fn from(map: JsonMap) -> Self {
        Self(map)
    }
}

/// A product reference extracted from a result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub product_id: String,
    pub item_id: String,
    pub metadata: ItemMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    pub store_id: u32,
}

/// One facet value and how many product records carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refinement {
    pub label: String,
    pub record_count: u32,
}

/// A facet: the distinct values of one product attribute with their counts.
///
/// Refinements keep the order in which values were first seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    /// The attribute name, e.g. `brand`.
    pub label: String,
    /// Facet value → refinement.
    pub refinements: IndexMap<String, Refinement>,
}

impl Dimension {
    /// An empty dimension for `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            refinements: IndexMap::new(),
        }
    }

    /// Count one more record carrying `value`.
    pub fn record(&mut self, value: &str) {
        self.refinements
            .entry(value.to_owned())
            .and_modify(|refinement| refinement.record_count += 1)
            .or_insert_with(|| Refinement {
                label: value.to_owned(),
                record_count: 1,
            });
    }
}

/// The merged payload extended with catalog items and facets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedResult {
    /// Every key of the merged payload, unchanged.
    #[serde(flatten)]
    pub merged: JsonMap,
    /// Products extracted from the entries, in entry order.
    #[serde(rename = "itemIds")]
    pub item_ids: Vec<Item>,
    /// One dimension per configured facet attribute.
    pub dimensions: Vec<Dimension>,
}

impl EnrichedResult {
    /// Render as the JSON object handed to callers.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if the value cannot be represented as JSON.
    pub fn to_value(&self) -> Result<Value, SearchError> {
        serde_json::to_value(self)
            .map_err(|e| SearchError::Parse(format!("failed to encode enriched result: {e}")))
    }
}
