//! Response-side models: normalized results and the pagination record.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single result record decoded from the pseudo-JSON payload.
///
/// Field order matches the service's ranking, which is why the map type
/// preserves insertion order.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Pagination metadata recovered from the version-3 trailer fragment.
///
/// The trailer carries exactly two `name:value` pairs. The names observed in
/// the wild are `page` and `total`, but they are not documented upstream, so
/// the full map is kept reachable via [`Pagination::get`] and
/// [`Pagination::iter`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    entries: BTreeMap<String, String>,
}

impl Pagination {
    /// Build a pagination record from trailer pairs
    pub(crate) fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            entries: pairs.into_iter().collect(),
        }
    }

    /// The current page number, if the trailer named one
    pub fn page(&self) -> Option<&str> {
        self.get("page")
    }

    /// The total result count, if the trailer named one
    pub fn total(&self) -> Option<&str> {
        self.get("total")
    }

    /// Look up a trailer field by name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Iterate over all trailer fields
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// The normalized payload of a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ResponseBody {
    /// XML or RSS content, passed through verbatim and unparsed
    Xml(String),

    /// Decoded pseudo-JSON content
    Records {
        /// Result records in the service's ranking order
        items: Vec<Record>,

        /// Pagination record; `None` when the protocol version does not
        /// embed one (version 2), never an empty map
        pagination: Option<Pagination>,
    },
}

impl ResponseBody {
    /// The verbatim XML text, if this is an XML-family response
    pub fn as_xml(&self) -> Option<&str> {
        match self {
            ResponseBody::Xml(text) => Some(text),
            ResponseBody::Records { .. } => None,
        }
    }

    /// The decoded records, if this is a pseudo-JSON response
    pub fn records(&self) -> Option<&[Record]> {
        match self {
            ResponseBody::Records { items, .. } => Some(items),
            ResponseBody::Xml(_) => None,
        }
    }

    /// The pagination record, if present
    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            ResponseBody::Records { pagination, .. } => pagination.as_ref(),
            ResponseBody::Xml(_) => None,
        }
    }
}

/// The result of one fetch-and-normalize operation.
///
/// Carries the URL that was requested alongside the normalized body, so
/// callers can inspect both after the call without shared mutable state on
/// the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// The fully-built URL this response came from
    pub request_url: String,

    /// The normalized payload
    pub body: ResponseBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_accessors() {
        let pagination = Pagination::from_pairs(vec![
            ("page".to_string(), "1".to_string()),
            ("total".to_string(), "50".to_string()),
        ]);
        assert_eq!(pagination.page(), Some("1"));
        assert_eq!(pagination.total(), Some("50"));
        assert_eq!(pagination.get("missing"), None);
        assert_eq!(pagination.iter().count(), 2);
    }

    #[test]
    fn test_body_accessors() {
        let xml = ResponseBody::Xml("<rss/>".to_string());
        assert_eq!(xml.as_xml(), Some("<rss/>"));
        assert!(xml.records().is_none());
        assert!(xml.pagination().is_none());

        let records = ResponseBody::Records {
            items: vec![Record::new()],
            pagination: None,
        };
        assert!(records.as_xml().is_none());
        assert_eq!(records.records().map(<[Record]>::len), Some(1));
        assert!(records.pagination().is_none());
    }
}
