//! Request-side models: sections, skins, protocol versions and the typed
//! per-endpoint parameter records.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Response format selected via the `skin` query parameter.
///
/// `Json` is the service's pseudo-JSON format and the only one this crate
/// decodes; `Api` and `Rss` are XML-family formats returned verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skin {
    Json,
    Api,
    Rss,
}

impl Skin {
    /// Wire value for the `skin` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Skin::Json => "json",
            Skin::Api => "api",
            Skin::Rss => "rss",
        }
    }
}

impl fmt::Display for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pseudo-JSON protocol version, sent as the `version` query parameter.
///
/// Version 3 embeds a pagination trailer in the response; version 2 does not.
/// Only meaningful with [`Skin::Json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Version {
    V2,
    #[default]
    V3,
}

impl Version {
    /// Wire value for the `version` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            Version::V2 => "2",
            Version::V3 => "3",
        }
    }
}

/// Logical resource sections exposed by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Popular,
    Recent,
    Random,
    Featured,
    Posts,
    File,
    Search,
    Licenses,
}

impl Section {
    /// URL path segment for this section
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Popular => "popular",
            Section::Recent => "recent",
            Section::Random => "random",
            Section::Featured => "featured",
            Section::Posts => "posts",
            Section::File => "file",
            Section::Search => "search",
            Section::Licenses => "licenses",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Browsing feeds: the sections that list videos without post filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowseFeed {
    Popular,
    Recent,
    Random,
    Featured,
}

impl BrowseFeed {
    /// The section this feed maps to
    pub fn section(&self) -> Section {
        match self {
            BrowseFeed::Popular => Section::Popular,
            BrowseFeed::Recent => Section::Recent,
            BrowseFeed::Random => Section::Random,
            BrowseFeed::Featured => Section::Featured,
        }
    }
}

/// Sort method for post listings.
///
/// The service also documents `sort` for search, but it was observed not to
/// work there, so it is only representable on [`PostFilters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Date,
    Popularity,
    Random,
}

impl SortBy {
    /// Wire value for the `sort` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Date => "date",
            SortBy::Popularity => "popularity",
            SortBy::Random => "random",
        }
    }
}

/// Filters accepted by the `posts` section only.
///
/// Every field is optional; empty strings and zero values are omitted from
/// the built URL because the upstream service rejects empty query values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFilters {
    /// User/channel name, sent as a host subdomain rather than a parameter
    pub channel: Option<String>,

    /// Page number to retrieve
    pub page: Option<u32>,

    /// Number of items to fetch (wire name `pagelen`)
    pub count: Option<u32>,

    /// Comma-separated list of formats, e.g. "flv,mov" (wire name `file_type`)
    pub filetype: Option<String>,

    /// Comma-separated list of tags (wire name `topic_name`)
    pub tags: Option<String>,

    /// Comma-separated list of license ids
    pub license: Option<String>,

    /// Two-letter language code (wire name `language_code`)
    pub language: Option<String>,

    /// Sort method
    pub sort: Option<SortBy>,

    /// Comma-separated list of category ids (wire name `categories_id`)
    pub categories: Option<String>,
}

impl PostFilters {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the channel whose posts to list
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Set the page number
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the number of items to fetch
    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Filter by file type(s)
    pub fn filetype(mut self, filetype: impl Into<String>) -> Self {
        self.filetype = Some(filetype.into());
        self
    }

    /// Filter by tag(s)
    pub fn tags(mut self, tags: impl Into<String>) -> Self {
        self.tags = Some(tags.into());
        self
    }

    /// Filter by license id(s)
    pub fn license(mut self, license: impl Into<String>) -> Self {
        self.license = Some(license.into());
        self
    }

    /// Filter by language code
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the sort method
    pub fn sort(mut self, sort: SortBy) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Filter by category id(s)
    pub fn categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }
}

/// A fully described request, one variant per endpoint family.
///
/// Parameters that a section does not accept are unrepresentable here, so
/// invalid combinations are rejected at construction time instead of being
/// silently dropped during URL assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Request {
    /// Browse one of the video feeds
    Browse {
        feed: BrowseFeed,
        page: Option<u32>,
    },
    /// List posts, optionally scoped to a channel and filtered
    Posts(PostFilters),
    /// Full-text video search
    Search {
        phrase: String,
        page: Option<u32>,
    },
    /// Details for a single file by id
    FileDetail { id: u64 },
    /// The list of supported licenses (XML only upstream)
    Licenses,
}

impl Request {
    /// The section path segment for this request
    pub fn section(&self) -> Section {
        match self {
            Request::Browse { feed, .. } => feed.section(),
            Request::Posts(_) => Section::Posts,
            Request::Search { .. } => Section::Search,
            Request::FileDetail { .. } => Section::File,
            Request::Licenses => Section::Licenses,
        }
    }

    /// Optional command path segment.
    ///
    /// Only the licenses endpoint needs one; the request fails upstream
    /// without `view`.
    pub fn command(&self) -> Option<&'static str> {
        match self {
            Request::Licenses => Some("view"),
            _ => None,
        }
    }

    /// Host subdomain, used by channel-scoped post listings
    pub fn subdomain(&self) -> Option<&str> {
        match self {
            Request::Posts(filters) => filters.channel.as_deref().filter(|c| !c.is_empty()),
            _ => None,
        }
    }

    /// Skin override for endpoints that only work with one format.
    ///
    /// The licenses endpoint returns broken JSON upstream, so it is always
    /// requested as XML regardless of the client's configured skin.
    pub fn forced_skin(&self) -> Option<Skin> {
        match self {
            Request::Licenses => Some(Skin::Api),
            _ => None,
        }
    }

    /// Logical `(name, value)` parameter pairs for this request, in the
    /// canonical translation-table order. Empty and zero values are already
    /// filtered out.
    pub(crate) fn logical_params(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        match self {
            Request::Browse { page, .. } => {
                push_num(&mut pairs, "page", *page);
            }
            Request::Posts(filters) => {
                push_num(&mut pairs, "count", filters.count.map(u64::from));
                push_num(&mut pairs, "page", filters.page);
                if let Some(sort) = filters.sort {
                    pairs.push(("sort", sort.as_str().to_string()));
                }
                push_str(&mut pairs, "filetype", filters.filetype.as_deref());
                push_str(&mut pairs, "license", filters.license.as_deref());
                push_str(&mut pairs, "tags", filters.tags.as_deref());
                push_str(&mut pairs, "language", filters.language.as_deref());
                push_str(&mut pairs, "categories", filters.categories.as_deref());
            }
            Request::Search { phrase, page } => {
                push_str(&mut pairs, "search", Some(phrase.as_str()));
                push_num(&mut pairs, "page", *page);
            }
            Request::FileDetail { id } => {
                push_num(&mut pairs, "id", Some(*id));
            }
            Request::Licenses => {}
        }
        pairs
    }
}

// The upstream service treats zero like an absent value, so both are omitted.
fn push_num<N: Into<u64> + Copy>(
    pairs: &mut Vec<(&'static str, String)>,
    name: &'static str,
    value: Option<N>,
) {
    if let Some(value) = value {
        let value: u64 = value.into();
        if value > 0 {
            pairs.push((name, value.to_string()));
        }
    }
}

fn push_str(pairs: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&str>) {
    if let Some(value) = value {
        if !value.is_empty() {
            pairs.push((name, value.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_zero_values_omitted() {
        let filters = PostFilters::new().page(0).count(0).tags("").filetype("flv");
        let pairs = Request::Posts(filters).logical_params();
        assert_eq!(pairs, vec![("filetype", "flv".to_string())]);
    }

    #[test]
    fn test_posts_params_in_canonical_order() {
        let filters = PostFilters::new()
            .count(5)
            .page(2)
            .sort(SortBy::Popularity)
            .tags("news")
            .language("en");
        let pairs = Request::Posts(filters).logical_params();
        let names: Vec<&str> = pairs.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["count", "page", "sort", "tags", "language"]);
    }

    #[test]
    fn test_licenses_forced_to_xml_with_view_command() {
        let request = Request::Licenses;
        assert_eq!(request.forced_skin(), Some(Skin::Api));
        assert_eq!(request.command(), Some("view"));
        assert!(request.logical_params().is_empty());
    }

    #[test]
    fn test_subdomain_only_for_posts_channel() {
        let posts = Request::Posts(PostFilters::new().channel("mercyscross"));
        assert_eq!(posts.subdomain(), Some("mercyscross"));

        let blank = Request::Posts(PostFilters::new().channel(""));
        assert_eq!(blank.subdomain(), None);

        let search = Request::Search {
            phrase: "storm".to_string(),
            page: None,
        };
        assert_eq!(search.subdomain(), None);
    }
}
