//! Query Builder: turns a [`Request`] into a fully-formed request URL.
//!
//! URL assembly is deterministic and side-effect free; validation of which
//! parameters a section accepts happens at [`Request`] construction time,
//! not here.

use crate::models::{Request, Skin, Version};

/// Default host for the service, without scheme
pub const DEFAULT_HOST: &str = "blip.tv";

/// Translation from logical parameter names to the service's wire names.
///
/// This table must be reproduced exactly for wire compatibility, and it must
/// stay injective: no two logical names may share a wire name. URL parameter
/// order follows table order.
pub(crate) const PARAM_TABLE: &[(&str, &str)] = &[
    ("count", "pagelen"),
    ("id", "id"),
    ("search", "search"),
    ("page", "page"),
    ("sort", "sort"),
    ("filetype", "file_type"),
    ("license", "license"),
    ("tags", "topic_name"),
    ("language", "language_code"),
    ("categories", "categories_id"),
];

/// Wire parameter names only valid for the `posts` section
#[cfg(test)]
pub(crate) const POST_ONLY_WIRE_NAMES: &[&str] = &[
    "pagelen",
    "sort",
    "file_type",
    "license",
    "topic_name",
    "language_code",
    "categories_id",
];

fn wire_name(logical: &str) -> Option<&'static str> {
    PARAM_TABLE
        .iter()
        .find(|(name, _)| *name == logical)
        .map(|(_, wire)| *wire)
}

/// Build the request URL for `request` against `host`.
///
/// The query string always carries the `skin` indicator and, for pseudo-JSON
/// only, the protocol `version`. Endpoints with a forced skin (licenses)
/// override the caller's choice here. Identical inputs produce byte-identical
/// URLs.
pub fn build_url(host: &str, request: &Request, skin: Skin, version: Version) -> String {
    let skin = request.forced_skin().unwrap_or(skin);

    let mut url = String::from("http://");
    if let Some(subdomain) = request.subdomain() {
        url.push_str(subdomain);
        url.push('.');
    }
    url.push_str(host);
    url.push('/');
    url.push_str(request.section().as_str());
    url.push('/');
    if let Some(command) = request.command() {
        url.push_str(command);
        url.push('/');
    }
    url.push('?');

    url.push_str("skin=");
    url.push_str(skin.as_str());
    if skin == Skin::Json {
        url.push_str("&version=");
        url.push_str(version.as_str());
    }

    for (logical, value) in request.logical_params() {
        // Typed requests only emit names the table knows; anything else is
        // dropped rather than sent with a name the service cannot accept.
        if let Some(wire) = wire_name(logical) {
            url.push('&');
            url.push_str(wire);
            url.push('=');
            url.push_str(&urlencoding::encode(&value));
        }
    }

    url
}
