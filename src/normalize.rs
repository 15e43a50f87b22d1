//! Response Normalizer: repairs the service's pseudo-JSON payloads and
//! passes XML-family payloads through untouched.
//!
//! The service's default format is not valid JSON. A response looks like
//!
//! ```text
//! blip_ws_results([{...},{...}],[{page : 1},{total : 50}]);
//! ```
//!
//! a function-call envelope around a decodable array of result objects,
//! followed (version 3 only) by a pagination trailer of bare `key:value`
//! pairs that no JSON decoder accepts. Single quotes inside string values
//! arrive under-escaped as `\'` and terminate strings early unless doubled
//! first. Everything in this module exists to compensate for that format;
//! if the upstream envelope ever changes, only this module needs replacing.

use crate::error::ClientError;
use crate::models::{Pagination, Record, ResponseBody, Skin, Version};

/// Fixed envelope tokens around the payload
const ENVELOPE_PREFIX: &str = "blip_ws_results(";
const ENVELOPE_SUFFIX: &str = ");";

/// Two-character sequence marking the boundary between the result array and
/// the pagination trailer in a version-3 payload
const TRAILER_BOUNDARY: &str = "],";

/// Normalize a raw payload according to the declared skin.
///
/// Returns the verbatim text for XML-family skins, or the decoded record
/// collection plus pagination for pseudo-JSON.
pub(crate) fn normalize(
    raw: &str,
    skin: Skin,
    version: Version,
    url: &str,
) -> Result<ResponseBody, ClientError> {
    match skin {
        Skin::Api | Skin::Rss => {
            Ok(ResponseBody::Xml(passthrough_xml(raw, skin, url)?.to_string()))
        }
        Skin::Json => {
            let (items, pagination) = decode_pseudo_json(raw, skin, version, url)?;
            Ok(ResponseBody::Records { items, pagination })
        }
    }
}

/// Pass an XML or RSS payload through unchanged.
///
/// The content is never parsed or validated; it is the caller's to interpret.
pub(crate) fn passthrough_xml<'a>(
    raw: &'a str,
    skin: Skin,
    url: &str,
) -> Result<&'a str, ClientError> {
    if skin == Skin::Json {
        return Err(ClientError::FormatMismatch(skin));
    }
    if raw.is_empty() {
        return Err(ClientError::transport(url, "empty response body"));
    }
    Ok(raw)
}

/// Repair and decode a pseudo-JSON payload.
///
/// Returns the result records and, for version 3, the pagination record.
pub(crate) fn decode_pseudo_json(
    raw: &str,
    skin: Skin,
    version: Version,
    url: &str,
) -> Result<(Vec<Record>, Option<Pagination>), ClientError> {
    if skin != Skin::Json {
        return Err(ClientError::FormatMismatch(skin));
    }
    if raw.is_empty() {
        return Err(ClientError::transport(url, "empty response body"));
    }

    let repaired = repair(raw);

    match version {
        Version::V3 => {
            let (items, pagination) = split_and_decode_v3(&repaired)?;
            Ok((items, Some(pagination)))
        }
        Version::V2 => {
            let items: Vec<Record> = serde_json::from_str(&repaired)?;
            Ok((items, None))
        }
    }
}

/// Strip the envelope and fix the quote escaping.
///
/// The re-escape must run over the whole payload before any decode attempt,
/// or a `\'` inside a title ends the string early.
fn repair(raw: &str) -> String {
    let text = raw.trim();
    let text = text.strip_prefix(ENVELOPE_PREFIX).unwrap_or(text);
    let text = text.strip_suffix(ENVELOPE_SUFFIX).unwrap_or(text);
    text.replace("\\'", "\\\\'")
}

/// Split a version-3 payload at the last `],` and decode both fragments.
fn split_and_decode_v3(payload: &str) -> Result<(Vec<Record>, Pagination), ClientError> {
    let Some(boundary) = payload.rfind(TRAILER_BOUNDARY) else {
        // No trailer at all. The one legitimate shape without a boundary is
        // the service's error envelope, checked before giving up.
        check_error_envelope(payload)?;
        return Err(ClientError::Decode(
            "version 3 payload has no pagination trailer".to_string(),
        ));
    };

    let head = &payload[..=boundary];
    let tail = &payload[boundary + TRAILER_BOUNDARY.len()..];

    let items: Vec<Record> = match serde_json::from_str(head) {
        Ok(items) => items,
        Err(err) => {
            // The split point can land inside an error envelope; retry the
            // whole payload before reporting a decode failure.
            check_error_envelope(payload)?;
            tracing::warn!("result fragment did not decode: {}", err);
            return Err(ClientError::Decode(format!("result fragment: {}", err)));
        }
    };

    let pagination = parse_trailer(tail)?;
    Ok((items, pagination))
}

/// Detect the service's application-level error envelope: a single-element
/// array whose sole object carries an `error` field. Reports the message
/// verbatim when found.
fn check_error_envelope(payload: &str) -> Result<(), ClientError> {
    let Ok(items) = serde_json::from_str::<Vec<Record>>(payload) else {
        return Ok(());
    };
    if items.len() == 1 {
        if let Some(value) = items[0].get("error") {
            let message = match value.as_str() {
                Some(text) => text.to_string(),
                None => value.to_string(),
            };
            return Err(ClientError::Upstream(message));
        }
    }
    Ok(())
}

/// Parse the pagination trailer: strip all brace and bracket characters,
/// then read exactly two comma-separated `name:value` pairs.
fn parse_trailer(tail: &str) -> Result<Pagination, ClientError> {
    let stripped: String = tail
        .chars()
        .filter(|c| !matches!(c, '[' | ']' | '{' | '}'))
        .collect();

    let pieces: Vec<&str> = stripped
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect();

    if pieces.len() != 2 {
        return Err(ClientError::PaginationParse(format!(
            "expected 2 fields, found {} in {:?}",
            pieces.len(),
            tail
        )));
    }

    let mut pairs = Vec::with_capacity(2);
    for piece in pieces {
        let Some((name, value)) = piece.split_once(':') else {
            return Err(ClientError::PaginationParse(format!(
                "field {:?} has no name:value separator",
                piece
            )));
        };
        pairs.push((name.trim().to_string(), value.trim().to_string()));
    }

    Ok(Pagination::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://blip.tv/posts/?skin=json&version=3";

    #[test]
    fn test_v3_round_trip() {
        let raw = r#"blip_ws_results([{"title":"First"},{"title":"Second"}],[{page : 1},{total : 50}]);"#;
        let (items, pagination) =
            decode_pseudo_json(raw, Skin::Json, Version::V3, URL).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["title"], "First");

        let pagination = pagination.expect("version 3 carries pagination");
        assert_eq!(pagination.page(), Some("1"));
        assert_eq!(pagination.total(), Some("50"));
    }

    #[test]
    fn test_v2_has_no_pagination_state() {
        let raw = r#"blip_ws_results([{"title":"Only"}]);"#;
        let (items, pagination) =
            decode_pseudo_json(raw, Skin::Json, Version::V2, URL).unwrap();

        assert_eq!(items.len(), 1);
        assert!(pagination.is_none());
    }

    #[test]
    fn test_underescaped_quotes_are_repaired() {
        let raw = "blip_ws_results([{\"title\":\"It\\'s here\"}],[{page:1},{total:1}]);";
        let (items, _) = decode_pseudo_json(raw, Skin::Json, Version::V3, URL).unwrap();
        assert_eq!(items[0]["title"], "It\\'s here");
    }

    #[test]
    fn test_empty_payload_is_transport_failure() {
        let err = decode_pseudo_json("", Skin::Json, Version::V3, URL).unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
        assert!(err.to_string().contains(URL));
    }

    #[test]
    fn test_wrong_skin_is_format_mismatch() {
        let err = decode_pseudo_json("<rss/>", Skin::Rss, Version::V3, URL).unwrap_err();
        assert!(matches!(err, ClientError::FormatMismatch(Skin::Rss)));

        let err = passthrough_xml("{}", Skin::Json, URL).unwrap_err();
        assert!(matches!(err, ClientError::FormatMismatch(Skin::Json)));
    }

    #[test]
    fn test_error_envelope_reported_verbatim() {
        let raw = r#"blip_ws_results([{"error":"Invalid topic name"}]);"#;
        let err = decode_pseudo_json(raw, Skin::Json, Version::V3, URL).unwrap_err();
        match err {
            ClientError::Upstream(message) => assert_eq!(message, "Invalid topic name"),
            other => panic!("expected Upstream, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_trailer_is_surfaced() {
        let raw = r#"blip_ws_results([{"title":"x"}],[{page : 1}]);"#;
        let err = decode_pseudo_json(raw, Skin::Json, Version::V3, URL).unwrap_err();
        assert!(matches!(err, ClientError::PaginationParse(_)));

        let raw = r#"blip_ws_results([{"title":"x"}],[{page 1},{total 2}]);"#;
        let err = decode_pseudo_json(raw, Skin::Json, Version::V3, URL).unwrap_err();
        assert!(matches!(err, ClientError::PaginationParse(_)));
    }

    #[test]
    fn test_missing_trailer_is_decode_failure() {
        // Valid JSON, more than one element, no trailer boundary: not an
        // error envelope, just not a version-3 shape.
        let raw = r#"blip_ws_results([{"a":1}]);"#;
        let err = decode_pseudo_json(raw, Skin::Json, Version::V3, URL).unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }

    #[test]
    fn test_xml_passes_through_verbatim() {
        let raw = "<?xml version=\"1.0\"?><rss><channel/></rss>";
        assert_eq!(passthrough_xml(raw, Skin::Rss, URL).unwrap(), raw);
        assert_eq!(passthrough_xml(raw, Skin::Api, URL).unwrap(), raw);
    }

    #[test]
    fn test_xml_empty_payload_is_transport_failure() {
        let err = passthrough_xml("", Skin::Api, URL).unwrap_err();
        assert!(matches!(err, ClientError::Transport { .. }));
        assert!(err.to_string().contains(URL));
    }

    #[test]
    fn test_trailer_whitespace_tolerated() {
        let raw = "blip_ws_results([{\"a\":1}], [{ page : 7 }, { total : 123 }]);";
        let (_, pagination) = decode_pseudo_json(raw, Skin::Json, Version::V3, URL).unwrap();
        let pagination = pagination.unwrap();
        assert_eq!(pagination.page(), Some("7"));
        assert_eq!(pagination.total(), Some("123"));
    }

    #[test]
    fn test_non_string_error_value_stringified() {
        let raw = r#"blip_ws_results([{"error":404}]);"#;
        let err = decode_pseudo_json(raw, Skin::Json, Version::V3, URL).unwrap_err();
        match err {
            ClientError::Upstream(message) => assert_eq!(message, "404"),
            other => panic!("expected Upstream, got {:?}", other),
        }
    }
}
