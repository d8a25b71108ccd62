use std::convert::Infallible;

use percent_encoding::percent_decode_str;

/// Route prefix preceding the encoded text
pub(crate) const SYNTHESIZE_PREFIX: &str = "/synthesize/";

/// Text taken verbatim from the request target and percent-decoded
///
/// The wildcard path parameter is not used because the router decodes it
/// before `%2F` can be told apart from a path separator, and rejects invalid
/// UTF-8 outright. Everything after the prefix is decoded here instead,
/// including any query string, with `+` left as a literal plus sign and
/// malformed UTF-8 replaced by U+FFFD. An empty path segment yields empty
/// text whatever the query holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawText(pub String);

impl<S> axum::extract::FromRequestParts<S> for RawText
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut http::request::Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let target = parts
            .uri
            .path_and_query()
            .map_or_else(|| parts.uri.path(), http::uri::PathAndQuery::as_str);

        Ok(Self(decode_target(target)))
    }
}

/// Decode everything following the first `/synthesize/` in `target`
pub(crate) fn decode_target(target: &str) -> String {
    let encoded = target
        .find(SYNTHESIZE_PREFIX)
        .map_or("", |start| &target[start + SYNTHESIZE_PREFIX.len()..]);

    if encoded.starts_with('?') {
        return String::new();
    }

    percent_decode_str(encoded).decode_utf8_lossy().into_owned()
}
