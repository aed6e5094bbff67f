//! Retailer site constants and the fixed browser-mimicking header set.

use wreq::header::{HeaderMap, HeaderName, HeaderValue};

/// Public storefront origin.
pub const SITE_ORIGIN: &str = "https://www.pichau.com.br";

/// Default catalog GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.pichau.com.br/api/catalog";

/// Opera 111 on Windows, matching the storefront's usual desktop traffic.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36 OPR/111.0.0.0";

/// ETag pinned from a captured storefront session.
pub const PINNED_ETAG: &str = "W/\"24a-qxS3F0FyEAdXCooDWpyX/IVq6Vg\"";

/// Headers sent with every catalog request, in send order.
pub const CATALOG_HEADERS: &[(&str, &str)] = &[
    ("accept", "*/*"),
    ("accept-language", "pt-BR,pt;q=0.9,en-US;q=0.8,en;q=0.7"),
    ("priority", "u=0, i"),
    ("referer", "https://www.pichau.com.br/"),
    ("user-agent", USER_AGENT),
    ("origin", SITE_ORIGIN),
    ("content-type", "application/json"),
    ("cachettl", "76800"),
    ("if-none-match", PINNED_ETAG),
    ("pichaucachekey", "ratings-review"),
    ("service-worker", "script"),
    ("pragma", "no-cache"),
];

/// Builds the header map applied to each request, one value per name.
pub fn catalog_header_map() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(CATALOG_HEADERS.len());
    for (name, value) in CATALOG_HEADERS {
        headers.insert(HeaderName::from_static(*name), HeaderValue::from_static(*value));
    }
    headers
}
