//! Absolute request URL reconstruction for page links.

use axum::http::header::HOST;
use axum::http::{HeaderMap, Uri};
use url::Url;

/// Host used when a request carries no usable `Host` header.
const FALLBACK_HOST: &str = "localhost";

/// The absolute URL a request was made to.
///
/// With a configured `public_url`, its scheme, authority and path prefix
/// replace whatever the request says. Otherwise the scheme is `http` and the
/// authority comes from `Host`.
pub fn absolute_url(
    public_url: Option<&Url>,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<Url, url::ParseError> {
    let path_and_query = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    if let Some(base) = public_url {
        let prefix = base.path().trim_end_matches('/');
        return Url::parse(&format!(
            "{}{}{}",
            base.origin().ascii_serialization(),
            prefix,
            path_and_query
        ));
    }

    let host = headers
        .get(HOST)
        .and_then(|h| h.to_str().ok())
        .filter(|h| !h.is_empty());
    match host.map(|h| Url::parse(&format!("http://{h}{path_and_query}"))) {
        Some(Ok(url)) => Ok(url),
        _ => Url::parse(&format!("http://{FALLBACK_HOST}{path_and_query}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(host: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_str(host).unwrap());
        headers
    }

    #[test]
    fn uses_host_header() {
        let uri: Uri = "/api/texts/?page=2".parse().unwrap();
        let url = absolute_url(None, &headers("example.com:8080"), &uri).unwrap();
        assert_eq!(url.as_str(), "http://example.com:8080/api/texts/?page=2");
    }

    #[test]
    fn falls_back_without_host() {
        let uri: Uri = "/api/texts/".parse().unwrap();
        let url = absolute_url(None, &HeaderMap::new(), &uri).unwrap();
        assert_eq!(url.as_str(), "http://localhost/api/texts/");
    }

    #[test]
    fn garbage_host_falls_back() {
        let uri: Uri = "/api/texts/".parse().unwrap();
        let url = absolute_url(None, &headers("bad host"), &uri).unwrap();
        assert_eq!(url.host_str(), Some("localhost"));
    }

    #[test]
    fn public_url_wins_and_keeps_prefix() {
        let base = Url::parse("https://texts.example.com/quill/").unwrap();
        let uri: Uri = "/api/texts/?page=3".parse().unwrap();
        let url = absolute_url(Some(&base), &headers("internal:8000"), &uri).unwrap();
        assert_eq!(
            url.as_str(),
            "https://texts.example.com/quill/api/texts/?page=3"
        );
    }
}
