//! URL splitting for the endpoint constants (no_std, no allocation)
//!
//! A plain HTTP/1.1 client wants host / port / path separately
//! (`Host:` header, TCP endpoint, request line). These helpers cut the
//! `&'static str` constants into those pieces without copying.

/// Pieces of an `http://` or `https://` URL.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UrlParts<'a> {
    /// true for https
    pub secure: bool,
    pub host: &'a str,
    pub port: u16,
    /// Always starts with `/`
    pub path_and_query: &'a str,
}

/// Split `url` into scheme / host / port / path.
/// Returns None for other schemes, an empty host, or a bad port.
pub fn split_url(url: &str) -> Option<UrlParts<'_>> {
    let (secure, rest) = if let Some(r) = url.strip_prefix("https://") {
        (true, r)
    } else if let Some(r) = url.strip_prefix("http://") {
        (false, r)
    } else {
        return None;
    };

    let auth_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..auth_end];
    let path_and_query = match &rest[auth_end..] {
        "" => "/",
        p if p.starts_with('/') => p,
        // "host?x=1" has no path; the request line still needs one
        _ => return None,
    };

    let (host, port) = match authority.rsplit_once(':') {
        Some((h, p)) => (h, parse_port(p)?),
        None => (authority, if secure { 443 } else { 80 }),
    };
    if host.is_empty() || host.contains('@') {
        return None;
    }

    Some(UrlParts { secure, host, port, path_and_query })
}

fn parse_port(s: &str) -> Option<u16> {
    if s.is_empty() || s.len() > 5 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u16>().ok().filter(|p| *p != 0)
}

/// Value of the first `name=` parameter in the query string (not decoded).
pub fn query_param<'a>(url: &'a str, name: &str) -> Option<&'a str> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or("");
    query
        .split('&')
        .filter_map(|kv| kv.split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}
