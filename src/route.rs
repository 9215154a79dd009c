use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationKind {
    Page,
    Block,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub kind: LocationKind,
    pub id: String,
}

/// Parse the host's routing signal (a URL-fragment-like string) into a
/// location. Tried in order: a page route carrying a `block` query parameter,
/// then a plain page route. Anything else (search, settings, unrelated
/// routes) is not a location.
pub fn parse_route(signal: &str) -> Option<Location> {
    let block_re = Regex::new(r"/page/[a-zA-Z0-9_-]+\?[^#\s]*\bblock=([a-zA-Z0-9_-]+)").unwrap();
    if let Some(captures) = block_re.captures(signal)
        && let Some(id) = captures.get(1)
    {
        return Some(Location {
            kind: LocationKind::Block,
            id: id.as_str().to_string(),
        });
    }

    let page_re = Regex::new(r"/page/([a-zA-Z0-9_-]+)").unwrap();
    if let Some(captures) = page_re.captures(signal)
        && let Some(id) = captures.get(1)
    {
        return Some(Location {
            kind: LocationKind::Page,
            id: id.as_str().to_string(),
        });
    }

    None
}
