//! Navigation policy for the single web view.

use url::Url;

const ALLOWED_SCHEMES: &[&str] = &["http", "https", "about", "data", "blob"];

/// Decides which URLs may load in the view.
#[derive(Debug, Clone)]
pub struct NavigationPolicy {
    home_origin: Option<String>,
    restrict_to_origin: bool,
}

impl NavigationPolicy {
    pub fn new(start_url: &str, restrict_to_origin: bool) -> Self {
        Self {
            home_origin: origin_of(start_url),
            restrict_to_origin,
        }
    }

    pub fn allows(&self, url: &str) -> bool {
        let parsed = match Url::parse(url.trim()) {
            Ok(u) => u,
            Err(_) => return false,
        };
        let scheme = parsed.scheme();
        if !ALLOWED_SCHEMES.contains(&scheme) {
            return false;
        }
        if !self.restrict_to_origin || !(scheme == "http" || scheme == "https") {
            return true;
        }
        match (&self.home_origin, tuple_origin(&parsed)) {
            (Some(home), Some(origin)) => *home == origin,
            _ => false,
        }
    }
}

fn tuple_origin(url: &Url) -> Option<String> {
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// `scheme://host[:port]` as a browser would serialize it, or `None` for
/// URLs without a network origin.
pub fn origin_of(url: &str) -> Option<String> {
    Url::parse(url.trim()).ok().as_ref().and_then(tuple_origin)
}
