// Copyright 2025 the Inclined Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Small URL string helpers. Tour targets are opaque strings; nothing here
//! parses more than the `?` and `#` separators.

/// Returns `url` without its fragment.
#[must_use]
pub fn strip_fragment(url: &str) -> &str {
    url.split_once('#').map_or(url, |(base, _)| base)
}

/// Returns the fragment of `url` (without `#`), if it has one.
#[must_use]
pub fn fragment_of(url: &str) -> Option<&str> {
    url.split_once('#').map(|(_, fragment)| fragment)
}

/// Appends `param=token` to the query of `url`, keeping any fragment last.
///
/// ```
/// use inclined::href::with_cache_buster;
///
/// assert_eq!(with_cache_buster("tour.html", "f", 7), "tour.html?f=7");
/// assert_eq!(with_cache_buster("a.html?x=1#top", "f", 7), "a.html?x=1&f=7#top");
/// ```
#[must_use]
pub fn with_cache_buster(url: &str, param: &str, token: u64) -> String {
    let (base, fragment) = match url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (url, None),
    };
    let separator = if base.contains('?') { '&' } else { '?' };
    let mut out = format!("{base}{separator}{param}={token}");
    if let Some(fragment) = fragment {
        out.push('#');
        out.push_str(fragment);
    }
    out
}
