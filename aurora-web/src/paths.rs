//! Image and data URLs.
//!
//! Catalog entries hold paths relative to the site root. A deployment under a
//! sub-path bakes that prefix in through `PUBLIC_URL` at build time.

const PUBLIC_URL: Option<&str> = option_env!("PUBLIC_URL");

/// Absolute URL for a catalog asset path such as `static/img/aurora-ember-red.webp`.
#[must_use]
pub fn asset_path(relative: &str) -> String {
    join(PUBLIC_URL.unwrap_or_default(), relative)
}

fn join(prefix: &str, relative: &str) -> String {
    let mut url = String::from(prefix.trim_end_matches('/'));
    url.push('/');
    url.push_str(relative.trim_start_matches('/'));
    url
}
