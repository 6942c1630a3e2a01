//! API base-path resolution.
//!
//! SYSTEM CONTEXT
//! ==============
//! The hosting platform may serve the page under a dynamic sub-path
//! (`/customApps/{id}/`). The backend can also inject the prefix into a
//! `<meta name="base-path">` tag. The resolved prefix is computed once at
//! startup and prepended to every `/api/...` call.

#[cfg(test)]
#[path = "base_path_test.rs"]
mod base_path_test;

/// Resolve the API prefix from the page path and the optional meta tag value.
///
/// A non-empty meta value other than `/` wins. Otherwise the page path is
/// used with one trailing slash stripped, and the root path maps to `""`.
pub fn resolve_base_path(page_path: &str, meta_base_path: Option<&str>) -> String {
    if let Some(meta) = meta_base_path.filter(|m| !m.is_empty() && *m != "/") {
        return strip_trailing_slash(meta).to_owned();
    }
    if page_path.is_empty() || page_path == "/" {
        return String::new();
    }
    strip_trailing_slash(page_path).to_owned()
}

/// Join the resolved prefix with an absolute API path.
pub fn api_url(base: &str, path: &str) -> String {
    format!("{base}{path}")
}

fn strip_trailing_slash(path: &str) -> &str {
    path.strip_suffix('/').unwrap_or(path)
}

/// Read the page path and `base-path` meta tag from the current document.
#[cfg(feature = "csr")]
pub fn detect_base_path() -> String {
    let window = web_sys::window();
    let page_path = window
        .as_ref()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default();
    let meta = window
        .and_then(|w| w.document())
        .and_then(|doc| doc.query_selector(r#"meta[name="base-path"]"#).ok().flatten())
        .and_then(|el| el.get_attribute("content"));

    let base = resolve_base_path(&page_path, meta.as_deref());
    leptos::logging::log!("page path: {page_path:?}, detected base path: {base:?}");
    base
}
