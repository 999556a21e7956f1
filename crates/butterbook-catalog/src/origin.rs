//! Absolutization of image paths against the backend origin.

/// Prefixes returned unchanged: absolute URLs, inline data, and paths the
/// clients serve as bundled static assets.
const PASSTHROUGH_PREFIXES: &[&str] = &[
    "http://",
    "https://",
    "data:",
    "blob:",
    "/images/",
    "/assets/",
    "/static/",
];

/// Resolves `path` against `base_origin`.
///
/// Given `"http://host:8000"` and `"/media/x.png"`, returns
/// `"http://host:8000/media/x.png"`. Absolute URLs, `data:`/`blob:` URLs,
/// and `/images/`, `/assets/`, `/static/` paths come back unchanged.
#[must_use]
pub fn absolutize_image_url(base_origin: &str, path: &str) -> String {
    let path = path.trim();
    let lower = path.to_ascii_lowercase();
    if PASSTHROUGH_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
    {
        return path.to_string();
    }

    url::Url::parse(base_origin)
        .and_then(|base| base.join(path))
        .map_or_else(
            |e| {
                tracing::warn!(
                    base_origin,
                    path,
                    error = %e,
                    "could not join image path to base origin, falling back to string concatenation"
                );
                format!(
                    "{}/{}",
                    base_origin.trim_end_matches('/'),
                    path.trim_start_matches('/')
                )
            },
            |u| u.to_string(),
        )
}
