//! Image link construction.

/// Join an image path returned by the backend onto `base`.
///
/// Absolute `http(s)` links pass through unchanged. Blank paths yield `None`
/// so callers can fall back to a placeholder.
///
/// ```rust
/// use dashboard::utils::image_url;
///
/// assert_eq!(
///     image_url("https://cdn.sparkle.test", "uploads/a.png").as_deref(),
///     Some("https://cdn.sparkle.test/uploads/a.png")
/// );
/// assert_eq!(image_url("https://cdn.sparkle.test", "  "), None);
/// ```
pub fn image_url(base: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    if path.starts_with("http://") || path.starts_with("https://") {
        return Some(path.to_string());
    }
    Some(format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}
