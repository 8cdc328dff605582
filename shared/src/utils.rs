//! # Shared Utility Functions
//!
//! Client-side pagination math and text helpers used by every list screen.
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{page_window, total_pages};
//!
//! assert_eq!(total_pages(23, 10), 3);
//! assert_eq!(page_window(5, 9, 5), vec![3, 4, 5, 6, 7]);
//! ```

/// Number of pages needed to show `total` records `per_page` at a time.
///
/// A zero page size yields zero pages rather than dividing by zero.
pub fn total_pages(total: u64, per_page: u32) -> u32 {
    if per_page == 0 || total == 0 {
        return 0;
    }
    let pages = total.div_ceil(u64::from(per_page));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Zero-based slice bounds of `page` (1-based) within `len` records.
///
/// Used when a list endpoint returns everything and the screen paginates locally.
pub fn page_bounds(page: u32, per_page: u32, len: usize) -> (usize, usize) {
    let page = page.max(1) as usize;
    let per_page = per_page as usize;
    let start = (page - 1).saturating_mul(per_page).min(len);
    let end = start.saturating_add(per_page).min(len);
    (start, end)
}

/// Page numbers to render around `current`, at most `width` of them.
pub fn page_window(current: u32, total: u32, width: u32) -> Vec<u32> {
    if total == 0 || width == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let width = width.min(total);
    let half = width / 2;
    let start = current
        .saturating_sub(half)
        .max(1)
        .min(total - width + 1);
    (start..start + width).collect()
}

/// Shorten `text` to at most `max_chars` characters, adding an ellipsis.
///
/// Counts characters, not bytes, so multi-byte text never splits mid-character.
///
/// ```rust
/// use shared::utils::truncate_text;
///
/// assert_eq!(truncate_text("Deep carpet cleaning", 10), "Deep carpe...");
/// assert_eq!(truncate_text("Short", 10), "Short");
/// ```
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
