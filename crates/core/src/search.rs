//! List-filter helpers and pagination bounds.
//!
//! This module lives in `core` (zero internal deps) so it can be used by
//! both the repository layer and any client-side tooling.

// ---------------------------------------------------------------------------
// Pagination bounds
// ---------------------------------------------------------------------------

/// Default number of rows per page.
pub const DEFAULT_PER_PAGE: i64 = 10;

/// Maximum number of rows per page.
pub const MAX_PER_PAGE: i64 = 100;

/// Clamp a user-provided page number to 1 or greater.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size to `1..=MAX_PER_PAGE`.
pub fn clamp_per_page(per_page: Option<i64>) -> i64 {
    per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
}

// ---------------------------------------------------------------------------
// LIKE pattern helpers
// ---------------------------------------------------------------------------

/// Escape SQL `LIKE` wildcards so filter text matches literally.
///
/// `%`, `_`, and `\` are prefixed with a backslash, PostgreSQL's default
/// `LIKE` escape character.
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

/// Build a substring-containment `LIKE` pattern from raw filter text.
pub fn contains_pattern(input: &str) -> String {
    format!("%{}%", escape_like(input))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
