//! Domain-level constants.
//!
//! These constants define paging rules shared by the store and its callers.

// =============================================================================
// Pagination
// =============================================================================

/// First page number; pages below this are treated as the first page
pub const FIRST_PAGE: u64 = 1;

/// Default number of users per page
pub const DEFAULT_PER_PAGE: u64 = 15;

/// Extra rows fetched beyond a page to detect whether a next page exists
pub const LOOKAHEAD_ROWS: u64 = 1;
