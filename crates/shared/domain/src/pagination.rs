//! Look-ahead pagination for user listings.
//!
//! A page query asks for `per_page + 1` rows. When the extra row comes back
//! there is a next page; the extra row itself is never returned. This avoids
//! a separate `COUNT(*)` query.

use serde::{Deserialize, Serialize};

use crate::constants::{FIRST_PAGE, LOOKAHEAD_ROWS};
use crate::user::User;

/// Row offset for a page. Pages below 2 all start at row 0.
pub fn page_offset(per_page: u64, current_page: u64) -> u64 {
    if current_page <= FIRST_PAGE {
        0
    } else {
        (current_page - 1).saturating_mul(per_page)
    }
}

/// Number of rows to request for a page, including the look-ahead row
pub fn window_size(per_page: u64) -> u64 {
    per_page.saturating_add(LOOKAHEAD_ROWS)
}

/// One page of users plus navigation metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedUsers {
    pub users: Vec<User>,
    /// Requested page, echoed back as given
    pub current_page: u64,
    /// Requested page size, echoed back as given
    pub per_page: u64,
    pub next_page: Option<u64>,
    /// Derived from `current_page` alone, even when the page is empty
    pub previous_page: Option<u64>,
}

impl PaginatedUsers {
    /// Build a page from the rows returned by a look-ahead query.
    ///
    /// `rows` must have been fetched with [`window_size`]. If it holds the
    /// full window, the trailing look-ahead row is dropped and a next page
    /// is reported.
    pub fn from_window(mut rows: Vec<User>, per_page: u64, current_page: u64) -> Self {
        let has_more = rows.len() as u64 == window_size(per_page);
        if has_more {
            rows.pop();
        }

        Self {
            users: rows,
            current_page,
            per_page,
            next_page: has_more.then(|| current_page.checked_add(1)).flatten(),
            previous_page: (current_page > FIRST_PAGE).then(|| current_page - 1),
        }
    }

    /// Check if the page contains no users
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
