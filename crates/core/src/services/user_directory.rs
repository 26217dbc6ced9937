use serde::{Deserialize, Serialize};

use crate::models::user::User;

/// One page of a client-side paginated list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// 1-based page number, clamped into range
    pub page: usize,

    /// Always at least 1, even for an empty list
    pub total_pages: usize,

    pub total_items: usize,

    /// 1-based index of the first item shown; 0 when the page is empty
    pub first_index: usize,

    /// 1-based index of the last item shown; 0 when the page is empty
    pub last_index: usize,
}

impl<T> Page<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Search and pagination over the admin user list. The backend returns
/// the whole list; filtering happens here.
pub struct UserDirectory;

impl UserDirectory {
    pub fn new() -> Self {
        Self
    }

    /// Users whose username or email contains `query`, case-insensitively.
    /// A blank query matches everyone. Input order is kept.
    pub fn filter<'a>(&self, users: &'a [User], query: &str) -> Vec<&'a User> {
        let q = query.trim().to_lowercase();
        if q.is_empty() {
            return users.iter().collect();
        }
        users
            .iter()
            .filter(|u| u.username.to_lowercase().contains(&q) || u.email.to_lowercase().contains(&q))
            .collect()
    }

    /// Slice out page `page` (1-based) of `items`.
    ///
    /// Out-of-range pages are clamped to the nearest valid page, and a page
    /// size of zero is treated as one.
    pub fn paginate<T: Clone>(&self, items: &[T], page: usize, page_size: usize) -> Page<T> {
        let page_size = page_size.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(page_size).max(1);
        let page = page.clamp(1, total_pages);

        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_items);
        let page_items: Vec<T> = if start < end {
            items[start..end].to_vec()
        } else {
            Vec::new()
        };

        let (first_index, last_index) = if page_items.is_empty() {
            (0, 0)
        } else {
            (start + 1, end)
        };

        Page {
            items: page_items,
            page,
            total_pages,
            total_items,
            first_index,
            last_index,
        }
    }

    /// Filter then paginate in one step.
    pub fn search(&self, users: &[User], query: &str, page: usize, page_size: usize) -> Page<User> {
        let matches: Vec<User> = self.filter(users, query).into_iter().cloned().collect();
        self.paginate(&matches, page, page_size)
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}
