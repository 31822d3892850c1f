//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

use common::types::Page;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Select};
use serde::Deserialize;

/// Pagination parameters
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    #[serde(default = "first_page")]
    pub page: u32,
    /// items per page
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn first_page() -> u32 { 1 }
fn default_per_page() -> u32 { 20 }

impl Pagination {
    /// Clamp to sane defaults and convert to `u64`
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as u64, per_page as u64)
    }

    /// A page with no rows, for scopes known to be empty.
    pub fn empty<T>(self) -> Page<T> {
        let (idx, per_page) = self.normalize();
        Page { items: Vec::new(), page: idx + 1, per_page, total: 0 }
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: first_page(), per_page: default_per_page() } }
}

/// Run `select` for one page and count the full result set.
pub async fn fetch_page<E>(db: &DatabaseConnection, select: Select<E>, opts: Pagination) -> Result<Page<E::Model>, DbErr>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'static,
{
    let (idx, per_page) = opts.normalize();
    let paginator = select.paginate(db, per_page);
    let total = paginator.num_items().await?;
    let items = paginator.fetch_page(idx).await?;
    Ok(Page { items, page: idx + 1, per_page, total })
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_to_defaults() {
        let (idx, per) = Pagination { page: 0, per_page: 0 }.normalize();
        assert_eq!(idx, 0);
        assert_eq!(per, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (idx, per) = Pagination { page: 5, per_page: 1000 }.normalize();
        assert_eq!(idx, 4);
        assert_eq!(per, 100);
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 20);
    }

    #[test]
    fn empty_page_reports_position() {
        let p = Pagination { page: 3, per_page: 10 }.empty::<u8>();
        assert_eq!(p.page, 3);
        assert_eq!(p.total, 0);
        assert!(p.items.is_empty());
    }

    #[test]
    fn query_string_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!((p.page, p.per_page), (1, 20));
    }
}
