//! Data models for the asset tracker

pub mod asset;
pub mod asset_history;
pub mod dashboard;
pub mod department;
pub mod device_model;
pub mod enums;
pub mod location;
pub mod maintenance;
pub mod master_data;
pub mod status_label;
pub mod supplier;
pub mod user;

use serde::Deserialize;
use utoipa::IntoParams;

// Re-export commonly used types
pub use asset::{Asset, AssetDetails};
pub use asset_history::{AssetHistory, AssetHistoryEntry};
pub use enums::{ActionType, CategoryKind, Role, StatusKind};
pub use status_label::StatusLabel;
pub use user::{LoginRequest, LoginResponse, User, UserClaims};

pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;

/// Pagination query parameters shared by every index endpoint
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number (default: 1)
    pub page: Option<i64>,
    /// Items per page (default: 10, max: 100)
    pub per_page: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_page_query_clamps() {
        let query = PageQuery { page: Some(0), per_page: Some(1000) };
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), MAX_PER_PAGE);

        let query = PageQuery { page: Some(3), per_page: Some(25) };
        assert_eq!(query.offset(), 50);
    }
}
