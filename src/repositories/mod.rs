//! # Repository Layer
//!
//! Repository implementations that encapsulate SeaORM operations for the
//! admin tables. Every list call takes [`ListOptions`] so handlers control
//! ordering and page size the same way for every table.

use sea_orm::{ColumnTrait, EntityTrait, Order, QueryOrder, QuerySelect, Select};

pub mod api_endpoint;
pub mod api_key;
pub mod audit_log;
pub mod bi;
pub mod data_export;
pub mod market;
pub mod organization;
pub mod preference;
pub mod team;
pub mod webhook;

pub use api_endpoint::ApiEndpointRepository;
pub use api_key::ApiKeyRepository;
pub use audit_log::AuditLogRepository;
pub use bi::BiRepository;
pub use data_export::DataExportRepository;
pub use market::MarketIntelligenceRepository;
pub use organization::OrganizationRepository;
pub use preference::PreferenceRepository;
pub use team::TeamRepository;
pub use webhook::WebhookRepository;

/// Sort direction on the repository's natural ordering column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Ordering and page size for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListOptions {
    pub order: SortOrder,
    pub limit: Option<u64>,
}

impl ListOptions {
    pub fn newest_first() -> Self {
        Self {
            order: SortOrder::Descending,
            limit: None,
        }
    }

    pub fn ascending() -> Self {
        Self {
            order: SortOrder::Ascending,
            limit: None,
        }
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Applies ordering on `column` (ties broken by `tiebreak`) and the limit.
    pub(crate) fn apply<E, C>(self, select: Select<E>, column: C, tiebreak: C) -> Select<E>
    where
        E: EntityTrait,
        C: ColumnTrait,
    {
        let order = match self.order {
            SortOrder::Ascending => Order::Asc,
            SortOrder::Descending => Order::Desc,
        };
        let select = select
            .order_by(column, order.clone())
            .order_by(tiebreak, order);
        match self.limit {
            Some(limit) => select.limit(limit),
            None => select,
        }
    }
}
