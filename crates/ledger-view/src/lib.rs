//! Derived state over the asset working set: search, KPI totals and
//! pagination, plus a memo keyed on everything they depend on.

pub mod pagination;
pub mod search;
pub mod totals;
pub mod view;

pub use pagination::{PageInputError, PageSize, Paginator, total_pages};
pub use search::{filter_assets, filter_indices};
pub use totals::{KpiTotals, aggregate};
pub use view::{CacheStats, DerivedView, FilteredView, ViewCache, ViewKey, ViewState};
