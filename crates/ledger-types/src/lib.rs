pub mod asset;
pub mod error;
pub mod format;
pub mod month;
pub mod validation;

pub use asset::{AssetList, AssetRecord, MonthlyDepreciation};
pub use error::ErrorKind;
pub use format::{format_count, format_money, format_rate};
pub use month::{Month, MonthOutOfRange};
pub use validation::{ValidationIssue, ValidationReport};
