pub mod charts;
pub mod dashboard;
pub mod dataset;

pub use crate::domain::model::{LaunchRecord, PayloadRange, SiteSelection, ALL_SITES};
pub use crate::domain::ports::{ConfigProvider, DataSource};
pub use crate::utils::error::Result;
pub use dataset::LaunchTable;
