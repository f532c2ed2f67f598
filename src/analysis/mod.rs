mod bucket;
mod filter;
pub mod loader;
mod report;

pub use bucket::{bucketize, BandAssignment, BandBoundaries};
pub use filter::{filter, filter_range};
pub use loader::{load_dataset, load_dataset_from_reader, DataSource};
pub use report::{BandBreakdown, DashboardReport, USER_TYPE_METRICS};
