mod aggregation;

pub use aggregation::{aggregate, aggregate_bands, aggregate_by, grand_totals};
