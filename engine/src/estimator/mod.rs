// Day-of-year cost lookup and the estimator that answers point queries against it.
pub mod estimate;
pub mod lookup;

pub use estimate::{estimate, nearest_in_month};
pub use lookup::LookupTable;
