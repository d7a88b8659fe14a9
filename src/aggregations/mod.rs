//! Aggregation stage: pure transforms from filtered records to chart tables.
//!
//! Every function here is total: an empty input yields an empty table.

pub mod hourly;
pub mod monthly;
pub mod seasonal;
pub mod trend;
pub mod types;
pub mod utility;

pub use hourly::{DEFAULT_TOP_N, hourly_totals, ranked_hours};
pub use monthly::monthly_maxima;
pub use seasonal::{season_shares, seasonal_totals};
pub use trend::daily_trend;
