pub mod change_set;
pub mod columns;
pub mod identity_matcher;
pub mod money;
pub mod normalize;
pub mod period_lifecycle;
pub mod reconciliation;
pub mod rollup;
pub mod time_aggregator;
