pub(crate) mod aggregator;
pub(crate) mod datasource;
mod staking_yields;

pub use aggregator::Aggregator;
pub use staking_yields::StakingYieldsApi;
