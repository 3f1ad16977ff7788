pub mod authz;
pub mod factory;
pub mod repositories;
pub mod tabular;
