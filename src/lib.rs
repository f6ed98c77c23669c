pub mod handlers;
pub mod listing;
pub mod payment;
pub mod pricing;
pub mod query;
pub mod scheduler;
pub mod store;
pub mod suggest;
