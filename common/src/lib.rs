pub mod api;
pub mod display;
pub mod listing;
pub mod location;
pub mod marketplace;
pub mod notify;
pub mod query;
pub mod repository;
pub mod role;
pub mod seed;
pub mod store;
