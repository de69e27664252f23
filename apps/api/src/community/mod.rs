pub mod countries;
pub mod feed;
pub mod filter;
pub mod handlers;
pub mod models;
pub mod ranking;
pub mod store;
