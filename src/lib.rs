pub mod catalog;
pub mod config;
pub mod error;
pub mod event_store;
pub mod handlers;
pub mod intent;
pub mod ledger;
pub mod query;
pub mod request;
pub mod store;
