pub mod config;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod process;
pub mod sink;
