pub mod config;
pub mod constants;
pub mod error;
pub mod params;
pub mod query;
pub mod timestamps;
