pub mod analyzer;
pub mod cache;
pub mod config;
pub mod data_storage;
pub mod export;
pub mod fleet;
pub mod formatter;
pub mod messages;
pub mod policy;
pub mod pool;
pub mod stats;
pub mod view;
