pub mod api;
pub mod config;
pub mod error;
pub mod grouping;
pub mod models;
pub mod timeline;
pub mod timeline_stats;
