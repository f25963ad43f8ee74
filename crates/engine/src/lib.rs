pub mod api;
pub mod backend;
pub mod config;
pub mod generation;
