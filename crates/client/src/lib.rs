pub mod api;
pub mod auth;
pub mod config;
pub mod error_convert;

// Sidebar table and route constants
pub mod nav;
pub mod search;
