pub mod api;
pub mod config;
pub mod docs;
pub mod model;
pub mod routes;
pub mod services;
pub mod source;
pub mod utils;
