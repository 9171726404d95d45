pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod event;
pub mod model;
pub mod paths;
pub mod store;
pub mod view;
