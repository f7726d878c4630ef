pub mod config;
pub mod error;
pub mod form;
pub mod persistence;
pub mod schema;
pub mod services;
pub mod session;
pub mod submit;
