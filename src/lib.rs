pub mod backend;
pub mod config;
pub mod doctor;
pub mod error;
pub mod health;
pub mod model;
pub mod routes;
pub mod server;
