// src/lib.rs
pub mod config;
pub mod errors;
pub mod platform;
pub mod evaluator;
pub mod models;
pub mod banner;
pub mod api;
