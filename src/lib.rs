// src/lib.rs

//! Billboard API client library

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;
