// src/planning/mod.rs

pub mod aggregate;
pub mod config;
pub mod engine;
