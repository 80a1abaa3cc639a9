// src/io/mod.rs

pub mod demand;
pub mod products;
pub mod reporting;
pub mod synthetic;
