// src/strategy/mod.rs

pub mod forecast;
pub mod optimization;
pub mod risk;
pub mod traits;
