// src/model/mod.rs

pub mod product;
pub mod recommendation;
pub mod record;
