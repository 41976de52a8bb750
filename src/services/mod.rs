// src/services/mod.rs
pub mod extract;
pub mod relay;
