//! Core configuration for the collision system

pub mod config;

pub use config::CollisionConfig;
