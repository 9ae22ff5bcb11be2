//! Lumenkit - emission strength and room lighting calculator
//!
//! Adapter around `lumen-core`: loads configuration and scene documents,
//! turns scene objects into plain meshes and points, and writes results back
//! into material graphs. This library exposes modules for integration testing.

pub mod assets;
pub mod error;
pub mod models;
pub mod services;
