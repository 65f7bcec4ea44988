//! LED Sphere Model Generator Library
//!
//! This library computes the layout of addressable LEDs arranged in rings on a
//! sphere: 3D coordinates, balanced controller port assignment and grid
//! projections. It exports the result for xLights, MadMapper and Chromatik.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod models;
pub mod services;
