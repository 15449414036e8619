//! Jyotish - Vedic Astrology MCP Server
//!
//! A Model Context Protocol server computing Vedic birth charts (sidereal
//! positions, divisional charts, panchanga, dashas, ashtakavarga, shadbala)
//! with the Swiss Ephemeris library.

pub mod chart_cache;
pub mod config;
pub mod ephemeris;
pub mod error;
pub mod models;
pub mod server;
pub mod vedic;

pub use server::JyotishServer;
