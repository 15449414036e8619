//! MCP server exposing the chart tools

pub mod tools;

pub use tools::{BirthDetailsInput, DivisionalChartInput, JyotishServer};
