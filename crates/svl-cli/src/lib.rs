//! CLI library components for the shader variant list tool.

pub mod commands;
pub mod logging;
pub mod types;
