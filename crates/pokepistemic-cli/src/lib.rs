pub mod config;
pub mod logging;
pub mod normalize;
pub mod render;
pub mod repl;
pub mod telemetry;
