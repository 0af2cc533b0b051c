pub mod logging;
pub mod mcp;
