pub mod client;
pub mod config;
pub mod error;
pub mod mcp_server;
pub mod pagination;
pub mod service;
pub mod tools;

pub use client::{AwsCliClient, QuickSightApi};
pub use config::{Config, ConfigOverrides};
pub use error::McpError;
pub use mcp_server::QuickSightMcpServer;
pub use pagination::{drain, list_page, page, Page, PageChunk, PageRequest, PaginationInfo};
pub use service::{Failure, QuickSightService};

/// Maximum size for tool response output
pub const MAX_TOOL_RESPONSE_SIZE: usize = 100_000;
