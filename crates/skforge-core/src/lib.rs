pub mod config;
pub mod gn;
pub mod layout;
pub mod platform;
pub mod request;
pub mod tool;

pub use layout::BuildLayout;
pub use platform::{target_cpu, Arch, Config, Platform, PlatformError};
pub use request::{BuildRequest, RequestError};
pub use tool::{ProcessRunner, ToolCommand, ToolError, ToolRunner};
