pub mod combine;
pub mod headers;
pub mod swift_package;
pub mod universal;
pub mod xcframework;

pub use combine::{combine_libraries, COMBINED_LIBRARY};
pub use headers::{package_headers, HeaderReport};
pub use swift_package::create_swift_package;
pub use universal::create_universal_binaries;
pub use xcframework::create_xcframework;

use skforge_core::tool::ToolError;

#[derive(Debug)]
pub enum PackError {
    Io { path: String, source: std::io::Error },
    Tool(ToolError),
}

impl std::fmt::Display for PackError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackError::Io { path, source } => write!(f, "pack i/o error at '{}': {}", path, source),
            PackError::Tool(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for PackError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PackError::Io { source, .. } => Some(source),
            PackError::Tool(error) => Some(error),
        }
    }
}

impl From<ToolError> for PackError {
    fn from(error: ToolError) -> Self {
        PackError::Tool(error)
    }
}

fn io_error(path: &std::path::Path) -> impl FnOnce(std::io::Error) -> PackError + '_ {
    move |source| PackError::Io {
        path: path.display().to_string(),
        source,
    }
}
