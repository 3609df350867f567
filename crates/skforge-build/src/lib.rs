pub mod bootstrap;
pub mod driver;
pub mod relocate;

pub use bootstrap::{ensure_depot_tools, sync_deps, Toolchain};
pub use driver::MatrixDriver;
pub use relocate::relocate_libraries;

use skforge_core::platform::PlatformError;
use skforge_core::tool::ToolError;

#[derive(Debug)]
pub enum BuildError {
    Bootstrap(ToolError),
    Sync(ToolError),
    Generate(ToolError),
    Build(ToolError),
    Platform(PlatformError),
    Io { path: String, source: std::io::Error },
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildError::Bootstrap(error) => write!(f, "depot_tools bootstrap failed: {}", error),
            BuildError::Sync(error) => write!(f, "dependency sync failed: {}", error),
            BuildError::Generate(error) => write!(f, "build generation failed: {}", error),
            BuildError::Build(error) => write!(f, "native build failed: {}", error),
            BuildError::Platform(error) => error.fmt(f),
            BuildError::Io { path, source } => write!(f, "i/o error at '{}': {}", path, source),
        }
    }
}

impl std::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BuildError::Bootstrap(error)
            | BuildError::Sync(error)
            | BuildError::Generate(error)
            | BuildError::Build(error) => Some(error),
            BuildError::Platform(error) => Some(error),
            BuildError::Io { source, .. } => Some(source),
        }
    }
}

impl From<PlatformError> for BuildError {
    fn from(error: PlatformError) -> Self {
        BuildError::Platform(error)
    }
}
