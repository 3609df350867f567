use std::fmt;

use crate::platform::{Arch, Config, Platform, PlatformError};

/// A validated build request. No subprocess runs before one of these exists.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildRequest {
    pub platform: Platform,
    pub config: Config,
    pub archs: Vec<Arch>,
    /// Composite mode: build mac and ios, then assemble the Swift package.
    pub package_mode: bool,
}

impl BuildRequest {
    /// Resolve CLI tokens into a request, substituting per-platform defaults
    /// and rejecting any architecture outside the platform's valid set.
    pub fn resolve(
        platform: &str,
        config: Option<&str>,
        archs: Option<&str>,
    ) -> Result<Self, RequestError> {
        if platform == "spm" {
            return Ok(Self::swift_package());
        }
        let platform: Platform = platform.parse()?;
        let config = match config {
            Some(value) => value.parse()?,
            None => Config::Release,
        };
        let descriptor = platform.descriptor();
        let archs = match archs {
            Some(csv) => csv
                .split(',')
                .map(|token| token.trim().parse::<Arch>())
                .collect::<Result<Vec<_>, _>>()?,
            None => descriptor.default_archs.to_vec(),
        };
        for arch in &archs {
            if !descriptor.valid_archs.contains(arch) {
                return Err(RequestError::InvalidArch {
                    platform,
                    arch: *arch,
                });
            }
        }
        Ok(Self {
            platform,
            config,
            archs,
            package_mode: false,
        })
    }

    /// The composite distribution mode: mac release universal, with ios
    /// built and packaged later in the same run.
    pub fn swift_package() -> Self {
        Self {
            platform: Platform::Mac,
            config: Config::Release,
            archs: vec![Arch::Universal],
            package_mode: true,
        }
    }

    /// Concrete architectures to generate and build. `universal` expands to
    /// both mac architectures; it never reaches the build tools itself.
    pub fn build_archs(&self) -> Vec<Arch> {
        if self.archs.contains(&Arch::Universal) {
            vec![Arch::X86_64, Arch::Arm64]
        } else {
            self.archs.clone()
        }
    }

    /// Whether this run ends with a fat-binary merge at the configuration
    /// level. Only mac defines a fat-binary mechanism.
    pub fn wants_universal(&self) -> bool {
        if self.platform != Platform::Mac {
            return false;
        }
        let archs = self.build_archs();
        archs.contains(&Arch::X86_64) && archs.contains(&Arch::Arm64)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RequestError {
    Platform(PlatformError),
    InvalidArch { platform: Platform, arch: Arch },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::Platform(error) => error.fmt(f),
            RequestError::InvalidArch { platform, arch } => {
                write!(f, "invalid architecture for {}: {}", platform, arch)
            }
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Platform(error) => Some(error),
            RequestError::InvalidArch { .. } => None,
        }
    }
}

impl From<PlatformError> for RequestError {
    fn from(error: PlatformError) -> Self {
        RequestError::Platform(error)
    }
}
