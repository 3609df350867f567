use std::fmt;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Platform {
    Mac,
    Ios,
    Win,
}

impl Platform {
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Mac => "mac",
            Platform::Ios => "ios",
            Platform::Win => "win",
        }
    }

    pub fn descriptor(self) -> &'static PlatformDescriptor {
        registry()
            .iter()
            .find(|entry| entry.platform == self)
            .expect("platform missing from registry")
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "mac" => Ok(Platform::Mac),
            "ios" => Ok(Platform::Ios),
            "win" => Ok(Platform::Win),
            other => Err(PlatformError::UnknownPlatform(other.to_string())),
        }
    }
}

/// Build configuration. `as_str` yields the capitalized form used for
/// destination directory names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Config {
    Debug,
    Release,
}

impl Config {
    pub fn as_str(self) -> &'static str {
        match self {
            Config::Debug => "Debug",
            Config::Release => "Release",
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Config {
    type Err = PlatformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "debug" | "Debug" => Ok(Config::Debug),
            "release" | "Release" => Ok(Config::Release),
            other => Err(PlatformError::UnknownConfig(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arch {
    X86_64,
    Arm64,
    X64,
    Win32,
    Universal,
}

impl Arch {
    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Arm64 => "arm64",
            Arch::X64 => "x64",
            Arch::Win32 => "Win32",
            Arch::Universal => "universal",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Arch {
    type Err = PlatformError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "x86_64" => Ok(Arch::X86_64),
            "arm64" => Ok(Arch::Arm64),
            "x64" => Ok(Arch::X64),
            "Win32" => Ok(Arch::Win32),
            "universal" => Ok(Arch::Universal),
            other => Err(PlatformError::UnknownArch(other.to_string())),
        }
    }
}

pub struct PlatformDescriptor {
    pub platform: Platform,
    pub valid_archs: &'static [Arch],
    pub default_archs: &'static [Arch],
    /// Component static libraries produced by one generation+build cycle.
    pub libraries: &'static [&'static str],
}

const MAC_LIBS: &[&str] = &[
    "libskia.a",
    "libskottie.a",
    "libskshaper.a",
    "libsksg.a",
    "libskparagraph.a",
    "libskunicode_icu.a",
    "libskunicode_core.a",
    "libsvg.a",
];

const IOS_LIBS: &[&str] = &[
    "libskia.a",
    "libskottie.a",
    "libsksg.a",
    "libskshaper.a",
    "libskparagraph.a",
    "libskunicode_core.a",
    "libskunicode_icu.a",
    "libsvg.a",
];

const WIN_LIBS: &[&str] = &[
    "skia.lib",
    "skottie.lib",
    "sksg.lib",
    "skshaper.lib",
    "skparagraph.lib",
    "skunicode_icu.lib",
    "skunicode_core.lib",
    "svg.lib",
];

static PLATFORM_REGISTRY: &[PlatformDescriptor] = &[
    PlatformDescriptor {
        platform: Platform::Mac,
        valid_archs: &[Arch::X86_64, Arch::Arm64, Arch::Universal],
        default_archs: &[Arch::Universal],
        libraries: MAC_LIBS,
    },
    PlatformDescriptor {
        platform: Platform::Ios,
        valid_archs: &[Arch::X86_64, Arch::Arm64],
        default_archs: &[Arch::Arm64],
        libraries: IOS_LIBS,
    },
    PlatformDescriptor {
        platform: Platform::Win,
        valid_archs: &[Arch::X64, Arch::Win32],
        default_archs: &[Arch::X64],
        libraries: WIN_LIBS,
    },
];

pub fn registry() -> &'static [PlatformDescriptor] {
    PLATFORM_REGISTRY
}

static TARGET_CPUS: &[(Platform, Arch, &str)] = &[
    (Platform::Mac, Arch::X86_64, "x86_64"),
    (Platform::Mac, Arch::Arm64, "arm64"),
    (Platform::Ios, Arch::X86_64, "x64"),
    (Platform::Ios, Arch::Arm64, "arm64"),
    (Platform::Win, Arch::X64, "x64"),
    (Platform::Win, Arch::Win32, "x86"),
];

/// GN `target_cpu` name for a concrete (platform, architecture) pair. Total
/// over the table above; pseudo-architectures such as `universal` have no
/// target CPU and must be expanded before generation.
pub fn target_cpu(platform: Platform, arch: Arch) -> Result<&'static str, PlatformError> {
    TARGET_CPUS
        .iter()
        .find(|(p, a, _)| *p == platform && *a == arch)
        .map(|(_, _, cpu)| *cpu)
        .ok_or(PlatformError::UnmappedTargetCpu { platform, arch })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PlatformError {
    UnknownPlatform(String),
    UnknownConfig(String),
    UnknownArch(String),
    UnmappedTargetCpu { platform: Platform, arch: Arch },
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::UnknownPlatform(value) => {
                write!(f, "unknown platform '{}'", value)
            }
            PlatformError::UnknownConfig(value) => {
                write!(f, "unknown configuration '{}'", value)
            }
            PlatformError::UnknownArch(value) => {
                write!(f, "unknown architecture '{}'", value)
            }
            PlatformError::UnmappedTargetCpu { platform, arch } => {
                write!(f, "no target_cpu mapping for {} {}", platform, arch)
            }
        }
    }
}

impl std::error::Error for PlatformError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_round_trips() {
        for platform in [Platform::Mac, Platform::Ios, Platform::Win] {
            let decoded: Platform = platform.as_str().parse().expect("should parse");
            assert_eq!(decoded, platform);
        }
    }

    #[test]
    fn unknown_platform_rejected() {
        let result: Result<Platform, _> = "linux".parse();
        assert!(matches!(result, Err(PlatformError::UnknownPlatform(_))));
    }

    #[test]
    fn every_platform_declares_eight_libraries() {
        for entry in registry() {
            assert_eq!(entry.libraries.len(), 8, "{}", entry.platform);
        }
    }

    #[test]
    fn default_archs_are_valid() {
        for entry in registry() {
            for arch in entry.default_archs {
                assert!(entry.valid_archs.contains(arch), "{}", entry.platform);
            }
        }
    }

    #[test]
    fn target_cpu_maps_win32_to_x86() {
        assert_eq!(target_cpu(Platform::Win, Arch::Win32), Ok("x86"));
    }

    #[test]
    fn target_cpu_maps_ios_x86_64_to_x64() {
        assert_eq!(target_cpu(Platform::Ios, Arch::X86_64), Ok("x64"));
    }

    #[test]
    fn target_cpu_rejects_unmapped_pair() {
        let result = target_cpu(Platform::Mac, Arch::Universal);
        assert!(matches!(
            result,
            Err(PlatformError::UnmappedTargetCpu { .. })
        ));
    }
}
