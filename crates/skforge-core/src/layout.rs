use std::path::{Path, PathBuf};

use crate::platform::{Arch, Config, Platform};

pub const DEPOT_TOOLS_URL: &str =
    "https://chromium.googlesource.com/chromium/tools/depot_tools.git";

/// Skia source subdirectories whose headers are packaged for consumers.
pub const PACKAGE_DIRS: &[&str] = &[
    "include",
    "modules/skottie",
    "modules/skparagraph",
    "modules/skshaper",
    "modules/skresources",
    "modules/skunicode",
    "modules/skcms",
    "modules/svg",
    "src/core",
    "src/base",
    "src/utils",
    "src/xml",
    "third_party/externals/icu/source/common/unicode",
];

/// Directory segments never packaged; the header walk prunes these before
/// descending.
pub const EXCLUDED_SEGMENTS: &[&str] = &["android"];

/// All paths one orchestrator run reads and writes, rooted at a single build
/// area. Working directories are per-(platform, config, arch) and never
/// shared between architectures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildLayout {
    base: PathBuf,
    skia_src: PathBuf,
}

impl BuildLayout {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        let skia_src = base.join("src").join("skia");
        Self { base, skia_src }
    }

    pub fn with_skia_src(mut self, skia_src: impl Into<PathBuf>) -> Self {
        self.skia_src = skia_src.into();
        self
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn skia_src_dir(&self) -> &Path {
        &self.skia_src
    }

    pub fn depot_tools_dir(&self) -> PathBuf {
        self.base.join("tmp").join("depot_tools")
    }

    pub fn work_dir(&self, platform: Platform, config: Config, arch: Arch) -> PathBuf {
        self.base
            .join("tmp")
            .join("skia")
            .join(format!("{}_{}_{}", platform, config, arch))
    }

    /// Destination directory for built libraries. The mac tree keeps the
    /// configuration level itself for universal output and one subdirectory
    /// per concrete architecture; the win tree nests configuration under
    /// architecture.
    pub fn lib_dir(&self, platform: Platform, config: Config, arch: Arch) -> PathBuf {
        match platform {
            Platform::Mac => {
                let config_dir = self.base.join("mac").join("lib").join(config.as_str());
                if arch == Arch::Universal {
                    config_dir
                } else {
                    config_dir.join(arch.as_str())
                }
            }
            Platform::Ios => self
                .base
                .join("ios")
                .join("lib")
                .join(config.as_str())
                .join(arch.as_str()),
            Platform::Win => self
                .base
                .join("win")
                .join(arch.as_str())
                .join(config.as_str()),
        }
    }

    pub fn include_dir(&self) -> PathBuf {
        self.base.join("include")
    }

    pub fn xcframework_dir(&self) -> PathBuf {
        self.base.join("xcframework")
    }

    pub fn spm_dir(&self) -> PathBuf {
        self.base.join("spm")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> BuildLayout {
        BuildLayout::new("Build")
    }

    #[test]
    fn work_dirs_are_distinct_per_arch() {
        let x86 = layout().work_dir(Platform::Mac, Config::Release, Arch::X86_64);
        let arm = layout().work_dir(Platform::Mac, Config::Release, Arch::Arm64);
        assert_ne!(x86, arm);
        assert!(x86.ends_with("tmp/skia/mac_Release_x86_64"));
    }

    #[test]
    fn mac_universal_omits_arch_segment() {
        let universal = layout().lib_dir(Platform::Mac, Config::Release, Arch::Universal);
        assert!(universal.ends_with("mac/lib/Release"));
        let arm = layout().lib_dir(Platform::Mac, Config::Release, Arch::Arm64);
        assert!(arm.ends_with("mac/lib/Release/arm64"));
    }

    #[test]
    fn ios_nests_arch_under_config() {
        let dir = layout().lib_dir(Platform::Ios, Config::Debug, Arch::Arm64);
        assert!(dir.ends_with("ios/lib/Debug/arm64"));
    }

    #[test]
    fn win_nests_config_under_arch() {
        let dir = layout().lib_dir(Platform::Win, Config::Release, Arch::Win32);
        assert!(dir.ends_with("win/Win32/Release"));
    }

    #[test]
    fn skia_src_defaults_under_base_and_can_be_overridden() {
        assert!(layout().skia_src_dir().ends_with("Build/src/skia"));
        let custom = layout().with_skia_src("/opt/skia");
        assert_eq!(custom.skia_src_dir(), Path::new("/opt/skia"));
    }
}
