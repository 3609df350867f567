use skforge_core::gn;
use skforge_core::layout::BuildLayout;
use skforge_core::platform::{Arch, Config, Platform};
use skforge_core::tool::{ToolCommand, ToolRunner};

use crate::bootstrap::Toolchain;
use crate::relocate::relocate_libraries;
use crate::BuildError;

/// Drives generation, native build, and relocation for each requested
/// architecture in order. Strictly sequential; the first failure aborts the
/// whole run so a missing architecture can never slip into a later
/// universal-binary merge.
pub struct MatrixDriver<'a> {
    runner: &'a dyn ToolRunner,
    layout: &'a BuildLayout,
    toolchain: &'a Toolchain,
}

impl<'a> MatrixDriver<'a> {
    pub fn new(runner: &'a dyn ToolRunner, layout: &'a BuildLayout, toolchain: &'a Toolchain) -> Self {
        Self {
            runner,
            layout,
            toolchain,
        }
    }

    pub fn build(
        &self,
        platform: Platform,
        config: Config,
        archs: &[Arch],
    ) -> Result<(), BuildError> {
        for arch in archs {
            self.generate(platform, config, *arch)?;
            self.build_libraries(platform, config, *arch)?;
            relocate_libraries(self.layout, platform, config, *arch)?;
            println!("Built {} {} {}", platform, config, arch);
        }
        Ok(())
    }

    /// `gn gen` into a fresh architecture-addressed working directory.
    fn generate(&self, platform: Platform, config: Config, arch: Arch) -> Result<(), BuildError> {
        let work_dir = self.layout.work_dir(platform, config, arch);
        let args = gn::compose(platform, config, arch)?;
        let command = ToolCommand::new("./bin/gn")
            .arg("gen")
            .arg(work_dir.display().to_string())
            .arg(format!("--args={}", args.render()))
            .current_dir(self.layout.skia_src_dir())
            .prepend_path(self.toolchain.depot_tools());
        self.runner.run(&command).map_err(BuildError::Generate)
    }

    /// `ninja` against the working directory, requesting exactly the
    /// platform's component libraries rather than a full build.
    fn build_libraries(
        &self,
        platform: Platform,
        config: Config,
        arch: Arch,
    ) -> Result<(), BuildError> {
        let work_dir = self.layout.work_dir(platform, config, arch);
        let command = ToolCommand::new("ninja")
            .arg("-C")
            .arg(work_dir.display().to_string())
            .args(ninja_targets(platform))
            .prepend_path(self.toolchain.depot_tools());
        self.runner.run(&command).map_err(BuildError::Build)
    }
}

/// Named ninja targets for one platform. Ninja expects win targets without
/// the `.lib` extension.
pub fn ninja_targets(platform: Platform) -> Vec<String> {
    platform
        .descriptor()
        .libraries
        .iter()
        .copied()
        .map(|lib| lib.strip_suffix(".lib").unwrap_or(lib).to_string())
        .collect()
}
