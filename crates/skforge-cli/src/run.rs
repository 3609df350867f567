use std::fmt;

use skforge_build::{ensure_depot_tools, sync_deps, BuildError, MatrixDriver, Toolchain};
use skforge_core::config::ConfigError;
use skforge_core::layout::BuildLayout;
use skforge_core::platform::{Arch, Config, Platform};
use skforge_core::request::{BuildRequest, RequestError};
use skforge_core::tool::ToolRunner;
use skforge_pack::{
    combine_libraries, create_swift_package, create_universal_binaries, create_xcframework,
    package_headers, PackError,
};

/// Run one resolved build request end to end. The request is already
/// validated, so everything from here on may spawn external tools.
pub fn execute(
    request: &BuildRequest,
    layout: &BuildLayout,
    runner: &dyn ToolRunner,
) -> Result<(), RunError> {
    let toolchain = ensure_depot_tools(runner, layout)?;
    sync_deps(runner, &toolchain, layout)?;

    if request.package_mode {
        build_swift_package(runner, layout, &toolchain)?;
        println!("Swift package build completed");
        return Ok(());
    }

    let archs = request.build_archs();
    let driver = MatrixDriver::new(runner, layout, &toolchain);
    driver.build(request.platform, request.config, &archs)?;

    if request.wants_universal() {
        create_universal_binaries(runner, layout, request.config)?;
        combine_libraries(
            runner,
            layout,
            Platform::Mac,
            request.config,
            Arch::Universal,
        )?;
    } else if request.platform != Platform::Win {
        for arch in &archs {
            combine_libraries(runner, layout, request.platform, request.config, *arch)?;
        }
    }

    package_headers(layout.skia_src_dir(), &layout.include_dir())?;

    println!(
        "Build completed successfully for {} {} with architectures: {}",
        request.platform,
        request.config,
        archs
            .iter()
            .map(|arch| arch.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}

/// The composite distribution flow: mac universal and both ios
/// architectures in one run, then headers, bundle, and package manifest.
fn build_swift_package(
    runner: &dyn ToolRunner,
    layout: &BuildLayout,
    toolchain: &Toolchain,
) -> Result<(), RunError> {
    let driver = MatrixDriver::new(runner, layout, toolchain);

    let mac_archs = [Arch::X86_64, Arch::Arm64];
    driver.build(Platform::Mac, Config::Release, &mac_archs)?;
    create_universal_binaries(runner, layout, Config::Release)?;
    combine_libraries(runner, layout, Platform::Mac, Config::Release, Arch::Universal)?;

    let ios_archs = [Arch::X86_64, Arch::Arm64];
    driver.build(Platform::Ios, Config::Release, &ios_archs)?;
    for arch in ios_archs {
        combine_libraries(runner, layout, Platform::Ios, Config::Release, arch)?;
    }

    package_headers(layout.skia_src_dir(), &layout.include_dir())?;
    create_xcframework(runner, layout)?;
    create_swift_package(layout)?;
    Ok(())
}

#[derive(Debug)]
pub enum RunError {
    Request(RequestError),
    Config(ConfigError),
    Build(BuildError),
    Pack(PackError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::Request(error) => error.fmt(f),
            RunError::Config(error) => error.fmt(f),
            RunError::Build(error) => error.fmt(f),
            RunError::Pack(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Request(error) => Some(error),
            RunError::Config(error) => Some(error),
            RunError::Build(error) => Some(error),
            RunError::Pack(error) => Some(error),
        }
    }
}

impl From<RequestError> for RunError {
    fn from(error: RequestError) -> Self {
        RunError::Request(error)
    }
}

impl From<ConfigError> for RunError {
    fn from(error: ConfigError) -> Self {
        RunError::Config(error)
    }
}

impl From<BuildError> for RunError {
    fn from(error: BuildError) -> Self {
        RunError::Build(error)
    }
}

impl From<PackError> for RunError {
    fn from(error: PackError) -> Self {
        RunError::Pack(error)
    }
}
