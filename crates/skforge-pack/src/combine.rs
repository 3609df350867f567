use std::path::PathBuf;

use skforge_core::layout::BuildLayout;
use skforge_core::platform::{Arch, Config, Platform};
use skforge_core::tool::{ToolCommand, ToolRunner};

use crate::PackError;

pub const COMBINED_LIBRARY: &str = "libSkia.a";

/// Combine the component archives at one destination into a single
/// aggregate static library. Only components that actually exist are fed to
/// the archiver; zero existing components is a warning no-op so partial
/// builds can be iterated on.
pub fn combine_libraries(
    runner: &dyn ToolRunner,
    layout: &BuildLayout,
    platform: Platform,
    config: Config,
    arch: Arch,
) -> Result<Option<PathBuf>, PackError> {
    println!("Combining libraries for {} {}...", platform, arch);
    let lib_dir = layout.lib_dir(platform, config, arch);
    let inputs = platform
        .descriptor()
        .libraries
        .iter()
        .map(|lib| lib_dir.join(lib))
        .filter(|path| path.exists())
        .collect::<Vec<_>>();
    if inputs.is_empty() {
        eprintln!(
            "warning: no libraries found to combine in {}",
            lib_dir.display()
        );
        return Ok(None);
    }

    let output = lib_dir.join(COMBINED_LIBRARY);
    let command = ToolCommand::new("libtool")
        .arg("-static")
        .arg("-o")
        .arg(output.display().to_string())
        .args(inputs.iter().map(|path| path.display().to_string()));
    runner.run(&command)?;
    println!("Created combined library: {}", output.display());
    Ok(Some(output))
}
