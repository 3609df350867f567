use std::fs;

use skforge_core::layout::BuildLayout;
use skforge_core::platform::{Arch, Config, Platform};
use skforge_core::tool::{ToolCommand, ToolRunner};

use crate::{io_error, PackError};

const UNIVERSAL_SOURCES: [Arch; 2] = [Arch::X86_64, Arch::Arm64];

/// Merge the per-architecture mac libraries into fat binaries at the
/// configuration-level destination. Each merge always names exactly two
/// architecture inputs; a missing input surfaces as the lipo failure rather
/// than silently producing a single-architecture file labeled universal.
/// Idempotent: re-running overwrites the previous merged output.
pub fn create_universal_binaries(
    runner: &dyn ToolRunner,
    layout: &BuildLayout,
    config: Config,
) -> Result<(), PackError> {
    println!("Creating universal libraries...");
    let dest_dir = layout.lib_dir(Platform::Mac, config, Arch::Universal);
    fs::create_dir_all(&dest_dir).map_err(io_error(&dest_dir))?;

    for lib in Platform::Mac.descriptor().libraries {
        let inputs = UNIVERSAL_SOURCES
            .iter()
            .map(|arch| {
                layout
                    .lib_dir(Platform::Mac, config, *arch)
                    .join(lib)
                    .display()
                    .to_string()
            })
            .collect::<Vec<_>>();
        let output = dest_dir.join(lib);
        let command = ToolCommand::new("lipo")
            .arg("-create")
            .args(inputs)
            .arg("-output")
            .arg(output.display().to_string());
        runner.run(&command)?;
        println!("Created universal {}", lib);
    }
    Ok(())
}
