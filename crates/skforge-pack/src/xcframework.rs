use std::fs;
use std::path::PathBuf;

use skforge_core::layout::BuildLayout;
use skforge_core::platform::{Arch, Config, Platform};
use skforge_core::tool::{ToolCommand, ToolRunner};

use crate::combine::COMBINED_LIBRARY;
use crate::{io_error, PackError};

pub const XCFRAMEWORK_NAME: &str = "Skia.xcframework";

const IOS_SLICES: [Arch; 2] = [Arch::X86_64, Arch::Arm64];

/// Assemble the multi-platform bundle: one library slice per ios
/// architecture plus the mac universal library, each paired with the shared
/// header tree. Any previous bundle at the output path is removed first so
/// stale content never merges in.
pub fn create_xcframework(
    runner: &dyn ToolRunner,
    layout: &BuildLayout,
) -> Result<PathBuf, PackError> {
    println!("Creating Skia XCFramework...");
    let output_dir = layout.xcframework_dir();
    fs::create_dir_all(&output_dir).map_err(io_error(&output_dir))?;
    let output = output_dir.join(XCFRAMEWORK_NAME);
    if output.exists() {
        fs::remove_dir_all(&output).map_err(io_error(&output))?;
    }

    let headers = layout.include_dir();
    let mut command = ToolCommand::new("xcodebuild").arg("-create-xcframework");
    for arch in IOS_SLICES {
        let library = layout
            .lib_dir(Platform::Ios, Config::Release, arch)
            .join(COMBINED_LIBRARY);
        command = command
            .arg("-library")
            .arg(library.display().to_string())
            .arg("-headers")
            .arg(headers.display().to_string());
    }
    let mac_library = layout
        .lib_dir(Platform::Mac, Config::Release, Arch::Universal)
        .join(COMBINED_LIBRARY);
    command = command
        .arg("-library")
        .arg(mac_library.display().to_string())
        .arg("-headers")
        .arg(headers.display().to_string())
        .arg("-output")
        .arg(output.display().to_string());

    runner.run(&command)?;
    println!("Created Skia XCFramework at {}", output.display());
    Ok(output)
}
