use std::fs;
use std::path::{Path, PathBuf};

use skforge_core::layout::BuildLayout;
use walkdir::WalkDir;

use crate::headers::package_headers;
use crate::xcframework::XCFRAMEWORK_NAME;
use crate::{io_error, PackError};

const PACKAGE_MANIFEST: &str = r#"// swift-tools-version:5.3
import PackageDescription

let package = Package(
    name: "Skia",
    products: [
        .library(
            name: "Skia",
            targets: ["Skia", "SkiaXCFramework"])
    ],
    targets: [
        .target(
            name: "Skia",
            dependencies: ["SkiaXCFramework"],
            path: "Sources",
            publicHeadersPath: "Skia"),
        .binaryTarget(
            name: "SkiaXCFramework",
            path: "Skia/Skia.xcframework"),
    ],
    cxxLanguageStandard: .cxx14
)
"#;

/// Lay out the Swift package referencing the xcframework: binary target,
/// header sources, placeholder source file, and the fixed package manifest.
/// Pure assembly; the manifest has no conditional content.
pub fn create_swift_package(layout: &BuildLayout) -> Result<PathBuf, PackError> {
    println!("Creating Swift package...");
    let package_dir = layout.spm_dir().join("Skia");
    let sources_dir = package_dir.join("Sources").join("Skia");
    let binary_dir = package_dir.join("Skia");
    fs::create_dir_all(&sources_dir).map_err(io_error(&sources_dir))?;
    fs::create_dir_all(&binary_dir).map_err(io_error(&binary_dir))?;

    let xcframework_src = layout.xcframework_dir().join(XCFRAMEWORK_NAME);
    let xcframework_dest = binary_dir.join(XCFRAMEWORK_NAME);
    if xcframework_src.exists() {
        if xcframework_dest.exists() {
            fs::remove_dir_all(&xcframework_dest).map_err(io_error(&xcframework_dest))?;
        }
        copy_dir(&xcframework_src, &xcframework_dest)?;
        println!("Copied XCFramework to {}", xcframework_dest.display());
    } else {
        eprintln!(
            "warning: XCFramework not found at {}",
            xcframework_src.display()
        );
    }

    package_headers(layout.skia_src_dir(), &sources_dir)?;

    let dummy = sources_dir.join("dummy.swift");
    fs::write(&dummy, "// This file is needed to make SPM happy\n").map_err(io_error(&dummy))?;
    let manifest = package_dir.join("Package.swift");
    fs::write(&manifest, PACKAGE_MANIFEST).map_err(io_error(&manifest))?;

    println!("Swift package created at {}", package_dir.display());
    Ok(package_dir)
}

fn copy_dir(src: &Path, dest: &Path) -> Result<(), PackError> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|error| PackError::Io {
            path: src.display().to_string(),
            source: error.into(),
        })?;
        let relative = entry.path().strip_prefix(src).map_err(|error| {
            PackError::Io {
                path: entry.path().display().to_string(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, error),
            }
        })?;
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(io_error(&target))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(io_error(parent))?;
            }
            fs::copy(entry.path(), &target).map_err(io_error(&target))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seed_layout() -> (TempDir, BuildLayout) {
        let dir = TempDir::new().expect("temp dir");
        let layout = BuildLayout::new(dir.path());
        let slice = layout
            .xcframework_dir()
            .join(XCFRAMEWORK_NAME)
            .join("macos-arm64_x86_64");
        fs::create_dir_all(&slice).expect("create slice");
        fs::write(slice.join("libSkia.a"), b"fat archive").expect("write slice");
        let header = layout.skia_src_dir().join("include").join("core");
        fs::create_dir_all(&header).expect("create headers");
        fs::write(header.join("SkCanvas.h"), "// canvas").expect("write header");
        (dir, layout)
    }

    #[test]
    fn assembles_manifest_binary_target_and_headers() {
        let (_dir, layout) = seed_layout();
        let package_dir = create_swift_package(&layout).expect("package");

        let manifest = fs::read_to_string(package_dir.join("Package.swift")).expect("manifest");
        assert!(manifest.contains("swift-tools-version:5.3"));
        assert!(manifest.contains(".binaryTarget"));
        assert!(manifest.contains("Skia/Skia.xcframework"));
        assert!(manifest.contains("cxxLanguageStandard: .cxx14"));

        assert!(package_dir
            .join("Skia")
            .join(XCFRAMEWORK_NAME)
            .join("macos-arm64_x86_64")
            .join("libSkia.a")
            .exists());
        assert!(package_dir
            .join("Sources/Skia/include/core/SkCanvas.h")
            .exists());
        assert!(package_dir.join("Sources/Skia/dummy.swift").exists());
    }

    #[test]
    fn missing_xcframework_is_a_warning_not_an_error() {
        let dir = TempDir::new().expect("temp dir");
        let layout = BuildLayout::new(dir.path());
        let package_dir = create_swift_package(&layout).expect("package");
        assert!(package_dir.join("Package.swift").exists());
        assert!(!package_dir.join("Skia").join(XCFRAMEWORK_NAME).exists());
    }

    #[test]
    fn rerun_replaces_the_copied_bundle() {
        let (_dir, layout) = seed_layout();
        create_swift_package(&layout).expect("first run");
        let stale = layout
            .spm_dir()
            .join("Skia/Skia")
            .join(XCFRAMEWORK_NAME)
            .join("stale-slice");
        fs::create_dir_all(&stale).expect("create stale slice");
        create_swift_package(&layout).expect("second run");
        assert!(!stale.exists());
    }
}
