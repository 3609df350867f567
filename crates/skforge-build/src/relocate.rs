use std::fs;
use std::path::PathBuf;

use skforge_core::layout::BuildLayout;
use skforge_core::platform::{Arch, Config, Platform};

use crate::BuildError;

/// Move every expected library from the architecture's working directory to
/// the stable destination tree. A library absent from the working directory
/// is a warning, not an error: optional subsystems may be disabled for a
/// platform. Sources are deleted after the copy so a stale working directory
/// can never feed a later run; re-running over an emptied working directory
/// produces warnings only.
pub fn relocate_libraries(
    layout: &BuildLayout,
    platform: Platform,
    config: Config,
    arch: Arch,
) -> Result<Vec<PathBuf>, BuildError> {
    let src_dir = layout.work_dir(platform, config, arch);
    let dest_dir = layout.lib_dir(platform, config, arch);
    fs::create_dir_all(&dest_dir).map_err(|source| BuildError::Io {
        path: dest_dir.display().to_string(),
        source,
    })?;

    let mut moved = Vec::new();
    for lib in platform.descriptor().libraries {
        let src = src_dir.join(lib);
        let dest = dest_dir.join(lib);
        if !src.exists() {
            eprintln!("warning: {} not found in {}", lib, src_dir.display());
            continue;
        }
        fs::copy(&src, &dest).map_err(|source| BuildError::Io {
            path: dest.display().to_string(),
            source,
        })?;
        fs::remove_file(&src).map_err(|source| BuildError::Io {
            path: src.display().to_string(),
            source,
        })?;
        println!("Moved {} to {}", lib, dest_dir.display());
        moved.push(dest);
    }
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn temp_layout(name: &str) -> BuildLayout {
        let mut path = std::env::temp_dir();
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("skforge-relocate-{}-{}", name, stamp));
        std::fs::create_dir_all(&path).expect("create temp dir");
        BuildLayout::new(path)
    }

    fn seed_work_dir(layout: &BuildLayout, libs: &[&str]) -> PathBuf {
        let work_dir = layout.work_dir(Platform::Mac, Config::Release, Arch::Arm64);
        fs::create_dir_all(&work_dir).expect("create work dir");
        for lib in libs {
            fs::write(work_dir.join(lib), b"archive").expect("write lib");
        }
        work_dir
    }

    #[test]
    fn moves_present_libraries_and_deletes_sources() {
        let layout = temp_layout("move");
        let libs = Platform::Mac.descriptor().libraries;
        let work_dir = seed_work_dir(&layout, libs);
        let moved =
            relocate_libraries(&layout, Platform::Mac, Config::Release, Arch::Arm64).expect("move");
        assert_eq!(moved.len(), libs.len());
        let dest_dir = layout.lib_dir(Platform::Mac, Config::Release, Arch::Arm64);
        for lib in libs {
            assert!(dest_dir.join(lib).exists(), "{} missing", lib);
            assert!(!work_dir.join(lib).exists(), "{} left behind", lib);
        }
    }

    #[test]
    fn absent_library_is_a_warning_not_an_error() {
        let layout = temp_layout("partial");
        seed_work_dir(&layout, &["libskia.a"]);
        let moved = relocate_libraries(&layout, Platform::Mac, Config::Release, Arch::Arm64)
            .expect("partial move");
        assert_eq!(moved.len(), 1);
    }

    // Name, contents, and mtime of every destination entry; a rerun that
    // touched or swapped any file changes this snapshot.
    fn snapshot_dir(dir: &Path) -> Vec<(String, Vec<u8>, std::time::SystemTime)> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir).expect("read dest") {
            let entry = entry.expect("entry");
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            let contents = fs::read(&path).expect("read file");
            let modified = fs::metadata(&path)
                .expect("metadata")
                .modified()
                .expect("mtime");
            entries.push((name, contents, modified));
        }
        entries.sort();
        entries
    }

    #[test]
    fn rerun_over_emptied_work_dir_is_a_no_op() {
        let layout = temp_layout("rerun");
        seed_work_dir(&layout, Platform::Mac.descriptor().libraries);
        relocate_libraries(&layout, Platform::Mac, Config::Release, Arch::Arm64)
            .expect("first run");
        let dest_dir = layout.lib_dir(Platform::Mac, Config::Release, Arch::Arm64);
        let before = snapshot_dir(&dest_dir);
        let moved = relocate_libraries(&layout, Platform::Mac, Config::Release, Arch::Arm64)
            .expect("second run");
        assert!(moved.is_empty());
        assert_eq!(snapshot_dir(&dest_dir), before);
    }
}
