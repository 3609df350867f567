use std::fs;
use std::path::Path;

use skforge_core::layout::{EXCLUDED_SEGMENTS, PACKAGE_DIRS};
use walkdir::{DirEntry, WalkDir};

use crate::{io_error, PackError};

/// Outcome of one header-packaging pass. `visited` counts every entry the
/// walk actually yielded, so pruned subtrees are observable: entries below
/// an excluded directory never appear in the count.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeaderReport {
    pub copied: usize,
    pub visited: usize,
}

/// Mirror the `.h` files under the packaging allow-list into `dest`.
/// Excluded directory segments are pruned before descent, so the walk never
/// enters them. Idempotent: existing destination files are overwritten and
/// a re-run produces the identical header set.
pub fn package_headers(skia_src: &Path, dest: &Path) -> Result<HeaderReport, PackError> {
    println!("Packaging headers to {}...", dest.display());
    fs::create_dir_all(dest).map_err(io_error(dest))?;

    let mut report = HeaderReport::default();
    for dir in PACKAGE_DIRS {
        let root = skia_src.join(dir);
        if !root.is_dir() {
            continue;
        }
        let walker = WalkDir::new(&root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|entry| !is_excluded(entry));
        for entry in walker {
            let entry = entry.map_err(|error| PackError::Io {
                path: root.display().to_string(),
                source: error.into(),
            })?;
            report.visited += 1;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|ext| ext.to_str()) != Some("h") {
                continue;
            }
            let relative = entry.path().strip_prefix(skia_src).map_err(|error| {
                PackError::Io {
                    path: entry.path().display().to_string(),
                    source: std::io::Error::new(std::io::ErrorKind::InvalidInput, error),
                }
            })?;
            let dest_file = dest.join(relative);
            if let Some(parent) = dest_file.parent() {
                fs::create_dir_all(parent).map_err(io_error(parent))?;
            }
            fs::copy(entry.path(), &dest_file).map_err(io_error(&dest_file))?;
            report.copied += 1;
        }
    }
    Ok(report)
}

fn is_excluded(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| EXCLUDED_SEGMENTS.contains(&name))
            .unwrap_or(false)
}
