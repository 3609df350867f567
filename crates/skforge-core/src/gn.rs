use crate::platform::{target_cpu, Arch, Config, Platform, PlatformError};

pub const IOS_MIN_VERSION: &str = "13.0";
pub const WIN_CLANG_PATH: &str = "C:\\Program Files\\LLVM";

/// An ordered block of GN variable assignments. Fragments are appended in
/// composition order; a later assignment of the same variable replaces the
/// earlier value in place, so the flattened block has one assignment per
/// variable.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GnArgs {
    assignments: Vec<(String, String)>,
}

impl GnArgs {
    fn set(&mut self, key: &str, value: &str) {
        if let Some(entry) = self.assignments.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value.to_string();
        } else {
            self.assignments.push((key.to_string(), value.to_string()));
        }
    }

    fn extend(&mut self, fragment: &[(&str, &str)]) {
        for (key, value) in fragment.iter().copied() {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn assignments(&self) -> &[(String, String)] {
        &self.assignments
    }

    /// Render the block in the form `gn gen --args=` accepts.
    pub fn render(&self) -> String {
        self.assignments
            .iter()
            .map(|(key, value)| format!("{} = {}", key, value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

const BASE_ARGS: &[(&str, &str)] = &[("cc", "\"clang\""), ("cxx", "\"clang++\"")];

// Feature toggles applied only to release (official) builds.
const RELEASE_ARGS: &[(&str, &str)] = &[
    ("skia_use_system_libjpeg_turbo", "false"),
    ("skia_use_system_libpng", "false"),
    ("skia_use_system_zlib", "false"),
    ("skia_use_system_expat", "false"),
    ("skia_use_system_icu", "false"),
    ("skia_use_system_harfbuzz", "false"),
    ("skia_use_libwebp_decode", "false"),
    ("skia_use_libwebp_encode", "false"),
    ("skia_use_xps", "false"),
    ("skia_use_dng_sdk", "false"),
    ("skia_use_expat", "true"),
    ("skia_use_icu", "true"),
    ("skia_use_gl", "true"),
    ("skia_enable_graphite", "true"),
    ("skia_enable_svg", "true"),
    ("skia_enable_skottie", "true"),
    ("skia_enable_pdf", "false"),
    ("skia_enable_gpu", "true"),
    ("skia_enable_skparagraph", "true"),
];

const MAC_ARGS: &[(&str, &str)] = &[
    ("skia_use_metal", "true"),
    ("skia_use_dawn", "true"),
    ("target_os", "\"mac\""),
    ("extra_cflags_c", "[\"-Wno-error\"]"),
];

const IOS_ARGS: &[(&str, &str)] = &[
    ("skia_use_metal", "true"),
    ("target_os", "\"ios\""),
    ("skia_ios_use_signing", "false"),
    ("extra_cflags_c", "[\"-Wno-error\"]"),
];

const WIN_ARGS: &[(&str, &str)] = &[("skia_use_dawn", "true"), ("skia_use_direct3d", "true")];

fn platform_fragment(platform: Platform) -> &'static [(&'static str, &'static str)] {
    match platform {
        Platform::Mac => MAC_ARGS,
        Platform::Ios => IOS_ARGS,
        Platform::Win => WIN_ARGS,
    }
}

/// Compose the GN argument block for one concrete build. Pure: the same
/// inputs always produce the same block. Composition order is base, then
/// configuration, then platform, then architecture overrides.
pub fn compose(platform: Platform, config: Config, arch: Arch) -> Result<GnArgs, PlatformError> {
    let mut args = GnArgs::default();
    args.extend(BASE_ARGS);
    match config {
        Config::Debug => {
            args.set("is_debug", "true");
        }
        Config::Release => {
            args.extend(RELEASE_ARGS);
            args.set("is_debug", "false");
            args.set("is_official_build", "true");
        }
    }
    args.extend(platform_fragment(platform));
    match platform {
        Platform::Ios => {
            args.set(
                "extra_cflags",
                &format!(
                    "[\"-miphoneos-version-min={}\", \"-I../../../src/skia/third_party/externals/expat/lib\"]",
                    IOS_MIN_VERSION
                ),
            );
        }
        Platform::Win => {
            args.set("clang_win", &format!("\"{}\"", WIN_CLANG_PATH));
        }
        Platform::Mac => {}
    }
    let cpu = target_cpu(platform, arch)?;
    args.set("target_cpu", &format!("\"{}\"", cpu));
    if platform == Platform::Win {
        let runtime = match config {
            Config::Debug => "[\"/MTd\"]",
            Config::Release => "[\"/MT\"]",
        };
        args.set("extra_cflags", runtime);
    }
    Ok(args)
}
