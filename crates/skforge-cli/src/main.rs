use std::path::Path;

use clap::Parser;

use skforge_cli::run::{execute, RunError};
use skforge_core::config;
use skforge_core::layout::BuildLayout;
use skforge_core::request::BuildRequest;
use skforge_core::tool::ProcessRunner;

/// Build Skia static libraries for macOS, iOS, and Windows.
#[derive(Parser)]
#[command(name = "skforge", version, about)]
struct Cli {
    /// Target platform (mac | ios | win), or "spm" to build the
    /// distributable Swift package.
    platform: String,
    /// Build configuration (debug | release).
    #[arg(long, default_value = "release")]
    config: String,
    /// Comma-separated target architectures. Defaults to the platform's
    /// default set.
    #[arg(long)]
    archs: Option<String>,
}

fn main() {
    if let Err(error) = run_cli() {
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), RunError> {
    let cli = Cli::parse();
    // Validation happens here, before any external tool can spawn.
    let request = BuildRequest::resolve(&cli.platform, Some(&cli.config), cli.archs.as_deref())?;

    let settings = config::build_settings(Path::new("."))?;
    let mut layout = match settings.base_dir {
        Some(base) => BuildLayout::new(base),
        None => BuildLayout::new("Build"),
    };
    if let Some(skia_src) = settings.skia_src {
        layout = layout.with_skia_src(skia_src);
    }

    execute(&request, &layout, &ProcessRunner::new())
}
