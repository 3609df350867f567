use std::path::{Path, PathBuf};

use skforge_core::layout::{BuildLayout, DEPOT_TOOLS_URL};
use skforge_core::tool::{ToolCommand, ToolRunner};

use crate::BuildError;

/// Resolved build-generation toolchain. The checkout location is carried as
/// a value and prepended to PATH per invocation; nothing mutates the
/// orchestrator's own environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toolchain {
    depot_tools: PathBuf,
}

impl Toolchain {
    pub fn depot_tools(&self) -> &Path {
        &self.depot_tools
    }
}

/// Fetch-once bootstrap: clone depot_tools if the checkout is absent,
/// otherwise reuse it as-is. Retrieval failure is fatal; the operator
/// re-invokes after fixing the cause.
pub fn ensure_depot_tools(
    runner: &dyn ToolRunner,
    layout: &BuildLayout,
) -> Result<Toolchain, BuildError> {
    let depot_tools = layout.depot_tools_dir();
    if !depot_tools.exists() {
        println!("Fetching depot_tools...");
        let command = ToolCommand::new("git")
            .arg("clone")
            .arg(DEPOT_TOOLS_URL)
            .arg(depot_tools.display().to_string());
        runner.run(&command).map_err(BuildError::Bootstrap)?;
    }
    Ok(Toolchain { depot_tools })
}

/// Check out / update the skia source tree's own dependencies. One blocking
/// external step; fatal on failure.
pub fn sync_deps(
    runner: &dyn ToolRunner,
    toolchain: &Toolchain,
    layout: &BuildLayout,
) -> Result<(), BuildError> {
    println!("Syncing deps...");
    let command = ToolCommand::new("python3")
        .arg("tools/git-sync-deps")
        .current_dir(layout.skia_src_dir())
        .prepend_path(toolchain.depot_tools());
    runner.run(&command).map_err(BuildError::Sync)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use skforge_core::tool::ToolError;

    struct RecordingRunner {
        commands: RefCell<Vec<ToolCommand>>,
    }

    impl RecordingRunner {
        fn new() -> Self {
            Self {
                commands: RefCell::new(Vec::new()),
            }
        }
    }

    impl ToolRunner for RecordingRunner {
        fn run(&self, command: &ToolCommand) -> Result<(), ToolError> {
            self.commands.borrow_mut().push(command.clone());
            Ok(())
        }
    }

    fn temp_layout(name: &str) -> BuildLayout {
        let mut path = std::env::temp_dir();
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        path.push(format!("skforge-build-{}-{}", name, stamp));
        std::fs::create_dir_all(&path).expect("create temp dir");
        BuildLayout::new(path)
    }

    #[test]
    fn clones_depot_tools_when_absent() {
        let layout = temp_layout("bootstrap-clone");
        let runner = RecordingRunner::new();
        let toolchain = ensure_depot_tools(&runner, &layout).expect("toolchain");
        assert_eq!(toolchain.depot_tools(), layout.depot_tools_dir());
        let commands = runner.commands.borrow();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].program, "git");
        assert_eq!(commands[0].args[0], "clone");
        assert_eq!(commands[0].args[1], DEPOT_TOOLS_URL);
    }

    #[test]
    fn bootstrap_is_a_no_op_when_checkout_exists() {
        let layout = temp_layout("bootstrap-noop");
        std::fs::create_dir_all(layout.depot_tools_dir()).expect("create depot_tools");
        let runner = RecordingRunner::new();
        ensure_depot_tools(&runner, &layout).expect("toolchain");
        assert!(runner.commands.borrow().is_empty());
    }

    #[test]
    fn sync_runs_with_toolchain_on_path() {
        let layout = temp_layout("sync");
        std::fs::create_dir_all(layout.depot_tools_dir()).expect("create depot_tools");
        let runner = RecordingRunner::new();
        let toolchain = ensure_depot_tools(&runner, &layout).expect("toolchain");
        sync_deps(&runner, &toolchain, &layout).expect("sync");
        let commands = runner.commands.borrow();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].program, "python3");
        assert_eq!(commands[0].args, vec!["tools/git-sync-deps"]);
        assert_eq!(commands[0].cwd.as_deref(), Some(layout.skia_src_dir()));
        assert_eq!(
            commands[0].path_prepend.as_deref(),
            Some(toolchain.depot_tools())
        );
    }
}
