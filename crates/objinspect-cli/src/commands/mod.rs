pub mod dir;
pub mod inspect;

use std::path::Path;

use anyhow::Context;
use objinspect_config::ObjinspectConfig;
use objinspect_core::{Inspected, ModuleObject, Object};
use objinspect_inspect::{FormatOptions, Inspector, MemberFilter};

use crate::cli::{Commands, GlobalFlags};

/// Run a subcommand and return what it prints.
pub fn dispatch(
    command: &Commands,
    flags: &GlobalFlags,
    config: &ObjinspectConfig,
    options: &FormatOptions,
) -> anyhow::Result<String> {
    match command {
        Commands::Inspect(args) => inspect::handle(args, flags, config, options),
        Commands::Dir(args) => dir::handle(args, flags, options),
    }
}

fn load(path: &Path) -> anyhow::Result<ModuleObject> {
    objinspect_source::load_file(path)
        .with_context(|| format!("failed to load module from {}", path.display()))
}

/// Every top-level function and class of a module, inspected. Objects that
/// cannot be inspected are logged and left out.
fn inspect_all(inspector: &Inspector, module: &ModuleObject, filter: &MemberFilter) -> Vec<Inspected> {
    module
        .namespace()
        .iter()
        .filter(|(_, object)| matches!(object, Object::Callable(_) | Object::Class(_)))
        .filter_map(|(name, object)| match inspector.inspect(object, filter) {
            Ok(inspected) => Some(inspected),
            Err(error) => {
                tracing::warn!(%error, object = %name, "leaving object out of module output");
                None
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixture {
    use std::path::PathBuf;

    pub const SOURCE: &str = r#""""Tiny module."""

LIMIT = 3


def pow(x, y, /):
    """Raise x to y."""


class Base:
    def greet(self, name: str = "you") -> str:
        """Say hello."""


class Child(Base):
    """A child."""

    def __init__(self, a, b=5):
        pass

    def _hidden(self):
        pass

    def __len__(self):
        return 0
"#;

    /// Write the fixture module to a temp dir; keep the dir alive while used.
    pub fn write() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("tiny.py");
        std::fs::write(&path, SOURCE).expect("write fixture");
        (dir, path)
    }
}
