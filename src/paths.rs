use std::path::{Path, PathBuf};

/// Default checkout location: `third_party/cef_source` next to this tool's manifest.
pub fn default_output_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("third_party")
        .join("cef_source")
}
