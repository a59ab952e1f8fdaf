//! Executables the reconstruction pipeline runs from the openMVG build tree.

use std::path::{Path, PathBuf};

use serde::Serialize;

pub const REQUIRED_EXECUTABLES: [&str; 5] = [
    "openMVG_main_SfMInit_ImageListing",
    "openMVG_main_ComputeFeatures",
    "openMVG_main_ComputeMatches",
    "openMVG_main_IncrementalSfM",
    "openMVG_main_openMVG2openMVS",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecutableEntry {
    pub name: String,
    pub path: Option<PathBuf>,
}

/// Match candidate files against [`REQUIRED_EXECUTABLES`].
///
/// A `.exe` suffix is accepted. When several candidates match, the first one
/// in iteration order wins, so callers should pass a stable order.
pub fn match_executables<'a, I>(candidates: I) -> Vec<ExecutableEntry>
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut entries: Vec<ExecutableEntry> = REQUIRED_EXECUTABLES
        .iter()
        .map(|name| ExecutableEntry {
            name: (*name).to_string(),
            path: None,
        })
        .collect();

    for candidate in candidates {
        let Some(file_name) = candidate.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let stem = file_name.strip_suffix(".exe").unwrap_or(file_name);
        if let Some(entry) = entries
            .iter_mut()
            .find(|entry| entry.path.is_none() && entry.name == stem)
        {
            entry.path = Some(candidate.to_path_buf());
        }
    }
    entries
}
