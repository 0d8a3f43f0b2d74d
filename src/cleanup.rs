//! Removal of generated files from a project directory on close.
//!
//! Every deletion is best-effort. A project that was never compiled has
//! no `Build/` directory at all, so missing files are the normal case.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::CleaningConfig;

/// Compiler output, logs and release metadata, relative to the project
pub const BUILD_ARTIFACTS: [&str; 10] = [
    "Metadata.iFiction",
    "Release.blurb",
    "Build/auto.inf",
    "Build/Debug log.txt",
    "Build/Map.eps",
    "Build/output.z5",
    "Build/output.z8",
    "Build/output.ulx",
    "Build/Problems.html",
    "Build/temporary file.inf",
];

/// Generated index pages, relative to the project
pub const INDEX_ARTIFACTS: [&str; 8] = [
    "Index/Actions.html",
    "Index/Contents.html",
    "Index/Headings.xml",
    "Index/Kinds.html",
    "Index/Phrasebook.html",
    "Index/Rules.html",
    "Index/Scenes.html",
    "Index/World.html",
];

/// What a cleanup pass tried to delete and what actually went away
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub attempted: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
}

impl CleanReport {
    fn try_remove(&mut self, path: PathBuf) {
        match fs::remove_file(&path) {
            Ok(()) => self.removed.push(path.clone()),
            Err(e) => debug!(path = %path.display(), error = %e, "Skipped cleanup of project file"),
        }
        self.attempted.push(path);
    }
}

/// Delete generated files from `project_dir` according to `prefs`.
///
/// Index pages are only considered when build files are cleaned too.
pub fn clean_project(project_dir: &Path, prefs: CleaningConfig) -> CleanReport {
    let mut report = CleanReport::default();
    if !prefs.build_files {
        return report;
    }

    for rel in BUILD_ARTIFACTS {
        report.try_remove(project_dir.join(rel));
    }
    if prefs.index_files {
        for rel in INDEX_ARTIFACTS {
            report.try_remove(project_dir.join(rel));
        }
    }

    debug!(
        project = %project_dir.display(),
        attempted = report.attempted.len(),
        removed = report.removed.len(),
        "Project cleanup finished"
    );
    report
}
