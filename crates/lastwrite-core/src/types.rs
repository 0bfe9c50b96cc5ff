//! Core domain types shared by the watcher and the aggregator

use std::{
    fmt,
    path::{Path, PathBuf},
};

// ═══════════════════════════════════════════════════════════════════════════
// WATCH ROOT
// ═══════════════════════════════════════════════════════════════════════════

/// A configured top-level directory plus its recursion mode.
///
/// The label is the path exactly as configured; it is the aggregation key
/// and the value of the `directory` metric label. Immutable after startup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WatchRoot {
    label: String,
    path: PathBuf,
    recursive: bool,
}

impl WatchRoot {
    pub fn new(path: impl Into<String>, recursive: bool) -> Self {
        let label = path.into();
        Self {
            path: PathBuf::from(&label),
            label,
            recursive,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub const fn is_recursive(&self) -> bool {
        self.recursive
    }
}

impl fmt::Display for WatchRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.recursive {
            "recursive"
        } else {
            "non-recursive"
        };
        write!(f, "{} ({mode})", self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_is_path_as_configured() {
        let root = WatchRoot::new("/data/", true);
        assert_eq!(root.label(), "/data/");
        assert_eq!(root.path(), Path::new("/data/"));
        assert!(root.is_recursive());
    }

    #[test]
    fn test_display_includes_mode() {
        assert_eq!(
            WatchRoot::new("/srv", false).to_string(),
            "/srv (non-recursive)"
        );
    }
}
