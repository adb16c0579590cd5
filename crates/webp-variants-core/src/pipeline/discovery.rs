//! File discovery for finding convertible images in a folder.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::DiscoveryConfig;
use crate::error::InputError;

/// Discovers image files directly inside a folder.
#[derive(Clone)]
pub struct FileDiscovery {
    config: DiscoveryConfig,
}

/// Information about a discovered file.
#[derive(Debug, Clone)]
pub struct DiscoveredFile {
    /// Full path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl DiscoveredFile {
    /// File name with extension, for progress reporting.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// File name without its extension, used to name the variants.
    pub fn base_name(&self) -> String {
        self.path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

impl FileDiscovery {
    /// Create a new file discovery instance.
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }

    /// Expand `~` in a user-supplied folder path.
    pub fn resolve_folder(raw: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(raw.trim()).into_owned())
    }

    /// Fail unless `folder` exists and is a directory.
    pub fn check_folder(folder: &Path) -> Result<(), InputError> {
        if folder.as_os_str().is_empty() || !folder.exists() {
            return Err(InputError::MissingFolder(folder.to_path_buf()));
        }
        if !folder.is_dir() {
            return Err(InputError::NotAFolder(folder.to_path_buf()));
        }
        Ok(())
    }

    /// Find all supported files at the top level of `folder`, sorted by path.
    ///
    /// Subfolders are not searched, so a previous run's output folder is
    /// never picked up as input. An empty result is not an error.
    pub fn discover(&self, folder: &Path) -> Result<Vec<DiscoveredFile>, InputError> {
        Self::check_folder(folder)?;

        let mut files: Vec<DiscoveredFile> = WalkDir::new(folder)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file() && self.is_supported(e.path()))
            .filter_map(|e| {
                let size = e.metadata().ok()?.len();
                Some(DiscoveredFile {
                    path: e.into_path(),
                    size,
                })
            })
            .collect();

        // Sort by path for deterministic ordering
        files.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!("Discovered {} image(s) in {:?}", files.len(), folder);
        Ok(files)
    }

    /// Check if a file has a supported extension.
    fn is_supported(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                self.config
                    .supported_formats
                    .iter()
                    .any(|fmt| fmt.eq_ignore_ascii_case(ext))
            })
            .unwrap_or(false)
    }

    /// Get total size of all discovered files.
    pub fn total_size(files: &[DiscoveredFile]) -> u64 {
        files.iter().map(|f| f.size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), b"x").unwrap();
    }

    #[test]
    fn test_is_supported() {
        let discovery = FileDiscovery::new(DiscoveryConfig::default());

        assert!(discovery.is_supported(Path::new("test.jpg")));
        assert!(discovery.is_supported(Path::new("test.JPG")));
        assert!(discovery.is_supported(Path::new("test.jpeg")));
        assert!(discovery.is_supported(Path::new("test.png")));
        assert!(discovery.is_supported(Path::new("test.Tiff")));
        assert!(discovery.is_supported(Path::new("test.bmp")));
        assert!(discovery.is_supported(Path::new("test.gif")));
        assert!(!discovery.is_supported(Path::new("test.webp")));
        assert!(!discovery.is_supported(Path::new("test.txt")));
        assert!(!discovery.is_supported(Path::new("jpg")));
    }

    #[test]
    fn test_discover_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "c.png");
        touch(dir.path(), "a.JPG");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "b.tif");

        let discovery = FileDiscovery::new(DiscoveryConfig::default());
        let names: Vec<_> = discovery
            .discover(dir.path())
            .unwrap()
            .iter()
            .map(|f| f.file_name())
            .collect();
        assert_eq!(names, ["a.JPG", "b.tif", "c.png"]);

        // Same contents, same order
        let again: Vec<_> = discovery
            .discover(dir.path())
            .unwrap()
            .iter()
            .map(|f| f.file_name())
            .collect();
        assert_eq!(names, again);
    }

    #[test]
    fn test_discover_skips_subfolders() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "top.jpg");
        let nested = dir.path().join("resultado");
        std::fs::create_dir(&nested).unwrap();
        touch(&nested, "inner.jpg");

        let discovery = FileDiscovery::new(DiscoveryConfig::default());
        let files = discovery.discover(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].base_name(), "top");
    }

    #[test]
    fn test_discover_empty_folder_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "readme.txt");
        let discovery = FileDiscovery::new(DiscoveryConfig::default());
        assert!(discovery.discover(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_discover_missing_folder() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let discovery = FileDiscovery::new(DiscoveryConfig::default());
        assert!(matches!(
            discovery.discover(&missing),
            Err(InputError::MissingFolder(_))
        ));

        touch(dir.path(), "file.jpg");
        assert!(matches!(
            discovery.discover(&dir.path().join("file.jpg")),
            Err(InputError::NotAFolder(_))
        ));
    }

    #[test]
    fn test_total_size() {
        let files = vec![
            DiscoveredFile {
                path: PathBuf::from("a.jpg"),
                size: 100,
            },
            DiscoveredFile {
                path: PathBuf::from("b.jpg"),
                size: 200,
            },
        ];

        assert_eq!(FileDiscovery::total_size(&files), 300);
    }

    #[test]
    fn test_base_name_strips_extension() {
        let file = DiscoveredFile {
            path: PathBuf::from("/photos/holiday.beach.jpeg"),
            size: 0,
        };
        assert_eq!(file.base_name(), "holiday.beach");
        assert_eq!(file.file_name(), "holiday.beach.jpeg");
    }
}
