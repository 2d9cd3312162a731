//! Filesystem content source.
//!
//! Discovers content files under the content root and reads them for the
//! pipeline. Discovery properties enforced here:
//! - Only regular files matching the include glob are listed
//! - `.gitignore` files are honoured at every level from the project root
//!   down, the deepest file with a matching rule deciding
//! - Symlinks are not followed by default (`follow_links: false`)
//! - Resolved paths are checked to remain within the content root
//! - Maximum directory depth is enforced to prevent infinite recursion
//! - Reads are bounded by `max_file_size`
//! - Results are sorted by path, independent of directory enumeration order

use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;
use glob::Pattern;
use ignore::gitignore::Gitignore;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::config::ContentSourceConfig;
use crate::error::{ScanError, ScanErrorKind};
use crate::strategy::ContentFile;

/// Directories never descended into.
pub const SKIP_DIRS: &[&str] = &["node_modules", ".git", ".next", "target"];

/// Compiled include/exclude globs for one run.
struct Filters {
    include: Pattern,
    exclude: Vec<Pattern>,
}

impl Filters {
    fn compile(config: &ContentSourceConfig) -> anyhow::Result<Self> {
        let include = Pattern::new(&config.include)
            .with_context(|| format!("Invalid include glob pattern '{}'", config.include))?;

        let exclude = config
            .exclude
            .iter()
            .map(|pat| {
                Pattern::new(pat).with_context(|| format!("Invalid exclude glob pattern '{pat}'"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Self { include, exclude })
    }

    fn is_excluded(&self, relative: &Path) -> bool {
        self.exclude.iter().any(|pattern| {
            pattern.matches_path(relative)
                || relative
                    .file_name()
                    .is_some_and(|name| pattern.matches(&name.to_string_lossy()))
        })
    }
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| SKIP_DIRS.contains(&name))
}

/// `.gitignore` matchers keyed by the directory holding them.
///
/// Directories are loaded as the walk reaches them, so a file is always
/// checked against every ignore file between the project root and itself.
struct IgnoreFiles {
    enabled: bool,
    by_dir: BTreeMap<PathBuf, Gitignore>,
}

impl IgnoreFiles {
    /// Load the project root and every directory down to `content_root`.
    fn for_source(config: &ContentSourceConfig) -> Self {
        let mut ignores = Self {
            enabled: config.respect_gitignore,
            by_dir: BTreeMap::new(),
        };
        let mut dir = config.project_root.clone();
        ignores.load_dir(&dir);
        for component in config.content_dir.components() {
            if let Component::Normal(name) = component {
                dir.push(name);
                ignores.load_dir(&dir);
            }
        }
        ignores
    }

    fn load_dir(&mut self, dir: &Path) {
        if !self.enabled || self.by_dir.contains_key(dir) {
            return;
        }
        let candidate = dir.join(".gitignore");
        if !candidate.is_file() {
            return;
        }
        let (gitignore, partial_err) = Gitignore::new(&candidate);
        if let Some(err) = partial_err {
            warn!(file = %candidate.display(), "ignoring unparsable .gitignore lines: {err}");
        }
        debug!(file = %candidate.display(), rules = gitignore.num_ignores(), "loaded ignore file");
        self.by_dir.insert(dir.to_path_buf(), gitignore);
    }

    /// Whether `path` is ignored; the deepest ignore file with an opinion wins.
    fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        if !self.enabled {
            return false;
        }
        let mut applicable: Vec<_> = self
            .by_dir
            .iter()
            .filter(|(dir, _)| path != dir.as_path() && path.starts_with(dir))
            .collect();
        applicable.sort_by_key(|(dir, _)| std::cmp::Reverse(dir.components().count()));

        for (dir, gitignore) in applicable {
            let relative = path.strip_prefix(dir).unwrap_or(path);
            let verdict = gitignore.matched_path_or_any_parents(relative, is_dir);
            if verdict.is_ignore() {
                return true;
            }
            if verdict.is_whitelist() {
                return false;
            }
        }
        false
    }
}

/// List all content files under the configured content root.
///
/// Returns `(files, scan_errors)`:
/// - `files`: sorted paths that passed every filter and are ready to read.
/// - `scan_errors`: traversal failures and boundary violations. They are
///   never discarded; the caller decides whether they are fatal.
///
/// A missing content root yields an empty listing.
///
/// # Errors
///
/// Returns an error if the include or exclude patterns are not valid globs,
/// or the content root exists but cannot be canonicalized.
pub fn find_files(config: &ContentSourceConfig) -> anyhow::Result<(Vec<PathBuf>, Vec<ScanError>)> {
    let filters = Filters::compile(config)?;
    let content_root = config.content_root();
    let mut files = Vec::new();
    let mut scan_errors = Vec::new();

    if !content_root.is_dir() {
        debug!(root = %content_root.display(), "content root missing, nothing to list");
        return Ok((files, scan_errors));
    }

    let canonical_root = content_root.canonicalize().with_context(|| {
        format!(
            "Failed to canonicalize content root {}",
            content_root.display()
        )
    })?;

    let mut ignores = IgnoreFiles::for_source(config);
    let mut walker = WalkDir::new(&content_root)
        .follow_links(config.follow_links)
        .max_depth(config.max_depth)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_skipped_dir(entry));

    while let Some(entry_result) = walker.next() {
        let entry = match entry_result {
            Ok(e) => e,
            Err(walk_err) => {
                let path = walk_err
                    .path()
                    .map_or_else(|| content_root.clone(), Path::to_path_buf);
                scan_errors.push(ScanError::new(
                    path,
                    ScanErrorKind::WalkError,
                    format!("Directory traversal error: {walk_err}"),
                ));
                continue;
            }
        };
        let file_path = entry.path();

        if entry.file_type().is_dir() {
            if entry.depth() > 0 && ignores.is_ignored(file_path, true) {
                debug!(dir = %file_path.display(), "skipping gitignored directory");
                walker.skip_current_dir();
            } else {
                ignores.load_dir(file_path);
            }
            continue;
        }

        if entry.path_is_symlink() && !config.follow_links {
            warn!(path = %file_path.display(), "skipping symlink, following links is disabled");
            continue;
        }

        // Devices, pipes and sockets are not regular files.
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = file_path.strip_prefix(&content_root).unwrap_or(file_path);

        if !filters.include.matches_path(relative) || filters.is_excluded(relative) {
            continue;
        }

        if ignores.is_ignored(file_path, false) {
            debug!(file = %file_path.display(), "skipping gitignored file");
            continue;
        }

        match file_path.canonicalize() {
            Ok(canonical_path) if !canonical_path.starts_with(&canonical_root) => {
                scan_errors.push(ScanError::new(
                    file_path,
                    ScanErrorKind::OutsideRoot,
                    format!(
                        "Path resolves outside content root: {} -> {}",
                        file_path.display(),
                        canonical_path.display()
                    ),
                ));
                continue;
            }
            Ok(_) => {}
            Err(e) => {
                scan_errors.push(ScanError::new(
                    file_path,
                    ScanErrorKind::IoError,
                    format!("Failed to canonicalize path: {e}"),
                ));
                continue;
            }
        }

        files.push(file_path.to_path_buf());
    }

    files.sort();
    files.dedup();
    debug!(count = files.len(), root = %content_root.display(), "discovered content files");
    Ok((files, scan_errors))
}

/// Read a content file using a bounded streaming read, enforcing `max_file_size`.
///
/// # Errors
///
/// Returns a [`ScanError`] if the file cannot be opened or read (for
/// example it vanished after listing) or exceeds `max_file_size`.
pub fn read_content_file(path: &Path, max_file_size: u64) -> Result<ContentFile, ScanError> {
    let file = std::fs::File::open(path).map_err(|e| {
        ScanError::new(
            path,
            ScanErrorKind::IoError,
            format!("Failed to open file: {e}"),
        )
    })?;

    // Read at most max_file_size + 1 bytes to detect oversized files
    let mut bytes = Vec::new();
    file.take(max_file_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| {
            ScanError::new(
                path,
                ScanErrorKind::IoError,
                format!("Failed to read file: {e}"),
            )
        })?;

    if bytes.len() as u64 > max_file_size {
        return Err(ScanError::new(
            path,
            ScanErrorKind::FileTooLarge,
            format!("File exceeds maximum size of {max_file_size} bytes"),
        ));
    }

    Ok(ContentFile {
        path: path.to_path_buf(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(root: &Path) -> ContentSourceConfig {
        let mut cfg = ContentSourceConfig::default();
        cfg.project_root = root.to_path_buf();
        cfg
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "---\ntitle: x\n---\n").unwrap();
    }

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| {
                f.strip_prefix(root)
                    .unwrap()
                    .to_string_lossy()
                    .replace('\\', "/")
            })
            .collect()
    }

    #[test]
    fn test_find_files_matches_include_glob_recursively() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pages/blog/b.mdx");
        touch(tmp.path(), "pages/blog/a.mdx");
        touch(tmp.path(), "pages/blog/2024/nested.mdx");
        touch(tmp.path(), "pages/blog/notes.md");
        touch(tmp.path(), "pages/about.mdx");

        let (files, errors) = find_files(&config_for(tmp.path())).unwrap();
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            names(&files, tmp.path()),
            vec![
                "pages/blog/2024/nested.mdx",
                "pages/blog/a.mdx",
                "pages/blog/b.mdx"
            ]
        );
    }

    #[test]
    fn test_find_files_missing_root_is_empty() {
        let tmp = TempDir::new().unwrap();
        let (files, errors) = find_files(&config_for(tmp.path())).unwrap();
        assert!(files.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_find_files_respects_gitignore() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pages/blog/kept.mdx");
        touch(tmp.path(), "pages/blog/generated/out.mdx");
        touch(tmp.path(), "pages/blog/scratch.mdx");
        fs::write(tmp.path().join(".gitignore"), "pages/blog/generated/\n").unwrap();
        fs::write(tmp.path().join("pages/blog/.gitignore"), "scratch.mdx\n").unwrap();

        let (files, _) = find_files(&config_for(tmp.path())).unwrap();
        assert_eq!(names(&files, tmp.path()), vec!["pages/blog/kept.mdx"]);

        let mut cfg = config_for(tmp.path());
        cfg.respect_gitignore = false;
        let (files, _) = find_files(&cfg).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_find_files_respects_nested_and_intermediate_gitignores() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pages/blog/ok.mdx");
        touch(tmp.path(), "pages/blog/mid.mdx");
        touch(tmp.path(), "pages/blog/sub/scratch.mdx");
        touch(tmp.path(), "pages/blog/sub/kept.mdx");
        touch(tmp.path(), "pages/blog/2024/tmp/draft.mdx");
        fs::write(tmp.path().join("pages/.gitignore"), "blog/mid.mdx
").unwrap();
        fs::write(tmp.path().join("pages/blog/sub/.gitignore"), "scratch.mdx
").unwrap();
        fs::write(tmp.path().join("pages/blog/2024/.gitignore"), "tmp/
").unwrap();

        let (files, errors) = find_files(&config_for(tmp.path())).unwrap();
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            names(&files, tmp.path()),
            vec!["pages/blog/ok.mdx", "pages/blog/sub/kept.mdx"]
        );
    }

    #[test]
    fn test_find_files_deeper_gitignore_can_reinclude() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pages/blog/a.mdx");
        touch(tmp.path(), "pages/blog/keep/b.mdx");
        fs::write(tmp.path().join(".gitignore"), "*.mdx
").unwrap();
        fs::write(tmp.path().join("pages/blog/keep/.gitignore"), "!b.mdx
").unwrap();

        let (files, _) = find_files(&config_for(tmp.path())).unwrap();
        assert_eq!(names(&files, tmp.path()), vec!["pages/blog/keep/b.mdx"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_find_files_skips_symlinks_unless_following() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pages/blog/real.mdx");
        std::os::unix::fs::symlink(
            tmp.path().join("pages/blog/real.mdx"),
            tmp.path().join("pages/blog/linked.mdx"),
        )
        .unwrap();

        let (files, _) = find_files(&config_for(tmp.path())).unwrap();
        assert_eq!(names(&files, tmp.path()), vec!["pages/blog/real.mdx"]);

        let mut cfg = config_for(tmp.path());
        cfg.follow_links = true;
        let (files, errors) = find_files(&cfg).unwrap();
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(
            names(&files, tmp.path()),
            vec!["pages/blog/linked.mdx", "pages/blog/real.mdx"]
        );
    }

    #[test]
    fn test_find_files_skips_node_modules_and_excludes() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "pages/blog/node_modules/pkg/readme.mdx");
        touch(tmp.path(), "pages/blog/post.mdx");
        touch(tmp.path(), "pages/blog/wip-post.mdx");

        let mut cfg = config_for(tmp.path());
        cfg.exclude = vec!["wip-*".to_owned()];
        let (files, _) = find_files(&cfg).unwrap();
        assert_eq!(names(&files, tmp.path()), vec!["pages/blog/post.mdx"]);
    }

    #[test]
    fn test_find_files_invalid_exclude_pattern_errors() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = config_for(tmp.path());
        cfg.exclude = vec!["[".to_owned()];
        let err = find_files(&cfg).unwrap_err();
        assert!(err.to_string().contains("Invalid exclude glob"), "got: {err}");
    }

    #[test]
    fn test_read_content_file_missing_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = read_content_file(&tmp.path().join("gone.mdx"), 1024).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::IoError);
    }

    #[test]
    fn test_read_content_file_too_large() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("big.mdx");
        fs::write(&path, "x".repeat(64)).unwrap();
        let err = read_content_file(&path, 16).unwrap_err();
        assert_eq!(err.kind, ScanErrorKind::FileTooLarge);

        let file = read_content_file(&path, 64).unwrap();
        assert_eq!(file.bytes.len(), 64);
    }
}
