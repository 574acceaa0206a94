//! Snapshot of the packages installed under a repository root.
//!
//! Directory structure: `<root>/<name>~<version>/...`

use log::{debug, warn};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::runtime::Runtime;

use super::{PackageId, Version, identity::VERSION_SEPARATOR};

/// Installed packages found by a single scan of a root directory.
///
/// Entries are grouped by package name, and each name maps its versions
/// (ascending) to the package directory. The snapshot never changes after
/// the scan; scan again to observe new directories.
#[derive(Debug, Clone)]
pub struct PackageDirectory {
    root: PathBuf,
    packages: BTreeMap<String, BTreeMap<Version, PathBuf>>,
}

impl PackageDirectory {
    /// Scan the immediate subdirectories of `root`.
    ///
    /// Directories whose names are not `NAME~VERSION` are skipped. When two
    /// directory names resolve to the same package and version (`app~1.0` and
    /// `app~v1.0.0`), the one that sorts first wins.
    #[tracing::instrument(skip(runtime))]
    pub fn scan<R: Runtime>(runtime: &R, root: &Path) -> Result<Self> {
        let mut entries = runtime
            .read_dir(root)
            .map_err(|e| Error::io("Listing packages in", root, e))?;
        entries.sort();

        let mut packages: BTreeMap<String, BTreeMap<Version, PathBuf>> = BTreeMap::new();

        for path in entries {
            if !runtime.is_dir(&path) {
                continue;
            }
            let Some(dir_name) = path.file_name().and_then(|n| n.to_str()) else {
                debug!("Skipping non UTF-8 directory {:?}", path);
                continue;
            };

            let id = match dir_name.parse::<PackageId>() {
                Ok(id) => id,
                Err(e) => {
                    debug!("Skipping {:?}: {}", path, e);
                    continue;
                }
            };

            let versions = packages.entry(id.name().to_string()).or_default();
            match versions.entry(id.version().clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(path);
                }
                Entry::Occupied(existing) => {
                    warn!(
                        "Ignoring {:?}: {} is already provided by {:?}",
                        path,
                        id,
                        existing.get()
                    );
                }
            }
        }

        debug!(
            "Found {} package(s) under {:?}",
            packages.values().map(BTreeMap::len).sum::<usize>(),
            root
        );

        Ok(Self {
            root: root.to_path_buf(),
            packages,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of installed package instances (every version counts).
    pub fn len(&self) -> usize {
        self.packages.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    /// Installed package names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Installed versions of one package, lowest first.
    pub fn versions(&self, name: &str) -> impl Iterator<Item = &Version> {
        self.packages.get(name).into_iter().flat_map(BTreeMap::keys)
    }

    pub fn path(&self, id: &PackageId) -> Option<&Path> {
        self.packages
            .get(id.name())?
            .get(id.version())
            .map(PathBuf::as_path)
    }

    /// The highest installed version of a package.
    pub fn latest(&self, name: &str) -> Option<(PackageId, &Path)> {
        let (version, path) = self.packages.get(name)?.last_key_value()?;
        Some((PackageId::new(name, version.clone()), path.as_path()))
    }

    /// Every installed package, ordered by name and then version.
    pub fn iter(&self) -> impl Iterator<Item = (PackageId, &Path)> {
        self.packages.iter().flat_map(|(name, versions)| {
            versions
                .iter()
                .map(move |(version, path)| (PackageId::new(name, version.clone()), path.as_path()))
        })
    }

    /// Whether `name` is installed in exactly `version`.
    pub fn has_package(&self, name: &str, version: &str) -> Result<bool> {
        let version = Version::parse(version)?;
        Ok(self
            .packages
            .get(name)
            .is_some_and(|versions| versions.contains_key(&version)))
    }

    /// Directory a package of this version lives in, or would be placed in.
    pub fn package_path(&self, name: &str, version: &str) -> PathBuf {
        self.root
            .join(format!("{}{}{}", name, VERSION_SEPARATOR, version))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{MockRuntime, RealRuntime};
    use mockall::predicate::eq;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    /// Mock a root directory whose entries are all directories.
    fn mock_root(root: &Path, names: &'static [&'static str]) -> MockRuntime {
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_dir()
            .with(eq(root.to_path_buf()))
            .returning(move |p| Ok(names.iter().map(|n| p.join(n)).collect()));
        runtime.expect_is_dir().returning(|_| true);
        runtime
    }

    #[test]
    fn test_scan_skips_unparseable_directories() {
        // --- Setup ---
        let root = PathBuf::from("/tools");
        let runtime = mock_root(&root, &["app~1.0.0", "app~2.0.0", "not-a-package"]);

        // --- Execute ---
        let snapshot = PackageDirectory::scan(&runtime, &root).unwrap();

        // --- Verify ---
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.names().collect::<Vec<_>>(), vec!["app"]);
        assert_eq!(
            snapshot.versions("app").collect::<Vec<_>>(),
            vec![&v("1.0.0"), &v("2.0.0")]
        );
        assert_eq!(
            snapshot.path(&"app~2.0.0".parse().unwrap()),
            Some(root.join("app~2.0.0").as_path())
        );
    }

    #[test]
    fn test_scan_skips_malformed_versions() {
        let root = PathBuf::from("/tools");
        let runtime = mock_root(&root, &["app~1.x.0", "app~1.2.3", "~1.0.0", "lib~"]);

        let snapshot = PackageDirectory::scan(&runtime, &root).unwrap();

        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.has_package("app", "1.2.3").unwrap());
    }

    #[test]
    fn test_scan_ignores_files() {
        // --- Setup ---
        let root = PathBuf::from("/tools");
        let mut runtime = MockRuntime::new();

        // Read dir /tools -> [app~1.0.0 (dir), notes~2.0.0 (file)]
        runtime
            .expect_read_dir()
            .with(eq(root.clone()))
            .returning(|p| Ok(vec![p.join("app~1.0.0"), p.join("notes~2.0.0")]));
        runtime
            .expect_is_dir()
            .with(eq(root.join("app~1.0.0")))
            .returning(|_| true);
        runtime
            .expect_is_dir()
            .with(eq(root.join("notes~2.0.0")))
            .returning(|_| false);

        // --- Execute & Verify ---
        let snapshot = PackageDirectory::scan(&runtime, &root).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.names().collect::<Vec<_>>(), vec!["app"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_skips_non_utf8_names() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        // --- Setup ---
        let root = PathBuf::from("/tools");
        let mut runtime = MockRuntime::new();
        runtime.expect_read_dir().returning(|p| {
            Ok(vec![
                p.join(OsStr::from_bytes(b"app~1.0\xff")),
                p.join("app~2.0.0"),
            ])
        });
        runtime.expect_is_dir().returning(|_| true);

        // --- Execute ---
        let snapshot = PackageDirectory::scan(&runtime, &root).unwrap();

        // --- Verify ---
        assert_eq!(snapshot.len(), 1);
        assert_eq!(
            snapshot.versions("app").collect::<Vec<_>>(),
            vec![&v("2.0.0")]
        );
    }

    #[test]
    fn test_scan_keeps_first_of_colliding_versions() {
        // "app~1.0" and "app~v1.0.0" are the same package version; sorted order
        // puts "app~1.0" first regardless of listing order.
        let root = PathBuf::from("/tools");
        let runtime = mock_root(&root, &["app~v1.0.0", "app~1.0"]);

        let snapshot = PackageDirectory::scan(&runtime, &root).unwrap();

        assert_eq!(snapshot.len(), 1);
        let (id, path) = snapshot.latest("app").unwrap();
        assert_eq!(id.to_string(), "app~1.0.0");
        assert_eq!(path, root.join("app~1.0"));
    }

    #[test]
    fn test_scan_unreadable_root_is_io_error() {
        let root = PathBuf::from("/missing");
        let mut runtime = MockRuntime::new();
        runtime
            .expect_read_dir()
            .returning(|_| Err(anyhow::anyhow!("No such file or directory")));

        let err = PackageDirectory::scan(&runtime, &root).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn test_empty_root() {
        let root = PathBuf::from("/empty");
        let runtime = mock_root(&root, &[]);

        let snapshot = PackageDirectory::scan(&runtime, &root).unwrap();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.len(), 0);
        assert!(snapshot.latest("app").is_none());
        assert_eq!(snapshot.versions("app").count(), 0);
    }

    #[test]
    fn test_latest_and_iter_order() {
        let root = PathBuf::from("/tools");
        let runtime = mock_root(
            &root,
            &["game~1.10.0", "game~1.9.0", "engine~0.3.0-beta", "engine~0.3.0"],
        );

        let snapshot = PackageDirectory::scan(&runtime, &root).unwrap();

        let (latest, _) = snapshot.latest("game").unwrap();
        assert_eq!(latest.version(), &v("1.10.0"));

        let ids: Vec<String> = snapshot.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(
            ids,
            vec!["engine~0.3.0", "engine~0.3.0-beta", "game~1.9.0", "game~1.10.0"]
        );
    }

    #[test]
    fn test_has_package() {
        let root = PathBuf::from("/tools");
        let runtime = mock_root(&root, &["game~1.2.0"]);
        let snapshot = PackageDirectory::scan(&runtime, &root).unwrap();

        assert!(snapshot.has_package("game", "1.2").unwrap());
        assert!(snapshot.has_package("game", "v1.2.0").unwrap());
        assert!(!snapshot.has_package("game", "1.2.1").unwrap());
        assert!(!snapshot.has_package("other", "1.2.0").unwrap());
        assert!(snapshot.has_package("game", "bad").unwrap_err().is_format());
    }

    #[test]
    fn test_package_path() {
        let root = PathBuf::from("/tools");
        let runtime = mock_root(&root, &[]);
        let snapshot = PackageDirectory::scan(&runtime, &root).unwrap();

        assert_eq!(
            snapshot.package_path("game", "1.2"),
            root.join("game~1.2")
        );
    }

    #[test_log::test]
    fn test_scan_real_directory() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["app~1.0.0", "app~2.0.0", "not-a-package", "lib~0.1-dev"] {
            std::fs::create_dir(dir.path().join(name)).unwrap();
        }
        std::fs::write(dir.path().join("readme~1.0.0"), "a file, not a package").unwrap();

        let snapshot = PackageDirectory::scan(&RealRuntime, dir.path()).unwrap();

        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.names().collect::<Vec<_>>(), vec!["app", "lib"]);
        let (lib, path) = snapshot.latest("lib").unwrap();
        assert_eq!(lib.version().suffix(), "dev");
        assert_eq!(path, dir.path().join("lib~0.1-dev"));
    }
}
