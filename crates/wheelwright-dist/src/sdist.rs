//! Source distribution assembly.
//!
//! The [`SdistWriter`] selects project files through the resolved
//! include/exclude sets, adds the legacy `PKG-INFO` metadata file, and
//! serializes everything into one deterministic gzip-compressed tar
//! archive rooted at `{normalized-name}-{version}/`.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::{Builder, Header};
use tracing::{debug, info};
use walkdir::WalkDir;

use wheelwright_core::{ResolvedProject, patterns};

use crate::wheel::is_executable;
use crate::{DistResult, FIXED_MTIME, metadata};

/// Deterministic sdist writer.
pub struct SdistWriter<'a> {
    project: &'a ResolvedProject,
    project_dir: &'a Path,
}

impl<'a> SdistWriter<'a> {
    #[must_use]
    pub fn new(project: &'a ResolvedProject, project_dir: &'a Path) -> Self {
        Self {
            project,
            project_dir,
        }
    }

    /// `{normalized}-{version}` archive root directory.
    #[must_use]
    pub fn root_dir(&self) -> String {
        format!("{}-{}", self.project.normalized_name, self.project.version)
    }

    /// Sdist filename for this distribution.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.tar.gz", self.root_dir())
    }

    /// Write the archive into `output_dir`, returning its filename.
    ///
    /// Temp-then-rename, like the wheel writer: no partial archive ever
    /// appears at the target path.
    pub fn write(&self, output_dir: &Path) -> DistResult<String> {
        let file_name = self.file_name();
        fs::create_dir_all(output_dir)?;
        let tmp_path = output_dir.join(format!(".{file_name}.tmp"));
        let target_path = output_dir.join(&file_name);

        match self.write_archive(&tmp_path) {
            Ok(entries) => {
                fs::rename(&tmp_path, &target_path)?;
                info!(sdist = %file_name, entries, "wrote sdist archive");
                Ok(file_name)
            }
            Err(err) => {
                let _ = fs::remove_file(&tmp_path);
                Err(err)
            }
        }
    }

    /// Select project files: union of include matches minus exclude
    /// matches. Literal includes may name a file or a directory subtree;
    /// glob includes match files only. A file matched by both an include
    /// and an exclude is excluded. Resolved license files are always
    /// shipped.
    fn collect(&self) -> DistResult<BTreeMap<String, PathBuf>> {
        let mut selected = BTreeMap::new();

        for pattern in &self.project.sdist.include {
            if patterns::is_glob(pattern) {
                for path in patterns::expand_glob(self.project_dir, pattern) {
                    self.consider(&mut selected, path);
                }
                continue;
            }
            let path = self.project_dir.join(pattern);
            if path.is_file() {
                self.consider(&mut selected, path);
            } else if path.is_dir() {
                for entry in WalkDir::new(&path).sort_by_file_name() {
                    let entry = entry?;
                    if entry.file_type().is_file() {
                        self.consider(&mut selected, entry.path().to_path_buf());
                    }
                }
            }
            // a missing literal include is skipped: the default set names
            // optional files like README.rst
        }

        for license_file in &self.project.license_files {
            selected
                .entry(license_file.rel_path.clone())
                .or_insert_with(|| license_file.source.clone());
        }

        Ok(selected)
    }

    fn consider(&self, selected: &mut BTreeMap<String, PathBuf>, path: PathBuf) {
        let Ok(rel) = path.strip_prefix(self.project_dir) else {
            return;
        };
        if patterns::is_excluded(rel, &self.project.sdist.exclude) {
            debug!(path = %rel.display(), "excluded from sdist");
            return;
        }
        selected.entry(patterns::to_slash(rel)).or_insert(path);
    }

    fn write_archive(&self, tmp_path: &Path) -> DistResult<usize> {
        let root = self.root_dir();

        // everything in memory first so PKG-INFO sorts in with the rest
        let mut entries: BTreeMap<String, (Vec<u8>, bool)> = BTreeMap::new();
        for (rel, source) in self.collect()? {
            entries.insert(
                format!("{root}/{rel}"),
                (fs::read(&source)?, is_executable(&source)),
            );
        }
        entries.insert(
            format!("{root}/PKG-INFO"),
            (metadata::core_metadata(self.project).into_bytes(), false),
        );

        let encoder = GzEncoder::new(File::create(tmp_path)?, Compression::default());
        let mut tar = Builder::new(encoder);
        for (path, (contents, executable)) in &entries {
            append_entry(&mut tar, path, contents, *executable)?;
        }
        let encoder = tar.into_inner()?;
        encoder.finish()?;
        Ok(entries.len())
    }
}

/// Append one normalized entry: fixed mtime, restricted mode, no owner.
fn append_entry<W: std::io::Write>(
    tar: &mut Builder<W>,
    path: &str,
    contents: &[u8],
    executable: bool,
) -> DistResult<()> {
    let mut header = Header::new_gnu();
    header.set_size(contents.len() as u64);
    header.set_mode(if executable { 0o755 } else { 0o644 });
    header.set_mtime(FIXED_MTIME);
    header.set_uid(0);
    header.set_gid(0);
    tar.append_data(&mut header, path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use flate2::read::GzDecoder;
    use tar::Archive;
    use tempfile::TempDir;

    fn sample_project(temp_dir: &TempDir, extra_toml: &str) -> ResolvedProject {
        fs::write(
            temp_dir.path().join("pyproject.toml"),
            format!(
                "[project]\nname = \"my-package\"\nversion = \"1.2.3\"\n{extra_toml}"
            ),
        )
        .unwrap();
        fs::write(temp_dir.path().join("README.md"), "# my-package\n").unwrap();
        fs::write(temp_dir.path().join("conanfile.py"), "# recipe\n").unwrap();
        let src = temp_dir.path().join("src/my_package");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("__init__.py"), "__version__ = \"1.2.3\"\n").unwrap();
        fs::create_dir_all(temp_dir.path().join("src/my_package/__pycache__")).unwrap();
        fs::write(
            temp_dir.path().join("src/my_package/__pycache__/x.pyc"),
            b"\x00",
        )
        .unwrap();
        ResolvedProject::resolve(temp_dir.path()).unwrap()
    }

    fn archive_names(path: &Path) -> Vec<String> {
        let mut archive = Archive::new(GzDecoder::new(File::open(path).unwrap()));
        archive
            .entries()
            .unwrap()
            .map(|entry| {
                entry
                    .unwrap()
                    .path()
                    .unwrap()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect()
    }

    #[test]
    fn SdistWriter___write___includes_defaults_and_pkg_info() {
        let temp_dir = TempDir::new().unwrap();
        let project = sample_project(&temp_dir, "");
        let out_dir = temp_dir.path().join("out");

        let file_name = SdistWriter::new(&project, temp_dir.path())
            .write(&out_dir)
            .unwrap();

        assert_eq!(file_name, "my_package-1.2.3.tar.gz");
        let names = archive_names(&out_dir.join(&file_name));
        assert!(names.contains(&"my_package-1.2.3/pyproject.toml".to_string()));
        assert!(names.contains(&"my_package-1.2.3/conanfile.py".to_string()));
        assert!(names.contains(&"my_package-1.2.3/README.md".to_string()));
        assert!(names.contains(&"my_package-1.2.3/src/my_package/__init__.py".to_string()));
        assert!(names.contains(&"my_package-1.2.3/PKG-INFO".to_string()));
    }

    #[test]
    fn SdistWriter___write___applies_default_excludes() {
        let temp_dir = TempDir::new().unwrap();
        let project = sample_project(&temp_dir, "");
        let out_dir = temp_dir.path().join("out");

        let file_name = SdistWriter::new(&project, temp_dir.path())
            .write(&out_dir)
            .unwrap();

        let names = archive_names(&out_dir.join(&file_name));
        assert!(!names.iter().any(|n| n.contains("__pycache__")));
        assert!(!names.iter().any(|n| n.ends_with(".pyc")));
    }

    #[test]
    fn SdistWriter___write___user_exclude_removes_default_include() {
        let temp_dir = TempDir::new().unwrap();
        let project = sample_project(
            &temp_dir,
            "\n[tool.wheelwright.sdist]\nexclude = [\"README.md\"]\n",
        );
        let out_dir = temp_dir.path().join("out");

        let file_name = SdistWriter::new(&project, temp_dir.path())
            .write(&out_dir)
            .unwrap();

        let names = archive_names(&out_dir.join(&file_name));
        assert!(!names.contains(&"my_package-1.2.3/README.md".to_string()));
        assert!(names.contains(&"my_package-1.2.3/pyproject.toml".to_string()));
    }

    #[test]
    fn SdistWriter___write___entries_are_sorted_with_fixed_mtime() {
        let temp_dir = TempDir::new().unwrap();
        let project = sample_project(&temp_dir, "");
        let out_dir = temp_dir.path().join("out");

        let file_name = SdistWriter::new(&project, temp_dir.path())
            .write(&out_dir)
            .unwrap();

        let path = out_dir.join(&file_name);
        let names = archive_names(&path);
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);

        let mut archive = Archive::new(GzDecoder::new(File::open(&path).unwrap()));
        for entry in archive.entries().unwrap() {
            assert_eq!(entry.unwrap().header().mtime().unwrap(), FIXED_MTIME);
        }
    }

    #[test]
    fn SdistWriter___write___ships_license_files_even_when_not_included() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("legal")).unwrap();
        fs::write(temp_dir.path().join("legal/COPYING"), "license").unwrap();
        let project = sample_project(&temp_dir, "license-files = [\"legal/COPYING\"]\n");
        let out_dir = temp_dir.path().join("out");

        let file_name = SdistWriter::new(&project, temp_dir.path())
            .write(&out_dir)
            .unwrap();

        let names = archive_names(&out_dir.join(&file_name));
        assert!(names.contains(&"my_package-1.2.3/legal/COPYING".to_string()));
    }
}
