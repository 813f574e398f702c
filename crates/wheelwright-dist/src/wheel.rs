//! Wheel archive assembly.
//!
//! The [`WheelWriter`] collects pure-source package trees and the staged
//! compiled artifacts, generates the dist-info metadata directory, and
//! serializes everything into one deterministic zip archive.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use wheelwright_core::{ResolvedProject, WheelPackage, patterns};

use crate::record::Record;
use crate::{DistError, DistResult, WheelTag, metadata};

/// Licenses subdirectory inside dist-info.
const LICENSES_DIR: &str = "licenses";

/// Source of one archive entry.
#[derive(Debug)]
enum EntrySource {
    File(PathBuf),
    Bytes(Vec<u8>),
}

/// Deterministic wheel writer.
///
/// Entries are kept sorted by archive path; timestamps are pinned to the
/// zip epoch and permissions restricted to regular vs executable, so two
/// builds from identical inputs produce byte-identical archives. The
/// integrity record is computed over every entry and written last.
pub struct WheelWriter<'a> {
    project: &'a ResolvedProject,
    tag: WheelTag,
    entries: BTreeMap<String, EntrySource>,
}

impl<'a> WheelWriter<'a> {
    #[must_use]
    pub fn new(project: &'a ResolvedProject, tag: WheelTag) -> Self {
        Self {
            project,
            tag,
            entries: BTreeMap::new(),
        }
    }

    /// Stage every file of a pure-source package directory, rooted at the
    /// package's import name.
    pub fn add_package_tree(&mut self, package: &WheelPackage) -> DistResult<()> {
        for entry in WalkDir::new(&package.dir).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(&package.dir) else {
                continue;
            };
            let archive_path = format!("{}/{}", package.name, patterns::to_slash(rel));
            self.add_file(archive_path, entry.path().to_path_buf())?;
        }
        Ok(())
    }

    /// Merge the orchestrator's staging tree of compiled artifacts.
    ///
    /// A collision with a pure-source file is a format violation, not a
    /// silent overwrite.
    pub fn add_staged(&mut self, staging: &crate::StagingTree) -> DistResult<()> {
        for (path, source) in staging.iter() {
            self.add_file(path.to_string(), source.to_path_buf())?;
        }
        Ok(())
    }

    fn add_file(&mut self, archive_path: String, source: PathBuf) -> DistResult<()> {
        self.check_path(&archive_path)?;
        self.entries.insert(archive_path, EntrySource::File(source));
        Ok(())
    }

    fn add_bytes(&mut self, archive_path: String, contents: Vec<u8>) -> DistResult<()> {
        self.check_path(&archive_path)?;
        self.entries
            .insert(archive_path, EntrySource::Bytes(contents));
        Ok(())
    }

    fn check_path(&self, archive_path: &str) -> DistResult<()> {
        if archive_path.starts_with('/') || archive_path.split('/').any(|c| c == "..") {
            return Err(DistError::Format(format!(
                "archive path must be relative: {archive_path}"
            )));
        }
        if self.entries.contains_key(archive_path) {
            return Err(DistError::DuplicateEntry(archive_path.to_string()));
        }
        Ok(())
    }

    /// dist-info directory name for this distribution.
    #[must_use]
    pub fn dist_info_dir(&self) -> String {
        format!(
            "{}-{}.dist-info",
            self.project.normalized_name, self.project.version
        )
    }

    /// Wheel filename for this distribution.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{}-{}-{}.whl",
            self.project.normalized_name, self.project.version, self.tag
        )
    }

    /// Write the archive into `output_dir`, returning its filename.
    ///
    /// The archive is first written to a temporary sibling and renamed
    /// into place on success only, so a failure never leaves a partial
    /// wheel at the target path.
    pub fn write(mut self, output_dir: &Path) -> DistResult<String> {
        self.add_dist_info()?;

        let file_name = self.file_name();
        fs::create_dir_all(output_dir)?;
        let tmp_path = output_dir.join(format!(".{file_name}.tmp"));
        let target_path = output_dir.join(&file_name);

        let result = self.write_archive(&tmp_path);
        match result {
            Ok(()) => {
                fs::rename(&tmp_path, &target_path)?;
                info!(wheel = %file_name, entries = self.entries.len() + 1, "wrote wheel archive");
                Ok(file_name)
            }
            Err(err) => {
                let _ = fs::remove_file(&tmp_path);
                Err(err)
            }
        }
    }

    fn add_dist_info(&mut self) -> DistResult<()> {
        let dist_info = self.dist_info_dir();
        self.add_bytes(
            format!("{dist_info}/METADATA"),
            metadata::core_metadata(self.project).into_bytes(),
        )?;
        self.add_bytes(
            format!("{dist_info}/WHEEL"),
            metadata::wheel_descriptor(&self.tag).into_bytes(),
        )?;
        for license_file in &self.project.license_files {
            self.add_file(
                format!("{dist_info}/{LICENSES_DIR}/{}", license_file.rel_path),
                license_file.source.clone(),
            )?;
        }
        Ok(())
    }

    fn write_archive(&self, tmp_path: &Path) -> DistResult<()> {
        let record_path = format!("{}/RECORD", self.dist_info_dir());
        let mut record = Record::new();

        let file = File::create(tmp_path)?;
        let mut zip = ZipWriter::new(file);

        for (path, source) in &self.entries {
            let (contents, executable) = match source {
                EntrySource::File(source_path) => {
                    (fs::read(source_path)?, is_executable(source_path))
                }
                EntrySource::Bytes(bytes) => (bytes.clone(), false),
            };
            zip.start_file(path, entry_options(executable))?;
            zip.write_all(&contents)?;
            record.push(path, &contents);
            debug!(path = %path, bytes = contents.len(), "added wheel entry");
        }

        // the integrity record goes last, with its self-referential line
        let rendered = record.render(&record_path);
        zip.start_file(&record_path, entry_options(false))?;
        zip.write_all(rendered.as_bytes())?;

        zip.finish()?;
        Ok(())
    }
}

/// Materialize just the dist-info directory into `output_dir`
/// (metadata-only builds). Returns the directory name.
///
/// The directory carries the same METADATA, WHEEL, licenses and RECORD
/// files a full wheel build would produce, minus any compiled content.
pub fn write_metadata_dir(
    project: &ResolvedProject,
    tag: &WheelTag,
    output_dir: &Path,
) -> DistResult<String> {
    let dist_info = format!("{}-{}.dist-info", project.normalized_name, project.version);
    let root = output_dir.join(&dist_info);
    fs::create_dir_all(&root)?;

    let mut record = Record::new();
    let mut write_entry = |rel: &str, contents: &[u8]| -> DistResult<()> {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        record.push(&format!("{dist_info}/{rel}"), contents);
        Ok(())
    };

    write_entry("METADATA", metadata::core_metadata(project).as_bytes())?;
    write_entry("WHEEL", metadata::wheel_descriptor(tag).as_bytes())?;
    for license_file in &project.license_files {
        let contents = fs::read(&license_file.source)?;
        write_entry(
            &format!("{LICENSES_DIR}/{}", license_file.rel_path),
            &contents,
        )?;
    }

    let record_path = format!("{dist_info}/RECORD");
    fs::write(root.join("RECORD"), record.render(&record_path))?;

    info!(dist_info = %dist_info, "wrote metadata directory");
    Ok(dist_info)
}

/// Normalized zip entry options: deflate, fixed timestamp, restricted
/// permission bits. Generic archive writers do not guarantee any of this
/// by default, so determinism is enforced here rather than assumed.
fn entry_options(executable: bool) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(if executable { 0o755 } else { 0o644 })
}

#[cfg(unix)]
pub(crate) fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
pub(crate) fn is_executable(_path: &Path) -> bool {
    false
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use crate::StagingTree;
    use std::io::Read;
    use tempfile::TempDir;

    fn sample_project(temp_dir: &TempDir) -> ResolvedProject {
        fs::write(
            temp_dir.path().join("pyproject.toml"),
            "[project]\nname = \"my-package\"\nversion = \"1.2.3\"\n",
        )
        .unwrap();
        ResolvedProject::resolve(temp_dir.path()).unwrap()
    }

    fn read_archive(path: &Path) -> Vec<(String, Vec<u8>)> {
        let mut archive = zip::ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut entries = Vec::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).unwrap();
            entries.push((entry.name().to_string(), contents));
        }
        entries
    }

    #[test]
    fn WheelWriter___file_name___embeds_tag_triple() {
        let temp_dir = TempDir::new().unwrap();
        let project = sample_project(&temp_dir);

        let writer = WheelWriter::new(&project, WheelTag::universal());

        assert_eq!(writer.file_name(), "my_package-1.2.3-py3-none-any.whl");
        assert_eq!(writer.dist_info_dir(), "my_package-1.2.3.dist-info");
    }

    #[test]
    fn WheelWriter___write___produces_sorted_entries_with_record_last() {
        let temp_dir = TempDir::new().unwrap();
        let project = sample_project(&temp_dir);
        let out_dir = temp_dir.path().join("out");

        let src = temp_dir.path().join("module.py");
        fs::write(&src, b"x = 1\n").unwrap();
        let mut staging = StagingTree::new();
        staging
            .insert("my_package/module.py".to_string(), src)
            .unwrap();

        let mut writer = WheelWriter::new(&project, WheelTag::universal());
        writer.add_staged(&staging).unwrap();
        let file_name = writer.write(&out_dir).unwrap();

        let entries = read_archive(&out_dir.join(&file_name));
        let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            [
                "my_package-1.2.3.dist-info/METADATA",
                "my_package-1.2.3.dist-info/WHEEL",
                "my_package/module.py",
                "my_package-1.2.3.dist-info/RECORD",
            ]
        );
        // no temporary file left behind
        assert!(!out_dir.join(format!(".{file_name}.tmp")).exists());
    }

    #[test]
    fn WheelWriter___write___pins_entry_timestamps() {
        let temp_dir = TempDir::new().unwrap();
        let project = sample_project(&temp_dir);
        let out_dir = temp_dir.path().join("out");

        let writer = WheelWriter::new(&project, WheelTag::universal());
        let file_name = writer.write(&out_dir).unwrap();

        let mut archive =
            zip::ZipArchive::new(File::open(out_dir.join(&file_name)).unwrap()).unwrap();
        for i in 0..archive.len() {
            let entry = archive.by_index(i).unwrap();
            let dt = entry.last_modified().unwrap();
            assert_eq!((dt.year(), dt.month(), dt.day()), (1980, 1, 1));
        }
    }

    #[test]
    fn WheelWriter___add_staged___rejects_collision_with_source_file() {
        let temp_dir = TempDir::new().unwrap();
        let project = sample_project(&temp_dir);

        let pkg_dir = temp_dir.path().join("src/my_package");
        fs::create_dir_all(&pkg_dir).unwrap();
        fs::write(pkg_dir.join("__init__.py"), "").unwrap();
        let package = WheelPackage {
            name: "my_package".to_string(),
            dir: pkg_dir,
        };

        let mut staging = StagingTree::new();
        staging
            .insert(
                "my_package/__init__.py".to_string(),
                temp_dir.path().join("other.py"),
            )
            .unwrap();

        let mut writer = WheelWriter::new(&project, WheelTag::universal());
        writer.add_package_tree(&package).unwrap();
        let result = writer.add_staged(&staging);

        assert!(matches!(result, Err(DistError::DuplicateEntry(_))));
    }

    #[test]
    fn write_metadata_dir___writes_dist_info_with_record() {
        let temp_dir = TempDir::new().unwrap();
        let project = sample_project(&temp_dir);
        let out_dir = temp_dir.path().join("meta");

        let name = write_metadata_dir(&project, &WheelTag::universal(), &out_dir).unwrap();

        assert_eq!(name, "my_package-1.2.3.dist-info");
        let root = out_dir.join(&name);
        assert!(root.join("METADATA").is_file());
        assert!(root.join("WHEEL").is_file());
        let record = fs::read_to_string(root.join("RECORD")).unwrap();
        assert!(record.contains("my_package-1.2.3.dist-info/METADATA,sha256="));
        assert!(record.ends_with("my_package-1.2.3.dist-info/RECORD,,\n"));
    }
}
