// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 stepline contributors

//! Artifact packaging
//!
//! Packs the matched files into `<output_dir>/<name>.zip`, keeping their
//! paths relative to the project, and adds a `manifest.json` entry with a
//! BLAKE3 digest per file.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Component, Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::{display_path, resolve_globs};
use crate::errors::{SteplineError, SteplineResult};

/// Manifest entry written at the root of every archive
pub const MANIFEST_FILE: &str = "manifest.json";

/// Contents of an archive
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactManifest {
    pub name: String,
    pub files: Vec<ManifestEntry>,
}

/// One packaged file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Path inside the archive
    pub path: String,
    pub size_bytes: u64,
    pub blake3: String,
}

/// Check that an artifact lands strictly inside the project's output dir
///
/// `name` must be a single plain file name and `output_dir` a relative path
/// without `..`, so `<output_dir>/<name>.zip` can never resolve to (or
/// above) the project root.
pub fn check_artifact_target(output_dir: &Path, name: &str) -> Result<(), String> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => return Err(format!("Artifact name '{}' must be a plain file name", name)),
    }

    if output_dir
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(format!(
            "Output directory '{}' must be a relative path without '..'",
            output_dir.display()
        ));
    }

    Ok(())
}

/// Archive path for an artifact
pub fn archive_path(base_dir: &Path, output_dir: &Path, name: &str) -> PathBuf {
    base_dir.join(output_dir).join(format!("{}.zip", name))
}

/// Package the files matching `patterns` and describe the archive
pub fn build_artifact(
    base_dir: &Path,
    patterns: &[String],
    output_dir: &Path,
    name: &str,
) -> SteplineResult<String> {
    check_artifact_target(output_dir, name).map_err(|reason| SteplineError::InvalidStep {
        step: name.to_string(),
        reason,
    })?;

    let archive = archive_path(base_dir, output_dir, name);
    let files: Vec<PathBuf> = resolve_globs(patterns, base_dir)?
        .into_iter()
        .filter(|f| f != &archive)
        .collect();

    if files.is_empty() {
        return Err(SteplineError::NoInputFiles {
            pattern: patterns.join(", "),
        });
    }

    if let Some(parent) = archive.parent() {
        std::fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
    }

    let file = File::create(&archive).map_err(|e| write_error(&archive, e))?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut manifest = ArtifactManifest {
        name: name.to_string(),
        files: Vec::new(),
    };

    for file in &files {
        let entry_path = entry_path(file, base_dir);
        let bytes = std::fs::read(file).map_err(|e| SteplineError::FileReadError {
            path: file.clone(),
            error: e.to_string(),
        })?;

        writer.start_file(entry_path.as_str(), options)?;
        writer.write_all(&bytes).map_err(|e| write_error(&archive, e))?;

        manifest.files.push(ManifestEntry {
            path: entry_path,
            size_bytes: bytes.len() as u64,
            blake3: blake3::hash(&bytes).to_hex().to_string(),
        });
    }

    writer.start_file(MANIFEST_FILE, options)?;
    writer
        .write_all(serde_json::to_string_pretty(&manifest)?.as_bytes())
        .map_err(|e| write_error(&archive, e))?;
    writer.finish()?;

    let size = std::fs::metadata(&archive)
        .map_err(|e| SteplineError::FileReadError {
            path: archive.clone(),
            error: e.to_string(),
        })?
        .len();

    tracing::debug!(
        archive = %archive.display(),
        files = manifest.files.len(),
        size,
        "artifact written"
    );

    Ok(format!(
        "Artifact: {} ({} files, {:.1} KB)",
        display_path(&archive, base_dir),
        manifest.files.len(),
        size as f64 / 1024.0
    ))
}

/// Location of a source file inside the archive, always `/`-separated
fn entry_path(file: &Path, base_dir: &Path) -> String {
    let relative = match file.strip_prefix(base_dir) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => file
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| file.to_path_buf()),
    };

    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn write_error(path: &Path, e: std::io::Error) -> SteplineError {
    SteplineError::FileWriteError {
        path: path.to_path_buf(),
        error: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("src/nested")).unwrap();
        std::fs::write(temp_dir.path().join("Cargo.toml"), "[package]\n").unwrap();
        std::fs::write(temp_dir.path().join("src/lib.rs"), "pub fn a() {}\n").unwrap();
        std::fs::write(temp_dir.path().join("src/nested/mod.rs"), "// nested\n").unwrap();
        temp_dir
    }

    fn open(path: &Path) -> ZipArchive<File> {
        ZipArchive::new(File::open(path).unwrap()).unwrap()
    }

    fn read_manifest(archive: &mut ZipArchive<File>) -> ArtifactManifest {
        let mut raw = String::new();
        archive
            .by_name(MANIFEST_FILE)
            .unwrap()
            .read_to_string(&mut raw)
            .unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_zip_contains_files_and_manifest() {
        let temp_dir = project();
        let detail = build_artifact(
            temp_dir.path(),
            &["src/**/*.rs".into()],
            Path::new("dist"),
            "demo",
        )
        .unwrap();

        let zip_path = temp_dir.path().join("dist/demo.zip");
        let size_kb = std::fs::metadata(&zip_path).unwrap().len() as f64 / 1024.0;
        assert_eq!(
            detail,
            format!(
                "Artifact: {} (2 files, {:.1} KB)",
                Path::new("dist").join("demo.zip").display(),
                size_kb
            )
        );

        let mut archive = open(&zip_path);
        assert_eq!(archive.len(), 3);

        let mut lib = String::new();
        archive
            .by_name("src/lib.rs")
            .unwrap()
            .read_to_string(&mut lib)
            .unwrap();
        assert_eq!(lib, "pub fn a() {}\n");
        assert!(archive.by_name("src/nested/mod.rs").is_ok());

        let manifest = read_manifest(&mut archive);
        assert_eq!(manifest.name, "demo");
        assert_eq!(manifest.files[0].path, "src/lib.rs");
        assert_eq!(manifest.files[0].size_bytes, 14);
        assert_eq!(
            manifest.files[0].blake3,
            blake3::hash(b"pub fn a() {}\n").to_hex().to_string()
        );
    }

    #[test]
    fn test_rebuild_replaces_archive_and_skips_itself() {
        let temp_dir = project();
        let patterns = ["**/*".to_string()];

        build_artifact(temp_dir.path(), &patterns, Path::new("dist"), "all").unwrap();
        build_artifact(temp_dir.path(), &patterns, Path::new("dist"), "all").unwrap();

        let mut archive = open(&temp_dir.path().join("dist/all.zip"));
        let manifest = read_manifest(&mut archive);
        let paths: Vec<_> = manifest.files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["Cargo.toml", "src/lib.rs", "src/nested/mod.rs"]);
    }

    #[test]
    fn test_escaping_targets_are_refused_and_project_survives() {
        let temp_dir = project();
        let patterns = ["src/*.rs".to_string()];

        for (output_dir, name) in [("dist", ".."), ("dist", "."), ("dist", "a/b"), ("..", "x"), ("/tmp", "x")] {
            for _ in 0..2 {
                let err = build_artifact(temp_dir.path(), &patterns, Path::new(output_dir), name)
                    .unwrap_err();
                assert!(
                    matches!(err, SteplineError::InvalidStep { .. }),
                    "{output_dir}/{name}: {err:?}"
                );
            }
        }

        assert!(temp_dir.path().join("Cargo.toml").exists());
        assert!(temp_dir.path().join("src/lib.rs").exists());
        assert!(!temp_dir.path().join(MANIFEST_FILE).exists());
    }

    #[test]
    fn test_check_artifact_target() {
        assert!(check_artifact_target(Path::new("dist"), "demo").is_ok());
        assert!(check_artifact_target(Path::new("./build/out"), "demo").is_ok());
        assert!(check_artifact_target(Path::new("."), "src").is_ok());
        assert!(check_artifact_target(Path::new("dist"), "").is_err());
        assert!(check_artifact_target(Path::new("dist"), "..").is_err());
        assert!(check_artifact_target(Path::new("dist/../.."), "demo").is_err());
    }

    #[test]
    fn test_no_inputs_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = build_artifact(temp_dir.path(), &["*.rs".into()], Path::new("dist"), "demo")
            .unwrap_err();
        assert!(matches!(err, SteplineError::NoInputFiles { .. }));
    }
}
