//! HWPX container handling - extracts a template, rewrites its section XML and
//! packs a new archive.
//!
//! The template is only ever read. Work happens in a private scratch
//! directory and the result is written to a temporary file next to the
//! destination, which is renamed into place once the archive is complete.

mod template;

pub use self::template::{write_sample_template, SAMPLE_SECTION_XML};

use crate::error::{zip_to_io, Error};
use crate::Result;
use std::fs::{self, File};
use std::io::{self, Read, Seek, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Entry that must come first and uncompressed.
pub const MIMETYPE_ENTRY: &str = "mimetype";

/// Content of the mimetype entry.
pub const HWPX_MIMETYPE: &str = "application/hwp+zip";

/// Directory holding the XML payload.
pub const CONTENTS_DIR: &str = "Contents/";

fn stored() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Stored)
}

fn deflated() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Whether an entry is section XML that may contain placeholders.
pub fn is_text_entry(name: &str) -> bool {
    name.starts_with(CONTENTS_DIR) && name.to_ascii_lowercase().ends_with(".xml")
}

#[derive(Debug, Clone)]
struct ManifestEntry {
    name: String,
    path: PathBuf,
    is_dir: bool,
}

/// Builds new HWPX archives from a template.
#[derive(Debug, Clone, Default)]
pub struct ContainerAssembler {
    scratch_root: Option<PathBuf>,
}

impl ContainerAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates scratch directories under `root` instead of the system temp dir.
    pub fn with_scratch_root(root: Option<PathBuf>) -> Self {
        Self { scratch_root: root }
    }

    /// Copies `template` to `output`, passing every section XML entry through
    /// `rewrite`. `rewrite` returns `None` to keep an entry byte-for-byte.
    pub fn assemble<F>(&self, template: &Path, output: &Path, mut rewrite: F) -> Result<PathBuf>
    where
        F: FnMut(&str, &str) -> Option<String>,
    {
        let file = open_template(template)?;
        if same_file(template, output) {
            return Err(Error::write_failure(
                output,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "output path is the template itself",
                ),
            ));
        }
        let mut archive = ZipArchive::new(file).map_err(Error::corrupt_archive)?;
        let manifest = read_manifest(&mut archive)?;

        let scratch = self.scratch_dir()?;
        log::debug!(
            "extracting {} entries from {} into {}",
            manifest.len(),
            template.display(),
            scratch.path().display()
        );
        extract(&mut archive, &manifest, scratch.path())?;

        for entry in manifest.iter().filter(|e| !e.is_dir && is_text_entry(&e.name)) {
            let path = scratch.path().join(&entry.path);
            let bytes = fs::read(&path).map_err(|e| Error::write_failure(&path, e))?;
            let Ok(xml) = String::from_utf8(bytes) else {
                log::warn!("{} is not UTF-8, copying it unchanged", entry.name);
                continue;
            };
            if let Some(rewritten) = rewrite(&entry.name, &xml) {
                log::debug!("rewrote {}", entry.name);
                fs::write(&path, rewritten).map_err(|e| Error::write_failure(&path, e))?;
            }
        }

        write_output(&manifest, scratch.path(), output)?;
        log::info!("wrote {}", output.display());
        Ok(output.to_path_buf())
    }

    fn scratch_dir(&self) -> Result<tempfile::TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("hwpx-work-");
        match &self.scratch_root {
            Some(root) => {
                fs::create_dir_all(root).map_err(|e| Error::write_failure(root, e))?;
                builder
                    .tempdir_in(root)
                    .map_err(|e| Error::write_failure(root, e))
            }
            None => builder
                .tempdir()
                .map_err(|e| Error::write_failure(std::env::temp_dir(), e)),
        }
    }
}

fn open_template(template: &Path) -> Result<File> {
    let missing = |source| Error::MissingTemplate {
        path: template.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(template).map_err(missing)?;
    if !metadata.is_file() {
        return Err(missing(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a regular file",
        )));
    }
    File::open(template).map_err(missing)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn read_manifest<R: Read + Seek>(archive: &mut ZipArchive<R>) -> Result<Vec<ManifestEntry>> {
    let mut manifest = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(Error::corrupt_archive)?;
        let Some(path) = entry.enclosed_name() else {
            return Err(Error::ArchiveCorruption(format!(
                "entry {:?} escapes the archive root",
                entry.name()
            )));
        };
        manifest.push(ManifestEntry {
            name: entry.name().to_string(),
            path,
            is_dir: entry.is_dir(),
        });
    }

    if !manifest.iter().any(|e| e.name == MIMETYPE_ENTRY) {
        return Err(Error::ArchiveCorruption(format!(
            "missing `{MIMETYPE_ENTRY}` entry"
        )));
    }
    Ok(manifest)
}

fn extract<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    manifest: &[ManifestEntry],
    root: &Path,
) -> Result<()> {
    for (index, info) in manifest.iter().enumerate() {
        let dest = root.join(&info.path);
        if info.is_dir {
            fs::create_dir_all(&dest).map_err(|e| Error::write_failure(&dest, e))?;
            continue;
        }

        let mut entry = archive.by_index(index).map_err(Error::corrupt_archive)?;
        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data).map_err(|e| {
            Error::ArchiveCorruption(format!("cannot read entry {}: {e}", info.name))
        })?;

        if info.name == MIMETYPE_ENTRY && data != HWPX_MIMETYPE.as_bytes() {
            log::warn!(
                "unexpected mimetype {:?}, keeping it as is",
                String::from_utf8_lossy(&data)
            );
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::write_failure(parent, e))?;
        }
        fs::write(&dest, &data).map_err(|e| Error::write_failure(&dest, e))?;
    }
    Ok(())
}

/// Packs the scratch tree into a temp file beside `output`, then renames it.
fn write_output(manifest: &[ManifestEntry], root: &Path, output: &Path) -> Result<()> {
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| Error::write_failure(parent, e))?;

    let mut staged = tempfile::Builder::new()
        .prefix(".hwpx-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| Error::write_failure(output, e))?;

    write_archive(staged.as_file_mut(), manifest, root)
        .and_then(|file| file.sync_all())
        .map_err(|e| Error::write_failure(output, e))?;

    staged
        .persist(output)
        .map_err(|e| Error::write_failure(output, e.error))?;
    Ok(())
}

fn write_archive<W: Write + Seek>(
    writer: W,
    manifest: &[ManifestEntry],
    root: &Path,
) -> io::Result<W> {
    let mut zip = ZipWriter::new(writer);

    zip.start_file(MIMETYPE_ENTRY, stored()).map_err(zip_to_io)?;
    zip.write_all(&fs::read(root.join(MIMETYPE_ENTRY))?)?;

    for entry in manifest.iter().filter(|e| e.name != MIMETYPE_ENTRY) {
        if entry.is_dir {
            zip.add_directory(entry.name.as_str(), deflated())
                .map_err(zip_to_io)?;
            continue;
        }
        zip.start_file(entry.name.as_str(), deflated())
            .map_err(zip_to_io)?;
        zip.write_all(&fs::read(root.join(&entry.path))?)?;
    }

    let mut writer = zip.finish().map_err(zip_to_io)?;
    writer.flush()?;
    Ok(writer)
}
