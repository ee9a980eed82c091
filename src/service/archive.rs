use crate::models::backup_summary::ArchiveStats;
use crate::models::error::{BackupError, Result};
use crate::utils::directory::archive_entry_name;
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::ProgressBar;
use log::{debug, info, warn};
use std::fs::{self, File, Metadata};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use tar::{Builder, Header};
use walkdir::WalkDir;

/// Writes `backup_folder` and everything below it into a gzip compressed tar file.
///
/// Entry names are relative to the folder's parent, so the folder name is the
/// top level entry. The output file is created (or truncated) before anything is
/// walked; if the walk fails the partial file is left where it is.
pub fn write_archive(
    backup_folder: &Path,
    archive_path: &Path,
    progress: Option<&ProgressBar>,
) -> Result<ArchiveStats> {
    let file = File::create(archive_path).map_err(|cause| BackupError::ArchiveCreate {
        path: archive_path.to_path_buf(),
        cause,
    })?;
    let output = fs::canonicalize(archive_path).ok();

    // file <- gzip <- tar. On an early return the builder is dropped first, which
    // terminates the tar stream, then the encoder writes its trailer, then the file closes.
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut builder = Builder::new(encoder);

    let stats = append_tree(&mut builder, backup_folder, output.as_deref(), progress)?;

    let closing_error = |cause| BackupError::Compression {
        path: archive_path.to_path_buf(),
        cause,
    };
    let encoder = builder.into_inner().map_err(closing_error)?;
    let mut writer = encoder.finish().map_err(closing_error)?;
    writer.flush().map_err(closing_error)?;

    info!("Successfully created archive: {}", archive_path.display());
    Ok(stats)
}

fn append_tree<W: Write>(
    builder: &mut Builder<W>,
    root: &Path,
    output: Option<&Path>,
    progress: Option<&ProgressBar>,
) -> Result<ArchiveStats> {
    let mut stats = ArchiveStats::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            BackupError::Compression {
                path,
                cause: err.into(),
            }
        })?;
        let path = entry.path();
        let compression_error = |cause| BackupError::Compression {
            path: path.to_path_buf(),
            cause,
        };

        if entry.file_type().is_file() && is_same_file(path, output) {
            warn!(
                "Skipping {}: it is the archive being written",
                path.display()
            );
            continue;
        }

        let name = archive_entry_name(path, root).ok_or_else(|| {
            compression_error(io::Error::other("entry lies outside the backup folder"))
        })?;
        let meta = entry
            .metadata()
            .map_err(|err| compression_error(err.into()))?;

        debug!("Adding {}", name.display());
        if let Some(pb) = progress {
            pb.set_message(format!("Archiving {}", name.display()));
        }

        append_entry(builder, path, &name, &meta, &mut stats).map_err(compression_error)?;

        if let Some(pb) = progress {
            pb.tick();
        }
    }

    Ok(stats)
}

fn append_entry<W: Write>(
    builder: &mut Builder<W>,
    path: &Path,
    name: &Path,
    meta: &Metadata,
    stats: &mut ArchiveStats,
) -> io::Result<()> {
    let mut header = Header::new_gnu();
    header.set_metadata(meta);

    let file_type = meta.file_type();
    if file_type.is_file() {
        let file = File::open(path)?;
        let len = meta.len();
        header.set_size(len);
        builder.append_data(&mut header, name, SizedReader::new(file, len))?;
        stats.files += 1;
        stats.file_bytes += len;
    } else if file_type.is_symlink() {
        let target = fs::read_link(path)?;
        header.set_size(0);
        builder.append_link(&mut header, name, target)?;
    } else {
        header.set_size(0);
        builder.append_data(&mut header, name, io::empty())?;
        if file_type.is_dir() {
            stats.directories += 1;
        }
    }

    stats.entries += 1;
    Ok(())
}

fn is_same_file(path: &Path, output: Option<&Path>) -> bool {
    let Some(output) = output else {
        return false;
    };
    if path.file_name() != output.file_name() {
        return false;
    }
    fs::canonicalize(path)
        .map(|canonical| canonical == output)
        .unwrap_or(false)
}

/// Yields exactly `remaining` bytes of `inner`, failing if it runs dry early.
/// Keeps the copied content in step with the size already written to the header.
struct SizedReader<R> {
    inner: io::Take<R>,
    remaining: u64,
}

impl<R: Read> SizedReader<R> {
    fn new(inner: R, len: u64) -> Self {
        SizedReader {
            inner: inner.take(len),
            remaining: len,
        }
    }
}

impl<R: Read> Read for SizedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = self.inner.read(buf)?;
        if count == 0 && self.remaining > 0 && !buf.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("file shrank while archiving, {} bytes missing", self.remaining),
            ));
        }
        self.remaining -= count as u64;
        Ok(count)
    }
}
