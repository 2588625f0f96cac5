use log::{debug, warn};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use super::encode::EncodeError;
use crate::error::Error;

/**
 * Reads the whole firmware payload. The buffer is sized from the file's
 * metadata up front, so a file too large to hold is reported as an
 * allocation failure rather than aborting.
 */
pub fn read_payload(path: &Path) -> Result<Vec<u8>, Error> {
    let meta = fs::metadata(path).map_err(|source| Error::Stat {
        path: path.to_path_buf(),
        source,
    })?;
    let mut file = File::open(path).map_err(|source| Error::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;

    let size = usize::try_from(meta.len())
        .map_err(|_| EncodeError::AllocationFailed { size: usize::MAX })?;
    let mut payload: Vec<u8> = Vec::new();
    payload
        .try_reserve_exact(size)
        .map_err(|_| EncodeError::AllocationFailed { size })?;

    file.read_to_end(&mut payload).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Read {} bytes from {}", payload.len(), path.display());
    Ok(payload)
}

/**
 * An output file that is deleted again unless it is committed. Dropping the
 * guard on an error path unlinks the path, so a failed run never leaves a
 * truncated image behind.
 */
pub struct PartialOutput {
    path: PathBuf,
    file: File,
    committed: bool,
}

impl PartialOutput {
    pub fn create(path: &Path) -> Result<Self, Error> {
        let file = File::create(path).map_err(|source| Error::OpenOutput {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
            committed: false,
        })
    }

    pub fn write_all(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.file.write_all(bytes).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })
    }

    /// Flushes the file and keeps it on disk; the handle closes with the guard.
    pub fn commit(mut self) -> Result<(), Error> {
        self.file.flush().map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for PartialOutput {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        // The handle is still open here; std opens files with delete sharing
        match fs::remove_file(&self.path) {
            Ok(()) => debug!("Removed partial output {}", self.path.display()),
            Err(e) => warn!("Could not remove {}: {}", self.path.display(), e),
        }
    }
}

/// Writes `image` to `path` as a single block.
pub fn write_image(path: &Path, image: &[u8]) -> Result<(), Error> {
    let mut out = PartialOutput::create(path)?;
    out.write_all(image)?;
    out.commit()?;
    debug!("Wrote {} bytes to {}", image.len(), path.display());
    Ok(())
}

//----------------------------------------------------------------------------
// Tests
//----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fw.bin");
        let data: Vec<u8> = (0..5000u32).map(|x| (x * 7) as u8).collect();
        fs::write(&path, &data).unwrap();

        assert_eq!(read_payload(&path).unwrap(), data);
    }

    #[test]
    fn reads_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        fs::write(&path, b"").unwrap();

        assert!(read_payload(&path).unwrap().is_empty());
    }

    #[test]
    fn missing_input_is_a_stat_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.bin");

        let err = read_payload(&path).unwrap_err();
        assert!(matches!(err, Error::Stat { .. }));
        assert!(err.to_string().starts_with("stat failed on "));
    }

    #[test]
    fn committed_output_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        write_image(&path, &[1, 2, 3]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn existing_output_is_truncated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        fs::write(&path, vec![0xee; 64]).unwrap();

        write_image(&path, &[9]).unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![9]);
    }

    #[test]
    fn uncommitted_output_is_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        {
            let mut out = PartialOutput::create(&path).unwrap();
            out.write_all(&[0xaa; 16]).unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn every_write_reaches_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        let mut out = PartialOutput::create(&path).unwrap();
        out.write_all(&[1, 2]).unwrap();
        out.write_all(&[3]).unwrap();
        out.commit().unwrap();
        assert_eq!(fs::read(&path).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn output_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.bin");

        let err = write_image(&path, &[0]).unwrap_err();
        assert!(matches!(err, Error::OpenOutput { .. }));
        assert!(!path.exists());
    }
}
