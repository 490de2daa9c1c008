//! Streaming single-file copy.
//!
//! Stages (each maps to a [`CopyStage`] on failure):
//! - open the source read-only
//! - create or truncate the destination
//! - stream bytes through 1 MiB buffers and flush
//! - close: `sync_all` so late write-back errors surface as a failed copy
//!
//! A failure while streaming leaves the partial destination in place; the
//! source is never touched here.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{CollectError, CopyStage};

const BUF_SIZE: usize = 1024 * 1024; // 1 MiB buffers

/// Copy `src` -> `dest`, returning the number of bytes written.
pub fn copy_streaming(src: &Path, dest: &Path) -> Result<u64, CollectError> {
    let fail = |stage: CopyStage| {
        move |source: io::Error| CollectError::Copy {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            stage,
            source,
        }
    };

    let src_f = File::open(src).map_err(fail(CopyStage::Open))?;
    let dst_f = File::create(dest).map_err(fail(CopyStage::Create))?;

    let mut reader = BufReader::with_capacity(BUF_SIZE, src_f);
    let mut writer = BufWriter::with_capacity(BUF_SIZE, dst_f);
    let bytes = io::copy(&mut reader, &mut writer).map_err(fail(CopyStage::Stream))?;
    writer.flush().map_err(fail(CopyStage::Stream))?;

    let dst_f = writer
        .into_inner()
        .map_err(|e| fail(CopyStage::Stream)(e.into_error()))?;
    dst_f.sync_all().map_err(fail(CopyStage::Close))?;
    drop(dst_f);

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn copy_small_file_ok() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("src.jpg");
        let dst = dir.path().join("dst.jpg");
        fs::write(&src, b"hello world").unwrap();

        let n = copy_streaming(&src, &dst).unwrap();
        assert_eq!(n, 11);
        assert_eq!(fs::read(&dst).unwrap(), b"hello world");
        assert!(src.exists());
    }

    #[test]
    fn copy_zero_length_ok() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("empty.png");
        let dst = dir.path().join("out.png");
        File::create(&src).unwrap();

        assert_eq!(copy_streaming(&src, &dst).unwrap(), 0);
        assert_eq!(fs::metadata(&dst).unwrap().len(), 0);
    }

    #[test]
    fn missing_source_creates_no_destination() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("missing.mov");
        let dst = dir.path().join("out.mov");

        let err = copy_streaming(&src, &dst).unwrap_err();
        assert!(matches!(err, CollectError::Copy { stage: CopyStage::Open, .. }));
        assert!(!dst.exists());
    }

    #[test]
    fn create_failure_reports_create_stage() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("a.avi");
        fs::write(&src, b"data").unwrap();
        let dst = dir.path().join("no_such_dir").join("a.avi");

        let err = copy_streaming(&src, &dst).unwrap_err();
        assert!(matches!(err, CollectError::Copy { stage: CopyStage::Create, .. }));
        assert_eq!(fs::read(&src).unwrap(), b"data");
    }

    #[cfg(unix)]
    #[test]
    fn reading_a_directory_fails_while_streaming() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("folder.jpg");
        fs::create_dir(&src).unwrap();
        let dst = dir.path().join("out.jpg");

        let err = copy_streaming(&src, &dst).unwrap_err();
        assert!(matches!(err, CollectError::Copy { stage: CopyStage::Stream, .. }));
        // Partial destination is left behind, not cleaned up.
        assert!(dst.exists());
    }

    #[test]
    fn large_file_crosses_buffer_boundaries() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("big.mp4");
        let dst = dir.path().join("big.out");
        let size = 2 * BUF_SIZE + 123;
        let data: Vec<u8> = (0..size).map(|i| (i % 251) as u8).collect();
        fs::write(&src, &data).unwrap();

        assert_eq!(copy_streaming(&src, &dst).unwrap() as usize, size);
        assert_eq!(fs::read(&dst).unwrap(), data);
    }
}
