/*!
 * Tests for file utility functions
 */

use std::fs;
use anyhow::Result;
use srtshift::file_utils::FileManager;
use crate::common;

/// Test that ensure_dir creates directories as needed
#[test]
fn test_ensure_dir_withNonExistentDir_shouldCreateDirectory() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_subdir = temp_dir.path().join("a").join("b");

    FileManager::ensure_dir(&test_subdir)?;

    assert!(test_subdir.is_dir());

    Ok(())
}

/// Test that read_to_string drops a byte order mark
#[test]
fn test_read_to_string_withBom_shouldStripIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bom.srt", "\u{feff}1\nhello")?;

    assert_eq!(FileManager::read_to_string(&path)?, "1\nhello");

    Ok(())
}

/// Test that read_to_string names the file in its error
#[test]
fn test_read_to_string_withMissingFile_shouldMentionPath() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let missing = temp_dir.path().join("missing.srt");

    let err = FileManager::read_to_string(&missing).unwrap_err();
    assert!(format!("{:#}", err).contains("missing.srt"));

    Ok(())
}

/// Test that read_to_string refuses invalid UTF-8
#[test]
fn test_read_to_string_withInvalidUtf8_shouldFail() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("latin1.srt");
    fs::write(&path, [0x31, 0x0a, 0xe9, 0x0a])?;

    assert!(FileManager::read_to_string(&path).is_err());

    Ok(())
}

/// Test that write_to_file creates parent directories
#[test]
fn test_write_to_file_withMissingParent_shouldCreateIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("out.srt");

    FileManager::write_to_file(&path, "content")?;

    assert_eq!(fs::read_to_string(&path)?, "content");

    Ok(())
}
