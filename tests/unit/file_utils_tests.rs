/*!
 * Tests for file utility functions
 */

use std::fs;
use std::path::Path;
use anyhow::Result;
use lrcproc::errors::LyricFileError;
use lrcproc::file_utils::FileManager;
use crate::common;

/// Test that file_exists distinguishes files from directories
#[test]
fn test_file_exists_withFileAndDirectory_shouldOnlyAcceptFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let test_file = common::create_test_file(temp_dir.path(), "song.lrc", "x")?;

    assert!(FileManager::file_exists(&test_file));
    assert!(!FileManager::file_exists(temp_dir.path()));
    assert!(FileManager::dir_exists(temp_dir.path()));
    assert!(!FileManager::dir_exists("./non_existent_directory_12345"));

    Ok(())
}

/// Test that generate_output_path creates the correct path
#[test]
fn test_generate_output_path_withValidInputs_shouldCreateCorrectPath() {
    let input_file = Path::new("/tmp/input/song.lrc");
    let output_dir = Path::new("/tmp/output");

    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, "formatted", "lrc"),
        Path::new("/tmp/output/song.formatted.lrc")
    );
    assert_eq!(
        FileManager::generate_output_path(input_file, output_dir, "", ".lrc"),
        Path::new("/tmp/output/song.lrc")
    );
}

/// Test recursive, case-insensitive search by extension
#[test]
fn test_find_files_withNestedDirectories_shouldMatchExtension() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    common::create_test_file(temp_dir.path(), "a.lrc", "")?;
    common::create_test_file(temp_dir.path(), "b.LRC", "")?;
    common::create_test_file(temp_dir.path(), "c.txt", "")?;
    common::create_test_file(temp_dir.path(), "sub/d.lrc", "")?;

    let files = FileManager::find_files(temp_dir.path(), ".lrc")?;
    let names: Vec<String> = files.iter()
        .filter_map(|path| path.file_name())
        .map(|name| name.to_string_lossy().to_string())
        .collect();

    assert_eq!(files.len(), 3);
    assert!(names.contains(&"a.lrc".to_string()));
    assert!(names.contains(&"b.LRC".to_string()));
    assert!(names.contains(&"d.lrc".to_string()));

    Ok(())
}

/// Test that a byte order mark is removed on read
#[test]
fn test_read_lyric_file_withBom_shouldStripIt() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "bom.lrc", "\u{feff}[ti:x]")?;

    assert_eq!(FileManager::read_lyric_file(&path)?, "[ti:x]");

    Ok(())
}

/// Test that invalid UTF-8 is replaced instead of failing
#[test]
fn test_read_lyric_file_withInvalidUtf8_shouldReplaceBytes() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("binary.lrc");
    fs::write(&path, [0xff, b'a'])?;

    assert_eq!(FileManager::read_lyric_file(&path)?, "\u{fffd}a");

    Ok(())
}

/// Test the error reported for a missing file
#[test]
fn test_read_lyric_file_withMissingFile_shouldReturnReadError() {
    let result = FileManager::read_lyric_file("missing_file_12345.lrc");
    match result {
        Err(LyricFileError::Read { path, .. }) => assert_eq!(path, Path::new("missing_file_12345.lrc")),
        other => panic!("Expected read error, got {:?}", other),
    }
}

/// Test that writing creates missing parent directories
#[test]
fn test_write_lyric_file_withNestedPath_shouldCreateParents() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("a").join("b").join("out.lrc");

    FileManager::write_lyric_file(&path, "[00:01.000]x\r\n")?;

    assert_eq!(fs::read_to_string(&path)?, "[00:01.000]x\r\n");

    Ok(())
}

/// Test that writing onto a directory reports a write error
#[test]
fn test_write_lyric_file_withDirectoryTarget_shouldReturnWriteError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;

    let result = FileManager::write_lyric_file(temp_dir.path(), "x");
    assert!(matches!(result, Err(LyricFileError::Write { .. })));

    Ok(())
}
