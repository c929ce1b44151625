use std::path::PathBuf;

use dont_touch::highscore::*;

/// Unique scratch file per test so tests can run in parallel.
fn scratch(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "dont_touch_{}_{}.txt",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

#[test]
fn missing_file_loads_as_zero() {
    let path = scratch("missing");
    assert_eq!(load_high_score(&path), 0);
}

#[test]
fn garbage_loads_as_zero() {
    let path = scratch("garbage");
    std::fs::write(&path, "abc").unwrap();
    assert_eq!(load_high_score(&path), 0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn empty_and_negative_load_as_zero() {
    let path = scratch("empty");
    std::fs::write(&path, "").unwrap();
    assert_eq!(load_high_score(&path), 0);
    std::fs::write(&path, "-4").unwrap();
    assert_eq!(load_high_score(&path), 0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn unreadable_bytes_load_as_zero() {
    let path = scratch("not_utf8");
    std::fs::write(&path, [0xff, 0xfe, b'7']).unwrap();
    assert_eq!(load_high_score(&path), 0);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn directory_in_place_of_file_loads_as_zero() {
    let path = scratch("is_a_dir");
    std::fs::create_dir_all(&path).unwrap();
    assert_eq!(load_high_score(&path), 0);
    let _ = std::fs::remove_dir(&path);
}

#[test]
fn surrounding_whitespace_is_ignored() {
    let path = scratch("whitespace");
    std::fs::write(&path, "  42\n").unwrap();
    assert_eq!(load_high_score(&path), 42);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn save_writes_plain_decimal() {
    let path = scratch("plain");
    save_high_score(&path, 1234).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "1234");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn save_overwrites_previous_contents() {
    let path = scratch("overwrite");
    std::fs::write(&path, "999999 and some trailing junk").unwrap();
    save_high_score(&path, 7).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "7");
    assert_eq!(load_high_score(&path), 7);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn save_into_missing_directory_is_an_error() {
    let path = std::env::temp_dir()
        .join(format!("dont_touch_no_such_dir_{}", std::process::id()))
        .join("highscore.txt");
    assert!(save_high_score(&path, 3).is_err());
}

#[test]
fn default_path_is_relative_file() {
    assert_eq!(high_score_path(), PathBuf::from("highscore.txt"));
}
