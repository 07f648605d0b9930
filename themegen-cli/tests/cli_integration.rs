use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn themegen_cmd() -> Command {
    Command::cargo_bin("themegen").expect("Failed to find themegen binary")
}

#[test]
fn test_generate_non_existent_input() -> Result<(), Box<dyn Error>> {
    let mut cmd = themegen_cmd();
    cmd.arg("generate").arg("surely/this/does/not/exist");

    cmd.assert()
        .failure()
        .stderr(contains("Invalid input path"));

    Ok(())
}

#[test]
fn test_generate_rejects_non_mp4_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input_file = dir.path().join("not_a_video.txt");
    std::fs::write(&input_file, "dummy content")?;

    let mut cmd = themegen_cmd();
    cmd.arg("generate").arg(&input_file);

    cmd.assert().failure().stderr(contains("not a .mp4 file"));

    Ok(())
}

#[test]
fn test_generate_empty_directory_reports_no_files() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    let mut cmd = themegen_cmd();
    cmd.arg("generate").arg(dir.path());

    cmd.assert()
        .failure()
        .stderr(contains("No processable video files found"));

    Ok(())
}

#[test]
fn test_generate_rejects_out_of_range_quality() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    let mut cmd = themegen_cmd();
    cmd.arg("generate").arg(dir.path()).arg("--quality").arg("0");

    cmd.assert().failure();

    Ok(())
}

#[test]
fn test_help_lists_generate_command() -> Result<(), Box<dyn Error>> {
    let mut cmd = themegen_cmd();
    cmd.arg("--help");

    cmd.assert().success().stdout(contains("generate"));

    Ok(())
}
