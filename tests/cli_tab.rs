use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn command_tab_pair() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("mashmat")?;
    let output = cmd.arg("tab").arg("tests/mash/Dist.tab").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 10);
    assert_eq!(stdout.lines().next().unwrap(), "Source\tTarget\tDist");
    assert!(stdout.contains("genome1.faa\tgenome1.faa\t0\n"));
    assert!(stdout.contains("genome1.faa\tgenome2.faa\t0.0222766\n"));
    assert!(stdout.contains("genome2.faa\tgenome1.faa\t0.0222766\n"));
    assert!(stdout.contains("genome3.faa\tgenome2.faa\t0.0981264\n"));

    Ok(())
}

#[test]
fn command_tab_no_header() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("mashmat")?;
    let output = cmd
        .arg("tab")
        .arg("tests/mash/Dist.tab")
        .arg("--no-header")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 9);
    assert!(!stdout.contains("Source"));

    Ok(())
}

#[test]
fn command_tab_matrix() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outfile = temp.path().join("genomes.phy");

    let mut cmd = Command::cargo_bin("mashmat")?;
    cmd.arg("tab")
        .arg("tests/mash/Dist.tab")
        .arg("--mode")
        .arg("matrix")
        .arg("-o")
        .arg(&outfile)
        .assert()
        .success();

    let phy = std::fs::read_to_string(&outfile)?;
    let lines: Vec<&str> = phy.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "3");
    assert_eq!(lines[1], "genome1.faa\t0\t0.0222766\t0.104532");
    assert_eq!(lines[3], "genome3.faa\t0.104532\t0.0981264\t0");

    Ok(())
}

#[test]
fn command_tab_stdin() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("mashmat")?;
    cmd.arg("tab")
        .arg("stdin")
        .write_stdin("#query\ta.fna\tb.fna\na.fna\t0\t0.5\nb.fna\t0.5\t0\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.fna\tb.fna\t0.5\n"));

    Ok(())
}

#[test]
fn command_tab_empty() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let infile = temp.path().join("Dist.tab");
    std::fs::write(&infile, "")?;

    let mut cmd = Command::cargo_bin("mashmat")?;
    cmd.arg("tab")
        .arg(&infile)
        .assert()
        .failure()
        .stderr(predicate::str::contains("is empty"));

    Ok(())
}

#[test]
fn command_tab_malformed() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("mashmat")?;
    cmd.arg("tab")
        .arg("stdin")
        .write_stdin("#query\ta.fna\tb.fna\na.fna\t0\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed distance table at line 2"));

    Ok(())
}
