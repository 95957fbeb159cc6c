#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

// Stand-in for mash. The sketch is a copy of the input list; distances are
// 0.01 * |i - j| between list positions i and j. Every call is logged.
// `dist` exits 3 while a `fail_dist` file sits next to the script.
const FAKE_MASH: &str = r##"#!/bin/sh
log="${0%/*}/calls.log"
cmd="$1"; shift
case "$cmd" in
  --version)
    echo "2.3"
    ;;
  sketch)
    list=""; out=""; aa=0
    while [ $# -gt 0 ]; do
      case "$1" in
        -l) list="$2"; shift 2 ;;
        -o) out="$2"; shift 2 ;;
        -a) aa=1; shift ;;
        *) shift ;;
      esac
    done
    echo "sketch aa=$aa" >> "$log"
    cp "$list" "$out.msh"
    ;;
  dist)
    if [ -e "${0%/*}/fail_dist" ]; then
      echo "dist boom" >&2
      exit 3
    fi
    sketch=""
    while [ $# -gt 0 ]; do
      case "$1" in
        -p) shift 2 ;;
        -t) shift ;;
        *) sketch="$1"; shift ;;
      esac
    done
    echo "dist" >> "$log"
    awk '{ f[NR] = $0 }
      END {
        h = "#query"
        for (i = 1; i <= NR; i++) h = h "\t" f[i]
        print h
        for (i = 1; i <= NR; i++) {
          r = f[i]
          for (j = 1; j <= NR; j++) { d = i - j; if (d < 0) d = -d; r = r "\t" (d * 0.01) }
          print r
        }
      }' "$sketch"
    ;;
  *)
    echo "unknown command $cmd" >&2
    exit 1
    ;;
esac
"##;

const FAILING_MASH: &str = r#"#!/bin/sh
echo "ERROR: Could not open genome file" >&2
exit 1
"#;

fn write_script(dir: &Path, content: &str) -> anyhow::Result<PathBuf> {
    let path = dir.join("mash");
    fs::write(&path, content)?;
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755))?;
    Ok(path)
}

/// A working fake mash in its own directory
pub fn fake_mash(dir: &Path) -> anyhow::Result<PathBuf> {
    write_script(dir, FAKE_MASH)
}

/// A mash that always fails
pub fn failing_mash(dir: &Path) -> anyhow::Result<PathBuf> {
    write_script(dir, FAILING_MASH)
}

/// Makes the fake mash in `dir` fail on `dist`
pub fn fail_dist(dir: &Path) -> anyhow::Result<()> {
    fs::write(dir.join("fail_dist"), "")?;
    Ok(())
}

/// Calls logged by the fake mash in `dir`
pub fn calls(dir: &Path) -> Vec<String> {
    fs::read_to_string(dir.join("calls.log"))
        .unwrap_or_default()
        .lines()
        .map(|l| l.to_string())
        .collect()
}

/// Writes `g1.<ext>`..`gn.<ext>` into `dir`
pub fn genomes(dir: &Path, ext: &str, n: usize) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = vec![];
    for i in 1..=n {
        let path = dir.join(format!("g{}.{}", i, ext));
        fs::write(&path, format!(">seq{}\nACGTACGTAA\n", i))?;
        files.push(path);
    }
    Ok(files)
}

/// The single `*_mash` workspace under `root`
pub fn workspace(root: &Path) -> anyhow::Result<PathBuf> {
    let mut dirs = vec![];
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() && path.to_string_lossy().ends_with("_mash") {
            dirs.push(path);
        }
    }
    anyhow::ensure!(dirs.len() == 1, "expected one workspace, found {}", dirs.len());
    Ok(dirs.remove(0))
}
