use crate::libs::error::MashError;
use crate::libs::input::SeqType;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const WORKSPACE_SUFFIX: &str = "_mash";
pub const INPUT_LIST: &str = "input_mash.txt";
pub const SKETCH_STEM: &str = "all";
pub const SKETCH_FILE: &str = "all.msh";
pub const DIST_TABLE: &str = "Dist.tab";

/// Parameters that change the content of a sketch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SketchParams {
    pub seq_type: SeqType,
    pub sketch_size: usize,
    pub kmer: usize,
}

/// Absolute form of `path`, without resolving symlinks so basenames survive.
pub fn absolute(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Cache key of an input set.
///
/// Paths are made absolute and sorted, so the same files in any order share a
/// key. Sketch parameters are part of the key; thread count is not.
///
/// ```
/// use mashmat::libs::input::SeqType;
/// use mashmat::libs::workspace::{workspace_key, SketchParams};
/// use std::path::PathBuf;
///
/// let params = SketchParams { seq_type: SeqType::Protein, sketch_size: 1000, kmer: 21 };
/// let ab = vec![PathBuf::from("/a/g1.faa"), PathBuf::from("/a/g2.faa")];
/// let ba = vec![PathBuf::from("/a/g2.faa"), PathBuf::from("/a/g1.faa")];
/// assert_eq!(workspace_key(&ab, &params).unwrap(), workspace_key(&ba, &params).unwrap());
/// assert_eq!(workspace_key(&ab, &params).unwrap().len(), 16);
/// ```
pub fn workspace_key(files: &[PathBuf], params: &SketchParams) -> std::io::Result<String> {
    let paths = sorted_absolute(files)?;

    let mut buf: Vec<u8> = vec![];
    for path in &paths {
        buf.extend_from_slice(&path_bytes(path));
        buf.push(b'\n');
    }
    buf.extend_from_slice(
        format!(
            "type={}\tsketch={}\tkmer={}\n",
            params.seq_type, params.sketch_size, params.kmer
        )
        .as_bytes(),
    );

    Ok(format!("{:016x}", xxhash_rust::xxh3::xxh3_64(&buf)))
}

/// Raw bytes of a path, so non-UTF-8 names reach mash and the key unchanged.
#[cfg(unix)]
pub fn path_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
pub fn path_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().as_bytes().to_vec()
}

fn sorted_absolute(files: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut paths = files
        .iter()
        .map(|f| absolute(f))
        .collect::<std::io::Result<Vec<_>>>()?;
    paths.sort();
    paths.dedup();
    Ok(paths)
}

/// `<root>/<key>_mash/` and the files `mash` reads and writes there.
#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
    key: String,
    files: Vec<PathBuf>,
}

impl Workspace {
    /// Locates the workspace for `files` under `root` without creating anything.
    pub fn locate(root: &Path, files: &[PathBuf], params: &SketchParams) -> Result<Self, MashError> {
        let key = workspace_key(files, params)?;
        let dir = root.join(format!("{}{}", key, WORKSPACE_SUFFIX));

        Ok(Workspace {
            dir,
            key,
            files: sorted_absolute(files)?,
        })
    }

    /// Creates the directory if needed and writes the input list into it.
    pub fn open(root: &Path, files: &[PathBuf], params: &SketchParams) -> Result<Self, MashError> {
        let ws = Self::locate(root, files, params)?;
        std::fs::create_dir_all(&ws.dir)?;
        ws.write_input_list()?;
        log::info!("Workspace {}", ws.dir.display());

        Ok(ws)
    }

    // Written through a temp file so a concurrent reader never sees half a list
    fn write_input_list(&self) -> std::io::Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        for file in &self.files {
            tmp.write_all(&path_bytes(file))?;
            tmp.write_all(b"\n")?;
        }
        tmp.flush()?;
        tmp.persist(self.input_list()).map_err(|e| e.error)?;
        Ok(())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Absolute input paths in list order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn input_list(&self) -> PathBuf {
        self.dir.join(INPUT_LIST)
    }

    /// Value for `mash sketch -o`; mash appends `.msh`
    pub fn sketch_stem(&self) -> PathBuf {
        self.dir.join(SKETCH_STEM)
    }

    pub fn sketch_path(&self) -> PathBuf {
        self.dir.join(SKETCH_FILE)
    }

    pub fn table_path(&self) -> PathBuf {
        self.dir.join(DIST_TABLE)
    }

    /// The cached sketch, if it exists and no input is newer than it.
    pub fn cached_sketch(&self) -> std::io::Result<Option<PathBuf>> {
        let sketch = self.sketch_path();
        if !sketch.is_file() {
            return Ok(None);
        }

        let built = std::fs::metadata(&sketch)?.modified()?;
        for file in &self.files {
            let modified = std::fs::metadata(file)?.modified()?;
            if modified > built {
                log::info!("{} changed since the sketch was built", file.display());
                return Ok(None);
            }
        }

        Ok(Some(sketch))
    }

    /// Drops the cached sketch so the next run rebuilds it.
    pub fn invalidate(&self) -> std::io::Result<()> {
        let sketch = self.sketch_path();
        if sketch.exists() {
            std::fs::remove_file(&sketch)?;
        }
        Ok(())
    }
}
