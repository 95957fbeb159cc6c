use crate::libs::error::MashError;
use crate::libs::workspace::{SketchParams, Workspace};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::str::FromStr;

/// Platforms with a bundled `mash` build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    MacOs,
}

impl Platform {
    /// File name of the bundled executable inside a bin directory
    pub fn bundled_name(&self) -> &'static str {
        match self {
            Platform::Linux => "mash-Linux64",
            Platform::MacOs => "mash-OSX64",
        }
    }

    /// The platform this binary was compiled for
    pub fn host() -> Result<Self, MashError> {
        std::env::consts::OS.parse()
    }
}

impl FromStr for Platform {
    type Err = MashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "linux" => Ok(Platform::Linux),
            "macos" | "darwin" | "osx" => Ok(Platform::MacOs),
            _ => Err(MashError::UnsupportedPlatform(s.to_string())),
        }
    }
}

/// A `mash` executable.
#[derive(Debug, Clone)]
pub struct Mash {
    exe: PathBuf,
}

impl Mash {
    pub fn new<P: AsRef<Path>>(exe: P) -> Self {
        Mash {
            exe: exe.as_ref().to_path_buf(),
        }
    }

    /// `mash` from `PATH`
    pub fn from_path() -> Result<Self, MashError> {
        which::which("mash")
            .map(Mash::new)
            .map_err(|_| MashError::MashNotFound("mash is not in PATH".to_string()))
    }

    /// The bundled build for `platform` in `bin_dir`
    pub fn bundled(bin_dir: &Path, platform: Platform) -> Result<Self, MashError> {
        let exe = bin_dir.join(platform.bundled_name());
        if !exe.is_file() {
            return Err(MashError::MashNotFound(exe.display().to_string()));
        }
        Ok(Mash::new(exe))
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    /// First line of `mash --version`, if the binary answers.
    pub fn version(&self) -> Option<String> {
        let output = Command::new(&self.exe).arg("--version").output().ok()?;
        if !output.status.success() {
            return None;
        }
        String::from_utf8_lossy(&output.stdout)
            .lines()
            .next()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
    }

    pub fn sketch_command(&self, ws: &Workspace, params: &SketchParams, parallel: usize) -> Command {
        let mut cmd = Command::new(&self.exe);
        cmd.arg("sketch")
            .arg("-p")
            .arg(parallel.to_string())
            .arg("-s")
            .arg(params.sketch_size.to_string())
            .arg("-k")
            .arg(params.kmer.to_string())
            .arg("-l")
            .arg(ws.input_list());
        if params.seq_type.is_amino_acid() {
            cmd.arg("-a");
        }
        cmd.arg("-o").arg(ws.sketch_stem());
        cmd
    }

    pub fn dist_command(&self, ws: &Workspace, parallel: usize) -> Command {
        let sketch = ws.sketch_path();
        let mut cmd = Command::new(&self.exe);
        cmd.arg("dist")
            .arg("-p")
            .arg(parallel.to_string())
            .arg("-t")
            .arg(&sketch)
            .arg(&sketch);
        cmd
    }

    /// Builds `all.msh` from the workspace's input list.
    pub fn sketch(
        &self,
        ws: &Workspace,
        params: &SketchParams,
        parallel: usize,
    ) -> Result<PathBuf, MashError> {
        let mut cmd = self.sketch_command(ws, params, parallel);
        cmd.stdout(Stdio::null());
        run("sketch", cmd)?;

        let sketch = ws.sketch_path();
        if !sketch.is_file() {
            return Err(MashError::ToolFailed {
                step: "sketch",
                status: "exit status: 0".to_string(),
                stderr: format!("{} was not written", sketch.display()),
            });
        }
        Ok(sketch)
    }

    /// Compares the sketch against itself into `Dist.tab`.
    ///
    /// The table is replaced only when mash succeeds; a failed run leaves the
    /// previous one in place.
    pub fn dist(&self, ws: &Workspace, parallel: usize) -> Result<PathBuf, MashError> {
        let table = ws.table_path();
        let tmp = tempfile::NamedTempFile::new_in(ws.dir())?;

        let mut cmd = self.dist_command(ws, parallel);
        cmd.stdout(tmp.as_file().try_clone()?);
        run("dist", cmd)?;

        tmp.persist(&table).map_err(|e| e.error)?;
        Ok(table)
    }
}

fn run(step: &'static str, mut cmd: Command) -> Result<(), MashError> {
    log::debug!("Running {:?}", cmd);

    cmd.stderr(Stdio::piped());
    let output = cmd.output().map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            MashError::MashNotFound(cmd.get_program().to_string_lossy().to_string())
        }
        _ => MashError::Io(e),
    })?;

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if !output.status.success() {
        return Err(MashError::ToolFailed {
            step,
            status: output.status.to_string(),
            stderr,
        });
    }
    if !stderr.is_empty() {
        log::debug!("mash {}: {}", step, stderr);
    }

    Ok(())
}
