//! Inputs to matrices: resolve, stage a workspace, run `mash`, reshape.

use crate::libs::error::MashError;
use crate::libs::input::{labels, InputSet, SeqType};
use crate::libs::mash::Mash;
use crate::libs::matrix::{DistMatrix, DistPair};
use crate::libs::table::DistTable;
use crate::libs::workspace::{SketchParams, Workspace};
use std::path::{Path, PathBuf};

/// Knobs of a run. `seq_type` has no default and must be set.
#[derive(Debug, Clone)]
pub struct MashOptions {
    pub seq_type: Option<SeqType>,
    pub sketch_size: usize,
    pub kmer: usize,
    /// Threads handed to `mash -p`
    pub parallel: usize,
    /// Rebuild the sketch even if a fresh one is cached
    pub force: bool,
}

impl Default for MashOptions {
    fn default() -> Self {
        MashOptions {
            seq_type: None,
            sketch_size: 1000,
            kmer: 21,
            parallel: 1,
            force: false,
        }
    }
}

impl MashOptions {
    pub fn sketch_params(&self) -> Result<SketchParams, MashError> {
        Ok(SketchParams {
            seq_type: self.seq_type.ok_or(MashError::MissingSeqType)?,
            sketch_size: self.sketch_size,
            kmer: self.kmer,
        })
    }
}

/// Where a result came from.
#[derive(Debug, Clone)]
pub struct Provenance {
    pub workspace: PathBuf,
    pub key: String,
    pub table: PathBuf,
    pub params: SketchParams,
    /// Whether a cached sketch was used instead of running `mash sketch`
    pub sketch_reused: bool,
    pub mash_version: Option<String>,
}

/// Both views of one all-vs-all comparison.
#[derive(Debug, Clone)]
pub struct MashResult {
    pub matrix: DistMatrix,
    pub pairs: Vec<DistPair>,
    pub provenance: Provenance,
}

/// Resolved inputs and their workspace, staged on disk.
#[derive(Debug, Clone)]
pub struct Staged {
    pub files: Vec<PathBuf>,
    pub labels: Vec<String>,
    pub workspace: Workspace,
    pub params: SketchParams,
}

/// Resolves `inputs` and opens their workspace under `root`.
///
/// Configuration errors surface here, before any process is started.
pub fn stage(inputs: &InputSet, opts: &MashOptions, root: &Path) -> Result<Staged, MashError> {
    let params = opts.sketch_params()?;
    let files = inputs.resolve(params.seq_type)?;
    let labels = labels(&files)?;
    let workspace = Workspace::open(root, &files, &params)?;

    Ok(Staged {
        files,
        labels,
        workspace,
        params,
    })
}

/// Makes sure the workspace holds a sketch. Returns `true` if the cached one was kept.
pub fn ensure_sketch(mash: &Mash, staged: &Staged, opts: &MashOptions) -> Result<bool, MashError> {
    let ws = &staged.workspace;
    if opts.force {
        ws.invalidate()?;
    }

    if let Some(sketch) = ws.cached_sketch()? {
        log::info!("Reusing sketch {}", sketch.display());
        return Ok(true);
    }

    log::info!(
        "Sketching {} files ({}, s={}, k={})",
        staged.files.len(),
        staged.params.seq_type,
        staged.params.sketch_size,
        staged.params.kmer
    );
    mash.sketch(ws, &staged.params, opts.parallel)?;
    Ok(false)
}

/// Runs the whole pipeline and returns the matrix and long form.
pub fn run(
    inputs: &InputSet,
    opts: &MashOptions,
    mash: &Mash,
    root: &Path,
) -> Result<MashResult, MashError> {
    let staged = stage(inputs, opts, root)?;
    let sketch_reused = ensure_sketch(mash, &staged, opts)?;

    log::info!("Computing pairwise distances");
    let table_path = mash.dist(&staged.workspace, opts.parallel)?;
    let table = DistTable::from_path(&table_path)?;

    let matrix = DistMatrix::from_table(&table, Some(&staged.labels))?;
    let pairs = matrix.to_pairs();
    log::info!("{} genomes, {} pairs", matrix.size(), pairs.len());

    Ok(MashResult {
        matrix,
        pairs,
        provenance: Provenance {
            workspace: staged.workspace.dir().to_path_buf(),
            key: staged.workspace.key().to_string(),
            table: table_path,
            params: staged.params,
            sketch_reused,
            mash_version: mash.version(),
        },
    })
}
