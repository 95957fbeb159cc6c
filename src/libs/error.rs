use std::path::PathBuf;

/// Errors raised while resolving inputs, driving `mash`, or reading its table.
#[derive(Debug, thiserror::Error)]
pub enum MashError {
    /// No sequence type was given where one is required
    #[error("a sequence type is required: protein, nucleotide or genome")]
    MissingSeqType,

    #[error("unsupported sequence type \"{0}\": expected protein, nucleotide or genome")]
    UnknownSeqType(String),

    #[error("unsupported platform \"{0}\": expected linux or macos")]
    UnsupportedPlatform(String),

    #[error("no input files given")]
    EmptyInput,

    #[error("input file does not exist: \"{}\"", .0.display())]
    MissingInput(PathBuf),

    /// A genome directory had no files for the requested category
    #[error("no genome files found in \"{}\"", .0.display())]
    NoGenomeFiles(PathBuf),

    /// Two inputs would produce the same matrix label
    #[error("duplicate genome name \"{0}\" among inputs")]
    DuplicateLabel(String),

    #[error("mash executable not found: {0}")]
    MashNotFound(String),

    /// The external binary ran but exited unsuccessfully
    #[error("mash {step} failed ({status}): {stderr}")]
    ToolFailed {
        step: &'static str,
        status: String,
        stderr: String,
    },

    #[error("distance table \"{}\" is empty", .0.display())]
    EmptyTable(PathBuf),

    #[error("malformed distance table at line {line}: {message}")]
    MalformedTable { line: usize, message: String },

    /// The table's genomes do not match the inputs
    #[error("distance table does not match inputs: {0}")]
    LabelMismatch(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
