use crate::libs::error::MashError;
use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Kind of sequence held by the input files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeqType {
    /// Amino acids, `.faa`
    Protein,
    /// Gene nucleotide sequences, `.ffn`
    Nucleotide,
    /// Whole genome assemblies, `.fna`
    Genome,
}

impl SeqType {
    /// Subdirectory of a genome directory holding files of this type
    pub fn subdir(&self) -> &'static str {
        match self {
            SeqType::Protein => "faa",
            SeqType::Nucleotide => "ffn",
            SeqType::Genome => "fna",
        }
    }

    /// `mash sketch` needs `-a` for amino acids
    pub fn is_amino_acid(&self) -> bool {
        matches!(self, SeqType::Protein)
    }

    /// Parses an optional selector, treating absence as a configuration error.
    pub fn require(value: Option<&str>) -> Result<Self, MashError> {
        match value {
            Some(s) => s.parse(),
            None => Err(MashError::MissingSeqType),
        }
    }
}

impl FromStr for SeqType {
    type Err = MashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "protein" | "aa" | "faa" => Ok(SeqType::Protein),
            "nucleotide" | "nt" | "ffn" => Ok(SeqType::Nucleotide),
            "genome" | "whole-genome" | "wgs" | "fna" => Ok(SeqType::Genome),
            _ => Err(MashError::UnknownSeqType(s.to_string())),
        }
    }
}

impl fmt::Display for SeqType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SeqType::Protein => "protein",
            SeqType::Nucleotide => "nucleotide",
            SeqType::Genome => "genome",
        };
        write!(f, "{}", name)
    }
}

/// What the caller hands in: explicit files, or a directory split into
/// `faa/`, `ffn/` and `fna/` subdirectories.
#[derive(Debug, Clone)]
pub enum InputSet {
    Files(Vec<PathBuf>),
    GenomeDir(PathBuf),
}

impl InputSet {
    pub fn from_files<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        InputSet::Files(files.into_iter().map(|p| p.as_ref().to_path_buf()).collect())
    }

    /// Flattens the set into file paths.
    ///
    /// Directory inputs list the subdirectory for `seq_type`, sorted by name so
    /// the result does not depend on `read_dir` order.
    pub fn resolve(&self, seq_type: SeqType) -> Result<Vec<PathBuf>, MashError> {
        let files = match self {
            InputSet::Files(files) => files.clone(),
            InputSet::GenomeDir(root) => {
                let dir = root.join(seq_type.subdir());
                if !dir.is_dir() {
                    return Err(MashError::NoGenomeFiles(dir));
                }
                let mut files = vec![];
                for entry in std::fs::read_dir(&dir)? {
                    let path = entry?.path();
                    if path.is_file() {
                        files.push(path);
                    }
                }
                files.sort();
                if files.is_empty() {
                    return Err(MashError::NoGenomeFiles(dir));
                }
                files
            }
        };

        if files.is_empty() {
            return Err(MashError::EmptyInput);
        }
        for file in &files {
            if !file.is_file() {
                return Err(MashError::MissingInput(file.clone()));
            }
        }
        labels(&files)?;

        Ok(files)
    }
}

/// File name of `path`, used as its row and column label.
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Basenames of `files` in order. Fails on duplicates.
pub fn labels(files: &[PathBuf]) -> Result<Vec<String>, MashError> {
    let mut seen = HashSet::new();
    let mut labels = Vec::with_capacity(files.len());
    for file in files {
        let label = basename(file);
        if !seen.insert(label.clone()) {
            return Err(MashError::DuplicateLabel(label));
        }
        labels.push(label);
    }

    Ok(labels)
}
