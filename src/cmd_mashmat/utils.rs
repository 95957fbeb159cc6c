use anyhow::Context;
use clap::*;
use mashmat::libs::input::{InputSet, SeqType};
use mashmat::libs::mash::{Mash, Platform};
use mashmat::libs::pipeline::MashOptions;
use std::path::PathBuf;

// Input files, list files, genome directory, and sketch parameters
pub fn input_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("infiles")
            .num_args(1..)
            .index(1)
            .help("Genome/proteome files, one genome per file"),
    )
    .arg(
        Arg::new("list")
            .long("list")
            .short('l')
            .num_args(1)
            .action(ArgAction::Append)
            .help("File listing input paths, one per line"),
    )
    .arg(
        Arg::new("dir")
            .long("dir")
            .num_args(1)
            .conflicts_with_all(["infiles", "list"])
            .help("Genome directory with faa/, ffn/ and fna/ subdirectories"),
    )
    .group(
        ArgGroup::new("source")
            .args(["infiles", "list", "dir"])
            .required(true)
            .multiple(true),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .short('t')
            .num_args(1)
            .help("Sequence type: protein (aa), nucleotide (nt) or genome (wgs)"),
    )
    .arg(
        Arg::new("sketch")
            .long("sketch")
            .short('s')
            .num_args(1)
            .default_value("1000")
            .value_parser(value_parser!(usize))
            .help("Sketch size, hashes kept per genome"),
    )
    .arg(
        Arg::new("kmer")
            .long("kmer")
            .short('k')
            .num_args(1)
            .default_value("21")
            .value_parser(value_parser!(usize))
            .help("K-mer size"),
    )
    .arg(
        Arg::new("root")
            .long("root")
            .num_args(1)
            .default_value(".")
            .help("Directory holding the <hash>_mash workspaces"),
    )
}

// Which mash to run and how many threads it gets
pub fn mash_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("mash")
            .long("mash")
            .num_args(1)
            .help("Path to the mash executable"),
    )
    .arg(
        Arg::new("platform")
            .long("platform")
            .num_args(1)
            .requires("bin_dir")
            .conflicts_with("mash")
            .help("Use the bundled build for this platform: linux or macos"),
    )
    .arg(
        Arg::new("bin_dir")
            .long("bin-dir")
            .num_args(1)
            .conflicts_with("mash")
            .help("Directory with bundled builds (mash-Linux64, mash-OSX64)"),
    )
    .arg(
        Arg::new("parallel")
            .long("parallel")
            .short('p')
            .num_args(1)
            .default_value("1")
            .value_parser(value_parser!(usize))
            .help("Number of threads for mash"),
    )
    .arg(
        Arg::new("force")
            .long("force")
            .action(ArgAction::SetTrue)
            .help("Rebuild the sketch even if a cached one is fresh"),
    )
}

pub fn inputs(args: &ArgMatches) -> anyhow::Result<InputSet> {
    if let Some(dir) = args.get_one::<String>("dir") {
        return Ok(InputSet::GenomeDir(PathBuf::from(dir)));
    }

    let mut files: Vec<PathBuf> = vec![];
    if let Some(infiles) = args.get_many::<String>("infiles") {
        files.extend(infiles.map(PathBuf::from));
    }
    if let Some(lists) = args.get_many::<String>("list") {
        for list in lists {
            let paths = mashmat::read_list(list)
                .with_context(|| format!("reading input list {}", list))?;
            files.extend(paths.into_iter().map(PathBuf::from));
        }
    }

    Ok(InputSet::Files(files))
}

pub fn options(args: &ArgMatches) -> anyhow::Result<MashOptions> {
    let seq_type = SeqType::require(args.get_one::<String>("type").map(|s| s.as_str()))?;

    Ok(MashOptions {
        seq_type: Some(seq_type),
        sketch_size: *args.get_one::<usize>("sketch").unwrap(),
        kmer: *args.get_one::<usize>("kmer").unwrap(),
        parallel: args
            .try_get_one::<usize>("parallel")
            .ok()
            .flatten()
            .copied()
            .unwrap_or(1),
        force: args.try_get_one::<bool>("force").ok().flatten().copied().unwrap_or(false),
    })
}

pub fn root(args: &ArgMatches) -> PathBuf {
    PathBuf::from(args.get_one::<String>("root").unwrap())
}

// --mash, then a bundled build, then PATH
pub fn mash(args: &ArgMatches) -> anyhow::Result<Mash> {
    if let Some(exe) = args.get_one::<String>("mash") {
        return Ok(Mash::new(exe));
    }
    if let Some(bin_dir) = args.get_one::<String>("bin_dir") {
        let platform = match args.get_one::<String>("platform") {
            Some(p) => p.parse::<Platform>()?,
            None => Platform::host()?,
        };
        return Ok(Mash::bundled(std::path::Path::new(bin_dir), platform)?);
    }

    Ok(Mash::from_path()?)
}
