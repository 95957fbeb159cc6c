use crate::cmd_mashmat::utils;
use anyhow::Context;
use clap::*;
use mashmat::libs::matrix::write_pairs;
use mashmat::libs::pipeline;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("dist")
        .about("All-vs-all Mash distances as a matrix and a pair list")
        .after_help(
            r###"
Runs `mash sketch` and `mash dist` over the input genomes and reshapes the table.

Workspace:
* Inputs are staged in <root>/<hash>_mash/
    * input_mash.txt - absolute input paths, one per line
    * all.msh        - the sketch, reused while no input is newer than it
    * Dist.tab       - the raw `mash dist -t` table
* <hash> depends on the set of absolute paths and on --type/--sketch/--kmer,
  not on their order or on --parallel

Outputs:
* --pairs: Source, Target, Dist (TSV with header); n*n rows, self distances included
* --matrix: relaxed PHYLIP, rows and columns in input order
* Without --pairs or --matrix the pair list goes to stdout
* Genomes are named by file basename, which must be unique

Mash:
* --mash PATH, or --platform linux|macos with --bin-dir DIR for the bundled
  builds (mash-Linux64, mash-OSX64), otherwise `mash` from PATH
* A failing mash is reported with its exit status and stderr

Examples:
1. Protein sets:
   mashmat dist g1.faa g2.faa g3.faa --type protein

2. A genome directory, matrix to a file:
   mashmat dist --dir genomes/ --type genome --matrix genomes.phy

3. Inputs from a list, 8 threads:
   mashmat dist --list genomes.lst -t nt -p 8 --pairs pairs.tsv

"###,
        );
    let cmd = utils::input_args(cmd);
    let cmd = utils::mash_args(cmd);

    cmd.arg(
        Arg::new("pairs")
            .long("pairs")
            .num_args(1)
            .help("Output filename for the pair list. [stdout] for screen"),
    )
    .arg(
        Arg::new("matrix")
            .long("matrix")
            .num_args(1)
            .help("Output filename for the PHYLIP matrix. [stdout] for screen"),
    )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let opts = utils::options(args)?;
    let inputs = utils::inputs(args)?;
    let root = utils::root(args);
    let mash = utils::mash(args)?;

    let opt_pairs = args.get_one::<String>("pairs");
    let opt_matrix = args.get_one::<String>("matrix");

    //----------------------------
    // Operating
    //----------------------------
    let result = pipeline::run(&inputs, &opts, &mash, &root)?;
    log::info!(
        "Distances in {} (key {}, sketch reused: {})",
        result.provenance.table.display(),
        result.provenance.key,
        result.provenance.sketch_reused
    );

    //----------------------------
    // Output
    //----------------------------
    if let Some(outfile) = opt_matrix {
        let mut writer =
            mashmat::writer(outfile).with_context(|| format!("creating {}", outfile))?;
        result.matrix.write_phylip(&mut writer)?;
        writer.flush()?;
    }

    if opt_pairs.is_some() || opt_matrix.is_none() {
        let outfile = opt_pairs.map(|s| s.as_str()).unwrap_or("stdout");
        let mut writer =
            mashmat::writer(outfile).with_context(|| format!("creating {}", outfile))?;
        write_pairs(&result.pairs, &mut writer, true)?;
        writer.flush()?;
    }

    Ok(())
}
