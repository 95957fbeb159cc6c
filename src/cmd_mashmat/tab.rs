use clap::*;
use mashmat::libs::matrix::{write_pairs, DistMatrix};
use mashmat::libs::table::DistTable;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("tab")
        .about("Reshape an existing `mash dist -t` table")
        .after_help(
            r###"
Reads a table written by `mash dist -t` (for example <hash>_mash/Dist.tab) and
outputs it as a pair list or a PHYLIP matrix. Mash is not run.

Modes:
* pair:   Source, Target, Dist with a header line; n*n rows
* matrix: relaxed PHYLIP, rows and columns in the table's column order

Genomes are named by the basename of the paths in the table.

Examples:
1. Pair list:
   mashmat tab 6f1c0a9e3b2d4c57_mash/Dist.tab

2. Matrix, for `pgr mat upgma`:
   mashmat tab Dist.tab --mode matrix -o genomes.phy

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .index(1)
                .help("Input table. [stdin] for standard input"),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .num_args(1)
                .value_parser(["pair", "matrix"])
                .default_value("pair")
                .help("Output layout"),
        )
        .arg(
            Arg::new("no_header")
                .long("no-header")
                .action(ArgAction::SetTrue)
                .help("Omit the header line of the pair list"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let infile = args.get_one::<String>("infile").unwrap();
    let mode = args.get_one::<String>("mode").unwrap();
    let header = !args.get_flag("no_header");

    let table = if infile == "stdin" {
        DistTable::read(mashmat::reader(infile)?)?
    } else {
        DistTable::from_path(std::path::Path::new(infile))?
    };
    if table.is_empty() {
        anyhow::bail!("no distances in {}", infile);
    }
    let matrix = DistMatrix::from_table(&table, None)?;

    let mut writer = mashmat::writer(args.get_one::<String>("outfile").unwrap())?;
    match mode.as_str() {
        "pair" => write_pairs(&matrix.to_pairs(), &mut writer, header)?,
        "matrix" => matrix.write_phylip(&mut writer)?,
        _ => unreachable!(),
    }
    writer.flush()?;

    Ok(())
}
