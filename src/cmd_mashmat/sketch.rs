use crate::cmd_mashmat::utils;
use clap::*;
use mashmat::libs::pipeline;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("sketch")
        .about("Build or refresh the cached Mash sketch of a genome set")
        .after_help(
            r###"
Stages the inputs in <root>/<hash>_mash/ and runs `mash sketch` unless all.msh is
already there and no input is newer than it. Prints the workspace directory.

Examples:
1. Sketch a genome directory ahead of `mashmat dist`:
   mashmat sketch --dir genomes/ --type genome -p 8

2. Rebuild after changing the mash binary:
   mashmat sketch g1.fna g2.fna -t genome --force

"###,
        );
    let cmd = utils::input_args(cmd);

    utils::mash_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let opts = utils::options(args)?;
    let inputs = utils::inputs(args)?;
    let root = utils::root(args);
    let mash = utils::mash(args)?;

    let staged = pipeline::stage(&inputs, &opts, &root)?;
    let reused = pipeline::ensure_sketch(&mash, &staged, &opts)?;
    if reused {
        log::info!("Sketch is up to date");
    }

    println!("{}", staged.workspace.dir().display());

    Ok(())
}
