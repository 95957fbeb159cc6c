use crate::cmd_mashmat::utils;
use clap::*;
use mashmat::libs::workspace::Workspace;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    let cmd = Command::new("key")
        .about("Print the workspace of a genome set without creating it")
        .after_help(
            r###"
Outputs the cache key and the workspace directory, tab separated.
Nothing is written and mash is not needed.

Examples:
1. Where would these genomes be sketched?
   mashmat key g1.faa g2.faa --type protein

"###,
        );

    utils::input_args(cmd)
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let opts = utils::options(args)?;
    let inputs = utils::inputs(args)?;
    let root = utils::root(args);

    let params = opts.sketch_params()?;
    let files = inputs.resolve(params.seq_type)?;
    let ws = Workspace::locate(&root, &files, &params)?;

    println!("{}\t{}", ws.key(), ws.dir().display());

    Ok(())
}
