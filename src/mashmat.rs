extern crate clap;
use clap::*;

mod cmd_mashmat;

fn main() -> anyhow::Result<()> {
    let app = Command::new("mashmat")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`mashmat` - Mash distance matrices")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("More log output, repeat for more (-v info, -vv debug)"),
        )
        .subcommand(cmd_mashmat::dist::make_subcommand())
        .subcommand(cmd_mashmat::sketch::make_subcommand())
        .subcommand(cmd_mashmat::tab::make_subcommand())
        .subcommand(cmd_mashmat::key::make_subcommand())
        .after_help(
            r###"Subcommands:

* dist   - sketch, compare and reshape in one go
* sketch - build or refresh the cached sketch only
* tab    - reshape an existing `mash dist -t` table
* key    - locate the workspace of a genome set

RUST_LOG overrides --verbose.

"###,
        );

    let matches = app.get_matches();

    let level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_millis()
        .init();

    // Check which subcomamnd the user ran...
    match matches.subcommand() {
        Some(("dist", sub_matches)) => cmd_mashmat::dist::execute(sub_matches),
        Some(("sketch", sub_matches)) => cmd_mashmat::sketch::execute(sub_matches),
        Some(("tab", sub_matches)) => cmd_mashmat::tab::execute(sub_matches),
        Some(("key", sub_matches)) => cmd_mashmat::key::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
