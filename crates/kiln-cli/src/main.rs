//! Kiln CLI entry point.

use clap::Parser;
use kiln_cli::{cli, commands, error, logger, ui};
use miette::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);
    ui::set_quiet(args.quiet);

    let cwd = match commands::utils::resolve_cwd(args.cwd.as_deref()) {
        Ok(cwd) => cwd,
        Err(e) => return Err(error::cli_error_to_miette(e)),
    };

    let result = match args.command {
        cli::Command::Build(build_args) => commands::build_execute(build_args, &cwd).await,
        cli::Command::Check(check_args) => commands::check_execute(check_args, &cwd),
        cli::Command::Name(name_args) => commands::name_execute(name_args, &cwd),
    };

    result.map_err(error::cli_error_to_miette)
}
