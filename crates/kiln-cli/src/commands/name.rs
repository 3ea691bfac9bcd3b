//! Name command: print the UMD global name for a package.

use std::path::Path;

use kiln_config::{PackageMetadata, derive_bundle_name};

use crate::cli::NameArgs;
use crate::error::Result;

pub fn execute(args: NameArgs, cwd: &Path) -> Result<()> {
    let name = match args.package {
        Some(package) => derive_bundle_name(&package),
        None => PackageMetadata::from_dir(cwd)?.bundle_name(),
    };

    println!("{}", name);
    Ok(())
}
