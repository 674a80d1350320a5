//! `mosekfind platform` command

use anyhow::Result;

use crate::cli::PlatformArgs;
use mosekfind::ops::library_names::{candidates, file_names};
use mosekfind::util::EnvVars;

pub fn execute(args: PlatformArgs) -> Result<()> {
    let env = EnvVars::capture();
    let platform = args.target.resolve(&env);

    println!("Platform:");
    println!();
    println!("  OS:            {}", platform.family);
    println!("  Pointer width: {}", platform.pointer_width);
    println!("  Tools suffix:  {}", platform.tools_suffix());
    println!();

    println!("Library candidates:");
    for name in candidates(&platform, args.no_openmp) {
        println!("  {} ({})", name, file_names(&platform, &name).join(", "));
    }

    Ok(())
}
