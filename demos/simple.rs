use anyhow::Result;

extern crate tsconfig_files;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let included_files =
        tsconfig_files::files_from_tsconfig_sync("/path-to-your-project/packages/package-a")?;
    println!("{:#?}", included_files);
    Ok(())
}
