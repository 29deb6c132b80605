use std::path::PathBuf;

use crate::project;

pub fn run(config: Option<PathBuf>) -> anyhow::Result<()> {
    let (config, source) = project::load_config(config.as_deref())?;
    let text = config.to_toml_string().map_err(anyhow::Error::msg)?;
    println!("# source: {}", source.label());
    print!("{text}");
    Ok(())
}
