use anyhow::Result;
use beamline_rs::{run, Config};

fn main() -> Result<()> {
    let cfg = Config::new()?;
    run(cfg)
}
