use crate::{bunch::Bunch, Float, Sim};
use anyhow::{Context, Result};

fn save_coord(coord: &[Float], name: &str, stride: usize, outdir: &str) -> Result<()> {
    let out_vec: Vec<Float> = coord.iter().step_by(stride).copied().collect();
    npy::to_file(format!("{}/{}.npy", outdir, name), out_vec)
        .context(format!("Could not save {} data to file", name))?;
    Ok(())
}

pub(crate) fn save_output(t: u32, sim: &Sim, bunch: &Bunch) -> Result<()> {
    let cfg = &sim.config;
    if t % cfg.output.output_interval == 0 {
        let output_prefix = format!("output/dat_{:05}", t / cfg.output.output_interval);
        std::fs::create_dir_all(&output_prefix).context("Unable to create output directory")?;
        println!("saving bunch");

        let stride = cfg.output.stride;
        save_coord(&bunch.x, "x", stride, &output_prefix)?;
        save_coord(&bunch.y, "y", stride, &output_prefix)?;
        save_coord(&bunch.t, "t", stride, &output_prefix)?;
        save_coord(&bunch.px, "px", stride, &output_prefix)?;
        save_coord(&bunch.py, "py", stride, &output_prefix)?;
        save_coord(&bunch.pt, "pt", stride, &output_prefix)?;
    }

    Ok(())
}
