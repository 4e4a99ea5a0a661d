use serde::Deserialize;
use std::fs;

use anyhow::{Context, Result};

use crate::bunch::{Bunch, RefPart};
use crate::elements::Lattice;
use crate::transform::{coordinate_transformation, Direction};

pub mod bunch;
pub mod elements;
pub mod init;
pub mod push;
mod save;
pub mod transform;

// We use a type alias for f64/Float to easily support
// double and single precision.
#[cfg(feature = "dprec")]
pub type Float = f64;

#[cfg(not(feature = "dprec"))]
pub type Float = f32;

// Number of particles each parallel worker owns during one sweep.
pub const PRTL_CHUNK_SIZE: usize = 16_384;

#[derive(Deserialize)]
pub struct Config {
    pub params: Params,
    pub setup: Setup,
    pub output: Output,
    pub lattice: Lattice,
}

#[derive(Deserialize)]
pub struct Setup {
    pub periods: u32,
}

#[derive(Deserialize)]
pub struct Output {
    pub write_output: bool,
    pub output_interval: u32,
    pub stride: usize,
}

#[derive(Deserialize)]
pub struct Params {
    pub n_prtl: usize,
    pub betgam: Float,
    pub qm: Float,
    pub bunch_chg: Float,
    pub sig_x: Float,
    pub sig_y: Float,
    pub sig_t: Float,
    pub sig_px: Float,
    pub sig_py: Float,
    pub sig_pt: Float,
    #[serde(default)]
    pub push_frame: PushFrame,
}

/// Which longitudinal frame the bunch is tracked in. The push driver never
/// decides this on its own; `run` applies the frame transforms at the
/// boundaries of the tracking loop when `spatial` is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PushFrame {
    Temporal,
    Spatial,
}

impl Default for PushFrame {
    fn default() -> PushFrame {
        PushFrame::Temporal
    }
}

impl Config {
    pub fn new() -> Result<Config> {
        let contents =
            fs::read_to_string("config.toml").context("Could not open the config.toml file")?;
        Config::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Config> {
        toml::from_str(contents).with_context(|| "Could not parse Config file")
    }
}

pub struct Sim {
    pub t: std::cell::Cell<u32>,
    pub periods: u32,
    pub n_prtl: usize,
    pub betgam: Float, // design normalized momentum of the reference particle
    pub push_frame: PushFrame,
    pub config: Config,
}

impl Sim {
    pub fn new(cfg: Config) -> Sim {
        Sim {
            t: std::cell::Cell::new(0),
            periods: cfg.setup.periods,
            n_prtl: cfg.params.n_prtl,
            betgam: cfg.params.betgam,
            push_frame: cfg.params.push_frame,
            config: cfg,
        }
    }
}

pub fn run(cfg: Config) -> Result<()> {
    if cfg.params.n_prtl == 0 {
        return Err(anyhow::Error::msg("Number of particles must be positive"));
    }
    if cfg.lattice.is_empty() {
        return Err(anyhow::Error::msg(
            "Lattice must contain at least one element",
        ));
    }

    let sim = Sim::new(cfg);

    println!("initializing bunch");
    let coords = init::gaussian_bunch(&sim);
    let mut bunch = Bunch::new(&sim);
    bunch.set_ref_particle(RefPart::from_betgam(sim.betgam));
    bunch.add_particles(
        &coords.x,
        &coords.y,
        &coords.t,
        &coords.px,
        &coords.py,
        &coords.pt,
        sim.config.params.qm,
        sim.config.params.bunch_chg,
    )?;

    // The frame-transform policy lives here: the bunch is generated in the
    // temporal frame, and tracking in the spatial frame brackets the whole
    // loop with one transform each way.
    if sim.push_frame == PushFrame::Spatial {
        println!("transforming bunch to the spatial frame");
        let pzd = bunch.refpart().beta_gamma();
        coordinate_transformation(&mut bunch, Direction::T2Z, pzd)?;
    }

    for t in 0..sim.periods {
        if sim.config.output.write_output {
            save::save_output(t, &sim, &bunch)?;
        }
        println!("{}", t);
        println!("pushing bunch");
        push::push(&mut bunch, &sim.config.lattice)?;
        sim.t.set(t);
    }

    if sim.push_frame == PushFrame::Spatial {
        println!("transforming bunch back to the temporal frame");
        let ptd = bunch.refpart().pt;
        coordinate_transformation(&mut bunch, Direction::Z2T, ptd)?;
    }

    if sim.config.output.write_output {
        save::save_output(sim.periods, &sim, &bunch)?;
    }

    Ok(())
}
