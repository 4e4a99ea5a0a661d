use crate::{Float, Sim};
use itertools::izip;
use rand::prelude::*;
use rand_distr::StandardNormal;

/// Initial phase-space coordinates for a bunch, one Vec per slot, in the
/// temporal frame. These are handed to `Bunch::add_particles` unchanged.
pub struct BunchCoords {
    pub x: Vec<Float>,
    pub y: Vec<Float>,
    pub t: Vec<Float>,
    pub px: Vec<Float>,
    pub py: Vec<Float>,
    pub pt: Vec<Float>,
}

/// Sample a Gaussian bunch around the design orbit, one standard normal
/// per slot scaled by the configured rms width.
pub fn gaussian_bunch(sim: &Sim) -> BunchCoords {
    let n = sim.n_prtl;
    let p = &sim.config.params;
    let mut coords = BunchCoords {
        x: vec![0.0; n],
        y: vec![0.0; n],
        t: vec![0.0; n],
        px: vec![0.0; n],
        py: vec![0.0; n],
        pt: vec![0.0; n],
    };

    let mut rng = thread_rng();
    for (x, y, t, px, py, pt) in izip!(
        &mut coords.x,
        &mut coords.y,
        &mut coords.t,
        &mut coords.px,
        &mut coords.py,
        &mut coords.pt
    ) {
        *x = rng.sample(StandardNormal);
        *x *= p.sig_x;
        *y = rng.sample(StandardNormal);
        *y *= p.sig_y;
        *t = rng.sample(StandardNormal);
        *t *= p.sig_t;
        *px = rng.sample(StandardNormal);
        *px *= p.sig_px;
        *py = rng.sample(StandardNormal);
        *py *= p.sig_py;
        *pt = rng.sample(StandardNormal);
        *pt *= p.sig_pt;
    }
    coords
}
