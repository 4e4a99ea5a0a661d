use crate::{Float, Sim, PRTL_CHUNK_SIZE};
use anyhow::{ensure, Result};
use itertools::izip;
use rayon::prelude::*;

/// Meaning of the bunch's longitudinal phase-space slot. The frame is a
/// property of the whole bunch, never of an individual particle: at any
/// instant every resident particle is in the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Longitudinal position is time-like, pt is an energy deviation.
    Temporal,
    /// Longitudinal position is z along the beam axis, pt is a momentum
    /// deviation.
    Spatial,
}

/// The design particle the bunch coordinates are normalized against.
/// Replaced only through `Bunch::set_ref_particle`, read-only otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefPart {
    pub x: Float,
    pub y: Float,
    pub t: Float,
    pub px: Float,
    pub py: Float,
    pub pt: Float, // energy normalized by rest energy; -gamma on the design orbit
}

impl Default for RefPart {
    fn default() -> RefPart {
        RefPart {
            x: 0.0,
            y: 0.0,
            t: 0.0,
            px: 0.0,
            py: 0.0,
            pt: 0.0,
        }
    }
}

impl RefPart {
    /// Reference particle on the design orbit with normalized momentum
    /// betgam = beta * gamma.
    pub fn from_betgam(betgam: Float) -> RefPart {
        RefPart {
            pt: -(1.0 + betgam * betgam).sqrt(),
            ..RefPart::default()
        }
    }

    /// Design normalized momentum pz/mc = beta * gamma.
    pub fn beta_gamma(&self) -> Float {
        (self.pt * self.pt - 1.0).sqrt()
    }

    /// A freshly constructed bunch has pt = 0, which no physical particle
    /// can have (gamma >= 1). Anything that needs the reference energy
    /// checks this first.
    pub fn is_set(&self) -> bool {
        self.pt <= -1.0
    }
}

/// The particle bunch, stored as one Vec per phase-space coordinate.
/// Partitioning for the parallel sweeps is by index chunks of `chunk`
/// particles, so a particle's owning partition is implicit in its index.
pub struct Bunch {
    pub x: Vec<Float>,
    pub y: Vec<Float>,
    pub t: Vec<Float>,
    pub px: Vec<Float>,
    pub py: Vec<Float>,
    pub pt: Vec<Float>,
    pub qm: Vec<Float>, // charge-to-mass ratio, carried but never pushed
    pub w: Vec<Float>,  // macro-particle weight, unitless
    pub tag: Vec<u64>,
    frame: Frame,
    refpart: RefPart,
    chunk: usize,
}

impl Bunch {
    pub fn new(sim: &Sim) -> Bunch {
        Bunch {
            x: Vec::with_capacity(sim.n_prtl),
            y: Vec::with_capacity(sim.n_prtl),
            t: Vec::with_capacity(sim.n_prtl),
            px: Vec::with_capacity(sim.n_prtl),
            py: Vec::with_capacity(sim.n_prtl),
            pt: Vec::with_capacity(sim.n_prtl),
            qm: Vec::with_capacity(sim.n_prtl),
            w: Vec::with_capacity(sim.n_prtl),
            tag: Vec::with_capacity(sim.n_prtl),
            frame: Frame::Temporal,
            refpart: RefPart::default(),
            chunk: PRTL_CHUNK_SIZE,
        }
    }

    /// Add particles from explicit coordinate arrays. `qm` and `bunch_chg`
    /// are shared by the whole batch; each macro particle carries an equal
    /// share of the bunch charge as its weight.
    pub fn add_particles(
        &mut self,
        x: &[Float],
        y: &[Float],
        t: &[Float],
        px: &[Float],
        py: &[Float],
        pt: &[Float],
        qm: Float,
        bunch_chg: Float,
    ) -> Result<()> {
        let n = x.len();
        ensure!(n > 0, "refusing to add an empty particle batch");
        ensure!(
            y.len() == n && t.len() == n && px.len() == n && py.len() == n && pt.len() == n,
            "coordinate arrays must all have the same length (got {}, {}, {}, {}, {}, {})",
            x.len(),
            y.len(),
            t.len(),
            px.len(),
            py.len(),
            pt.len()
        );

        let weight = bunch_chg / n as Float;
        let first_tag = self.x.len() as u64;

        self.x.extend_from_slice(x);
        self.y.extend_from_slice(y);
        self.t.extend_from_slice(t);
        self.px.extend_from_slice(px);
        self.py.extend_from_slice(py);
        self.pt.extend_from_slice(pt);
        self.qm.extend(std::iter::repeat(qm).take(n));
        self.w.extend(std::iter::repeat(weight).take(n));
        self.tag.extend((0..n as u64).map(|k| first_tag + k));

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub(crate) fn set_frame(&mut self, frame: Frame) {
        self.frame = frame;
    }

    pub fn refpart(&self) -> &RefPart {
        &self.refpart
    }

    /// Replace the stored reference particle. Never called mid-push.
    pub fn set_ref_particle(&mut self, refpart: RefPart) {
        self.refpart = refpart;
    }

    /// Override the partition size. Mostly useful to pin down partition
    /// counts in tests; results must not depend on it.
    pub fn set_chunk(&mut self, chunk: usize) {
        assert!(chunk > 0);
        self.chunk = chunk;
    }

    /// Apply `f` once to every resident particle, partition by partition,
    /// in parallel. `f` sees one particle's position and momentum triples
    /// by mutable reference and nothing else, so the sweep order cannot
    /// affect the outcome.
    pub fn apply<F>(&mut self, f: F)
    where
        F: Fn(&mut Float, &mut Float, &mut Float, &mut Float, &mut Float, &mut Float) + Sync,
    {
        // All coordinate arrays have the same length. Guaranteed by
        // add_particles but not a bad idea to check it anyway.
        if !cfg!(feature = "unchecked") {
            assert_eq!(self.x.len(), self.y.len());
            assert_eq!(self.x.len(), self.t.len());
            assert_eq!(self.x.len(), self.px.len());
            assert_eq!(self.x.len(), self.py.len());
            assert_eq!(self.x.len(), self.pt.len());
        }
        let chunk = self.chunk;
        (
            &mut self.x,
            &mut self.y,
            &mut self.t,
            &mut self.px,
            &mut self.py,
            &mut self.pt,
        )
            .into_par_iter()
            .chunks(chunk)
            .for_each(|o| {
                o.into_iter()
                    .for_each(|(x, y, t, px, py, pt)| f(x, y, t, px, py, pt))
            });
    }

    /// Min and max of the particle positions in each dimension.
    /// Returns (x_min, y_min, t_min, x_max, y_max, t_max).
    pub fn min_and_max_positions(&self) -> (Float, Float, Float, Float, Float, Float) {
        let mut mins = [Float::INFINITY; 3];
        let mut maxs = [Float::NEG_INFINITY; 3];
        for (x, y, t) in izip!(&self.x, &self.y, &self.t) {
            mins[0] = mins[0].min(*x);
            mins[1] = mins[1].min(*y);
            mins[2] = mins[2].min(*t);
            maxs[0] = maxs[0].max(*x);
            maxs[1] = maxs[1].max(*y);
            maxs[2] = maxs[2].max(*t);
        }
        (mins[0], mins[1], mins[2], maxs[0], maxs[1], maxs[2])
    }

    /// Weighted mean and standard deviation of the particle positions.
    /// Returns (x_mean, x_std, y_mean, y_std, t_mean, t_std).
    pub fn mean_and_std_positions(&self) -> (Float, Float, Float, Float, Float, Float) {
        if self.is_empty() {
            return (0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        }
        let mut w_sum = 0.0;
        let mut sums = [0.0 as Float; 3];
        for (x, y, t, w) in izip!(&self.x, &self.y, &self.t, &self.w) {
            w_sum += *w;
            sums[0] += *w * *x;
            sums[1] += *w * *y;
            sums[2] += *w * *t;
        }
        let means = [sums[0] / w_sum, sums[1] / w_sum, sums[2] / w_sum];

        let mut sq_sums = [0.0 as Float; 3];
        for (x, y, t, w) in izip!(&self.x, &self.y, &self.t, &self.w) {
            sq_sums[0] += *w * (*x - means[0]) * (*x - means[0]);
            sq_sums[1] += *w * (*y - means[1]) * (*y - means[1]);
            sq_sums[2] += *w * (*t - means[2]) * (*t - means[2]);
        }
        (
            means[0],
            (sq_sums[0] / w_sum).sqrt(),
            means[1],
            (sq_sums[1] / w_sum).sqrt(),
            means[2],
            (sq_sums[2] / w_sum).sqrt(),
        )
    }
}
