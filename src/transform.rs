use crate::bunch::{Bunch, Frame};
use crate::Float;
use anyhow::{ensure, Result};

/// Direction of a whole-bunch frame transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Temporal to spatial.
    T2Z,
    /// Spatial to temporal.
    Z2T,
}

/// The time-to-spatial map for a single particle.
#[derive(Debug, Clone, Copy)]
pub struct T2Z {
    /// Design value of pz/mc = beta * gamma.
    pzd: Float,
}

impl T2Z {
    pub fn new(pzd: Float) -> T2Z {
        T2Z { pzd }
    }

    /// Transform one particle from the temporal to the spatial frame. On
    /// entry the longitudinal slot holds a time-like phase and pt an energy
    /// deviation; on exit the slot holds z and pt a momentum deviation.
    #[inline(always)]
    pub fn advance(
        &self,
        x: &mut Float,
        y: &mut Float,
        t: &mut Float,
        px: &mut Float,
        py: &mut Float,
        pt: &mut Float,
    ) {
        // square-root arguments for the design and particle momenta
        let argd = 1.0 + self.pzd * self.pzd;
        let arg = 1.0 + (self.pzd + *pt) * (self.pzd + *pt) + *px * *px + *py * *py;

        // A non-positive argument means the particle state has no
        // representation in the spatial frame. Clamping here would corrupt
        // the result without detection, so it is fatal.
        assert!(argd > 0.0, "invalid ptd arg (<=0): argd = {}", argd);
        assert!(
            arg > 0.0,
            "invalid pt arg (<=0): arg = {}, px = {}, py = {}, pt = {}",
            arg,
            px,
            py,
            pt
        );

        let ptdf = -argd.sqrt();
        let ptf = -arg.sqrt();

        *x -= *px * *t / (self.pzd + *pt);
        // px unchanged
        *y -= *py * *t / (self.pzd + *pt);
        // py unchanged
        *t = ptf * *t / (self.pzd + *pt); // the slot now holds z
        *pt = ptf - ptdf; // now a longitudinal momentum deviation
    }
}

/// The spatial-to-time map for a single particle; the algebraic mirror of
/// `T2Z` with the sign conventions flipped.
#[derive(Debug, Clone, Copy)]
pub struct Z2T {
    /// Design value of pt/mc^2 = -gamma.
    ptd: Float,
}

impl Z2T {
    pub fn new(ptd: Float) -> Z2T {
        Z2T { ptd }
    }

    /// Transform one particle from the spatial to the temporal frame. On
    /// entry the longitudinal slot holds z and pt a momentum deviation; on
    /// exit the slot holds a time-like phase and pt an energy deviation.
    #[inline(always)]
    pub fn advance(
        &self,
        x: &mut Float,
        y: &mut Float,
        t: &mut Float,
        px: &mut Float,
        py: &mut Float,
        pt: &mut Float,
    ) {
        // square-root arguments for the design and particle momenta
        let argd = -1.0 + self.ptd * self.ptd;
        let arg = -1.0 + (self.ptd + *pt) * (self.ptd + *pt) - *px * *px - *py * *py;

        // Same fatality contract as T2Z: a particle whose transverse
        // momentum exceeds the frame's energy range has no physical
        // solution here and must not be clamped.
        assert!(argd > 0.0, "invalid pzd arg (<=0): argd = {}", argd);
        assert!(
            arg > 0.0,
            "invalid pz arg (<=0): arg = {}, px = {}, py = {}, pt = {}",
            arg,
            px,
            py,
            pt
        );

        let pzd = argd.sqrt();
        let pz = arg.sqrt();

        *x += *px * *t / (self.ptd + *pt);
        // px unchanged
        *y += *py * *t / (self.ptd + *pt);
        // py unchanged
        *t = pz * *t / (self.ptd + *pt); // the slot now holds a time-like phase
        *pt = pz - pzd; // now an energy deviation
    }
}

/// Transform the coordinate system of every resident particle. The bunch
/// frame tag is the single source of truth for what the longitudinal slot
/// currently means, so asking for a transform out of a frame the bunch is
/// not in is a caller bug and fails fast.
///
/// `pd` is the design value for the direction: pz/mc = beta * gamma for
/// T2Z, pt/mc^2 = -gamma for Z2T.
pub fn coordinate_transformation(bunch: &mut Bunch, direction: Direction, pd: Float) -> Result<()> {
    ensure!(
        !bunch.is_empty(),
        "cannot transform an empty bunch; was add_particles called?"
    );
    match direction {
        Direction::T2Z => {
            ensure!(
                bunch.frame() == Frame::Temporal,
                "bunch is already in the spatial frame"
            );
            let map = T2Z::new(pd);
            bunch.apply(|x, y, t, px, py, pt| map.advance(x, y, t, px, py, pt));
            bunch.set_frame(Frame::Spatial);
        }
        Direction::Z2T => {
            ensure!(
                bunch.frame() == Frame::Spatial,
                "bunch is already in the temporal frame"
            );
            let map = Z2T::new(pd);
            bunch.apply(|x, y, t, px, py, pt| map.advance(x, y, t, px, py, pt));
            bunch.set_frame(Frame::Temporal);
        }
    }
    Ok(())
}
