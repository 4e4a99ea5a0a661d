use crate::Float;
use serde::Deserialize;

/// A hard-edge quadrupole.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Quad {
    /// Segment length in m.
    pub ds: Float,
    /// Focusing strength in 1/m^2. k > 0 focuses horizontally and
    /// defocuses vertically; k < 0 the other way around.
    pub k: Float,
}

impl Quad {
    pub fn new(ds: Float, k: Float) -> Quad {
        Quad { ds, k }
    }

    /// Advance one particle through the quadrupole: a rotation in the
    /// focusing plane, a hyperbolic rotation in the defocusing plane, and
    /// the drift-like longitudinal slip. The branch below depends only on
    /// the sign of k, so it is uniform across the whole bunch.
    #[inline(always)]
    pub fn advance(
        &self,
        x: &mut Float,
        y: &mut Float,
        t: &mut Float,
        px: &mut Float,
        py: &mut Float,
        pt: &mut Float,
        betgam: Float,
    ) {
        let betgam2 = betgam * betgam;
        let om = self.k.abs().sqrt();
        let (sin_f, cos_f) = (om * self.ds).sin_cos();
        let sinh_d = (om * self.ds).sinh();
        let cosh_d = (om * self.ds).cosh();

        if self.k > 0.0 {
            // x focusing, y defocusing
            let xf = cos_f * *x + sin_f / om * *px;
            let pxf = -om * sin_f * *x + cos_f * *px;
            let yf = cosh_d * *y + sinh_d / om * *py;
            let pyf = om * sinh_d * *y + cosh_d * *py;
            *x = xf;
            *px = pxf;
            *y = yf;
            *py = pyf;
        } else {
            // x defocusing, y focusing
            let xf = cosh_d * *x + sinh_d / om * *px;
            let pxf = om * sinh_d * *x + cosh_d * *px;
            let yf = cos_f * *y + sin_f / om * *py;
            let pyf = -om * sin_f * *y + cos_f * *py;
            *x = xf;
            *px = pxf;
            *y = yf;
            *py = pyf;
        }

        *t += self.ds / betgam2 * *pt;
        // pt unchanged
    }
}
