use crate::Float;
use serde::Deserialize;

/// A sector bending magnet.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Sbend {
    /// Arc length in m.
    pub ds: Float,
    /// Radius of curvature of the design orbit in m.
    pub rc: Float,
}

impl Sbend {
    pub fn new(ds: Float, rc: Float) -> Sbend {
        Sbend { ds, rc }
    }

    /// Advance one particle through the bend: a rotation in the bending
    /// plane with dispersion coupling to pt, a plain drift in the vertical
    /// plane, and the matching path-length terms in the longitudinal slot.
    /// The map is symplectic and reduces to the drift as ds/rc -> 0.
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
        let bet = betgam / (1.0 + betgam2).sqrt();

        let theta = self.ds / self.rc;
        let (sin_t, cos_t) = theta.sin_cos();

        let xf = cos_t * *x + self.rc * sin_t * *px - self.rc / bet * (1.0 - cos_t) * *pt;
        let pxf = -sin_t / self.rc * *x + cos_t * *px - sin_t / bet * *pt;
        let tf = sin_t / bet * *x + self.rc / bet * (1.0 - cos_t) * *px + *t
            + (self.rc * theta / betgam2 - self.rc * (theta - sin_t) / (bet * bet)) * *pt;

        *y += self.rc * theta * *py;
        // py unchanged
        *x = xf;
        *px = pxf;
        *t = tf;
        // pt unchanged
    }
}
