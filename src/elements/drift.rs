use crate::Float;
use serde::Deserialize;

/// A field-free straight segment.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Drift {
    /// Segment length in m.
    pub ds: Float,
}

impl Drift {
    pub fn new(ds: Float) -> Drift {
        Drift { ds }
    }

    /// Advance one particle through the drift. This map is exact, not an
    /// approximation: transverse positions advance linearly with the
    /// transverse momenta, the longitudinal slot slips by ds/(betgam)^2
    /// per unit pt. betgam is the reference normalized momentum.
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

        *x += self.ds * *px;
        // px unchanged
        *y += self.ds * *py;
        // py unchanged
        *t += self.ds / betgam2 * *pt;
        // pt unchanged
    }
}
