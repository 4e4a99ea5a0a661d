use crate::bunch::Bunch;
use crate::elements::Element;
use anyhow::{ensure, Result};

/// Push every resident particle through `lattice`, element by element.
///
/// Elements are applied strictly in lattice order: element i+1 does not
/// start for any particle until element i has finished for all of them.
/// The variant dispatch is resolved once per element, outside the parallel
/// sweep, so the per-particle bodies run without per-particle branching.
pub fn push(bunch: &mut Bunch, lattice: &[Element]) -> Result<()> {
    ensure!(!lattice.is_empty(), "push called with an empty lattice");
    ensure!(
        !bunch.is_empty(),
        "push called before any particles were added to the bunch"
    );
    ensure!(
        bunch.refpart().is_set(),
        "push called before the reference particle was set"
    );
    let betgam = bunch.refpart().beta_gamma();

    for element in lattice {
        match element {
            Element::Drift(map) => {
                bunch.apply(|x, y, t, px, py, pt| map.advance(x, y, t, px, py, pt, betgam))
            }
            Element::Sbend(map) => {
                bunch.apply(|x, y, t, px, py, pt| map.advance(x, y, t, px, py, pt, betgam))
            }
            Element::Quad(map) => {
                bunch.apply(|x, y, t, px, py, pt| map.advance(x, y, t, px, py, pt, betgam))
            }
        }
    }
    Ok(())
}
