use serde::Deserialize;

pub mod drift;
pub mod quad;
pub mod sbend;

pub use drift::Drift;
pub use quad::Quad;
pub use sbend::Sbend;

/// The closed set of beamline elements a lattice may contain. Supporting a
/// new element kind means adding a variant here together with its map file,
/// keeping the same advance contract: position and momentum triples updated
/// in place, parameters immutable.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Drift(Drift),
    Sbend(Sbend),
    Quad(Quad),
}

/// Ordered traversal path of the machine. Order is physical and is never
/// rearranged or deduplicated.
pub type Lattice = Vec<Element>;
