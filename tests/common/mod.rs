use beamline_rs::bunch::{Bunch, RefPart};
use beamline_rs::elements::{Drift, Element};
use beamline_rs::{Config, Float, Output, Params, PushFrame, Setup, Sim};

pub fn setup_sim() -> Sim {
    // This is a function that sets up a dummy small
    // simulation so that it can be used in testing.
    let cfg = Config {
        output: Output {
            write_output: false,
            output_interval: 100,
            stride: 4,
        },
        setup: Setup { periods: 1 },
        params: Params {
            n_prtl: 128,
            betgam: 2.0,
            qm: 1.0,
            bunch_chg: 1.0e-9,
            sig_x: 1.0e-3,
            sig_y: 1.0e-3,
            sig_t: 1.0e-3,
            sig_px: 1.0e-4,
            sig_py: 1.0e-4,
            sig_pt: 2.0e-4,
            push_frame: PushFrame::Temporal,
        },
        lattice: vec![Element::Drift(Drift::new(1.0))],
    };
    Sim::new(cfg)
}

/// Build a bunch from explicit (x, y, t, px, py, pt) rows, with the
/// reference particle taken from the sim's design betgam.
pub fn bunch_from_coords(sim: &Sim, coords: &[[Float; 6]]) -> Bunch {
    let mut bunch = Bunch::new(sim);
    bunch.set_ref_particle(RefPart::from_betgam(sim.betgam));
    let x: Vec<Float> = coords.iter().map(|c| c[0]).collect();
    let y: Vec<Float> = coords.iter().map(|c| c[1]).collect();
    let t: Vec<Float> = coords.iter().map(|c| c[2]).collect();
    let px: Vec<Float> = coords.iter().map(|c| c[3]).collect();
    let py: Vec<Float> = coords.iter().map(|c| c[4]).collect();
    let pt: Vec<Float> = coords.iter().map(|c| c[5]).collect();
    bunch
        .add_particles(&x, &y, &t, &px, &py, &pt, 1.0, 1.0e-9)
        .expect("adding test particles should succeed");
    bunch
}
