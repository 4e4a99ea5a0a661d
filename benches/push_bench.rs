#[macro_use]
extern crate criterion;

use criterion::Criterion;

use beamline_rs::bunch::{Bunch, RefPart};
use beamline_rs::elements::{Drift, Element, Quad};
use beamline_rs::init::gaussian_bunch;
use beamline_rs::push::push;
use beamline_rs::{Config, Output, Params, PushFrame, Setup, Sim};

fn setup(n_prtl: usize) -> (Bunch, Vec<Element>) {
    let cfg = Config {
        output: Output {
            write_output: false,
            output_interval: 100,
            stride: 4,
        },
        setup: Setup { periods: 1 },
        params: Params {
            n_prtl,
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
        lattice: vec![
            Element::Drift(Drift::new(0.25)),
            Element::Quad(Quad::new(1.0, 1.0)),
            Element::Drift(Drift::new(0.5)),
            Element::Quad(Quad::new(1.0, -1.0)),
            Element::Drift(Drift::new(0.25)),
        ],
    };
    let sim = Sim::new(cfg);
    let coords = gaussian_bunch(&sim);
    let mut bunch = Bunch::new(&sim);
    bunch.set_ref_particle(RefPart::from_betgam(sim.betgam));
    bunch
        .add_particles(
            &coords.x,
            &coords.y,
            &coords.t,
            &coords.px,
            &coords.py,
            &coords.pt,
            sim.config.params.qm,
            sim.config.params.bunch_chg,
        )
        .expect("bench bunch setup should succeed");
    let lattice = sim.config.lattice.clone();
    (bunch, lattice)
}

fn criterion_benchmark(c: &mut Criterion) {
    let (mut bunch, lattice) = setup(100_000);
    c.bench_function("fodo push 100k", move |b| {
        b.iter(|| push(&mut bunch, &lattice).unwrap())
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
