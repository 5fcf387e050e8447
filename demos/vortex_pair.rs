//! Runs the counter-rotating vortex pair and prints where it goes.
//!
//! `RUST_LOG=debug cargo run --example vortex_pair` also shows per-build tree statistics.
use log::info;
use rs_treecode::simulation::{vortex_energy, vortex_pair, SimulationConfig, Simulator};
use rs_treecode::utils::{TreeCodeError, TreeConfig};

const STEPS: usize = 2000;
const REPORT_EVERY: u64 = 200;

fn main() -> Result<(), TreeCodeError> {
    env_logger::init();

    let tree_config = TreeConfig::default();
    let bodies = vortex_pair(&tree_config)?;
    let mut sim = Simulator::with_bodies(tree_config, SimulationConfig::vortex(), bodies)?;
    let softening = sim.kernel().softening();
    let initial_energy = vortex_energy(sim.bodies(), softening);
    info!("Starting vortex pair, energy {:.6}", initial_energy);

    sim.run(STEPS, |s| {
        if s.step_count() % REPORT_EVERY == 0 {
            let positions = s.bodies().positions();
            let midpoint = (positions[0] + positions[1]) * 0.5;
            println!(
                "step {:>5}  midpoint ({:.5}, {:.5})  separation {:.6}  energy {:.6}",
                s.step_count(),
                midpoint.x,
                midpoint.y,
                (positions[1] - positions[0]).norm(),
                vortex_energy(s.bodies(), softening),
            );
        }
    })?;

    let field = sim.field_at(sim.bodies().positions()[0] * 0.5);
    println!("Field halfway to the origin: ({:.3}, {:.3})", field.x, field.y);
    println!("Tree: {:?}", sim.tree().stats());
    Ok(())
}
