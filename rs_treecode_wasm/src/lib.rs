// rs_treecode_wasm/src/lib.rs
// Browser-facing wrapper around the treecode simulator.

use wasm_bindgen::prelude::*;
use rs_treecode::models::Vec2;
use rs_treecode::simulation::{SimulationConfig, Simulator};
use rs_treecode::utils::{TreeCodeError, TreeConfig};

fn to_js(e: TreeCodeError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub struct WasmSimulation {
    simulator: Simulator,
}

#[wasm_bindgen]
impl WasmSimulation {
    /// A gravity simulation, or a point-vortex one when `vortex` is true.
    #[wasm_bindgen(constructor)]
    pub fn new(vortex: bool) -> Result<WasmSimulation, JsValue> {
        let config = if vortex { SimulationConfig::vortex() } else { SimulationConfig::default() };
        Simulator::new(TreeConfig::default(), config)
            .map(|simulator| WasmSimulation { simulator })
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn add_body(&mut self, x: f32, y: f32, mass: f32, vx: f32, vy: f32) -> Result<usize, JsValue> {
        self.simulator
            .add_body(Vec2::new(x, y), mass, Vec2::new(vx, vy))
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn step(&mut self) -> Result<(), JsValue> {
        self.simulator.step().map(|_| ()).map_err(|e| {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
            to_js(e)
        })
    }

    /// Positions as a flat `[x0, y0, x1, y1, ...]` array.
    #[wasm_bindgen]
    pub fn positions(&self) -> js_sys::Float32Array {
        let flat: Vec<f32> = self.simulator.bodies().iter()
            .flat_map(|b| [b.position.x, b.position.y])
            .collect();
        js_sys::Float32Array::from(flat.as_slice())
    }

    /// Field at `(x, y)` as `[fx, fy]`, from the tree built by the last step.
    #[wasm_bindgen]
    pub fn field_at(&self, x: f32, y: f32) -> js_sys::Float32Array {
        let f = self.simulator.field_at(Vec2::new(x, y));
        js_sys::Float32Array::from(&[f.x, f.y][..])
    }

    #[wasm_bindgen(getter)]
    pub fn body_count(&self) -> usize {
        self.simulator.bodies().count()
    }

    #[wasm_bindgen(getter)]
    pub fn step_count(&self) -> f64 {
        self.simulator.step_count() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bodies_fall_together() {
        let mut sim = WasmSimulation::new(false).unwrap();
        sim.add_body(0.3, 0.5, 1.0, 0.0, 0.0).unwrap();
        sim.add_body(0.7, 0.5, 1.0, 0.0, 0.0).unwrap();
        sim.step().unwrap();
        assert_eq!(sim.body_count(), 2);
        assert_eq!(sim.step_count(), 1.0);
        let v = sim.simulator.bodies().get(0).unwrap().velocity;
        assert!(v.x > 0.0);
    }
}
