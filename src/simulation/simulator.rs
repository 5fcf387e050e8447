//! A small driver that owns a [`PointSet`] and a [`SpatialTree`] and advances them in time.
//!
//! Every step rebuilds the tree from scratch, evaluates the field at each body in parallel
//! and integrates with the scheme chosen by [`SimulationConfig::model`].
//!
//! # Example
//!
//! ```
//! use rs_treecode::models::Vec2;
//! use rs_treecode::simulation::{SimulationConfig, Simulator};
//! use rs_treecode::utils::TreeConfig;
//!
//! let mut sim = Simulator::new(TreeConfig::default(), SimulationConfig::default())
//!     .expect("Failed to create simulator");
//! sim.add_body(Vec2::new(0.3, 0.5), 1.0, Vec2::ZERO).unwrap();
//! sim.add_body(Vec2::new(0.7, 0.5), 1.0, Vec2::ZERO).unwrap();
//!
//! sim.run(10, |_| {}).expect("Simulation failed");
//! assert_eq!(sim.step_count(), 10);
//!
//! // The two bodies have started falling towards each other.
//! assert!(sim.bodies().get(0).unwrap().velocity.x > 0.0);
//! assert!(sim.bodies().get(1).unwrap().velocity.x < 0.0);
//! ```
use log::debug;
use crate::forces::{DirectEvaluator, ForceEvaluator, Interaction};
use crate::models::Vec2;
use crate::particles::PointSet;
use crate::simulation::{Boundary, InteractionModel, SimulationConfig};
use crate::tree::SpatialTree;
use crate::utils::{reflect_into_domain, TreeCodeError, TreeConfig};

pub struct Simulator {
    tree_config: TreeConfig,
    config: SimulationConfig,
    kernel: Interaction,
    bodies: PointSet,
    tree: SpatialTree,
    field: Vec<Vec2>,
    steps: u64,
}

impl Simulator {
    /// Creates an empty simulator.
    ///
    /// # Errors
    ///
    /// Returns `TreeCodeError::InvalidConfiguration` if either configuration fails validation.
    pub fn new(tree_config: TreeConfig, config: SimulationConfig) -> Result<Self, TreeCodeError> {
        Simulator::with_bodies(tree_config, config, PointSet::with_config(&tree_config))
    }

    /// Creates a simulator that takes ownership of `bodies`.
    ///
    /// # Errors
    ///
    /// Returns an error if either configuration is invalid, or if `bodies` holds more
    /// bodies than `tree_config.max_particles`.
    pub fn with_bodies(
        tree_config: TreeConfig,
        config: SimulationConfig,
        bodies: PointSet,
    ) -> Result<Self, TreeCodeError> {
        tree_config.validate()?;
        config.validate()?;
        if bodies.count() > tree_config.max_particles {
            return Err(TreeCodeError::CapacityExceeded { capacity: tree_config.max_particles });
        }
        Ok(Simulator {
            tree_config,
            config,
            kernel: config.kernel(&tree_config),
            field: vec![Vec2::ZERO; bodies.count()],
            tree: SpatialTree::new(&tree_config),
            bodies,
            steps: 0,
        })
    }

    /// Appends a body and returns its index.
    ///
    /// # Errors
    ///
    /// `CapacityExceeded` once `max_particles` bodies are present, `InvalidBody` for
    /// non-finite input.
    pub fn add_body(&mut self, position: Vec2, mass: f32, velocity: Vec2) -> Result<usize, TreeCodeError> {
        if self.bodies.count() >= self.tree_config.max_particles {
            return Err(TreeCodeError::CapacityExceeded { capacity: self.tree_config.max_particles });
        }
        let index = self.bodies.append(position, mass, velocity)?;
        self.field.push(Vec2::ZERO);
        Ok(index)
    }

    pub fn bodies(&self) -> &PointSet {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut PointSet {
        &mut self.bodies
    }

    /// The tree as built by the most recent step or [`Simulator::compute_field`].
    pub fn tree(&self) -> &SpatialTree {
        &self.tree
    }

    /// The field evaluated at each body by the most recent step.
    pub fn field(&self) -> &[Vec2] {
        &self.field
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tree_config(&self) -> &TreeConfig {
        &self.tree_config
    }

    pub fn kernel(&self) -> Interaction {
        self.kernel
    }

    pub fn step_count(&self) -> u64 {
        self.steps
    }

    /// Rebuilds the tree and evaluates the field at every body without moving anything.
    pub fn compute_field(&mut self) -> Result<&[Vec2], TreeCodeError> {
        self.tree.rebuild(&self.bodies)?;
        self.field.resize(self.bodies.count(), Vec2::ZERO);
        let evaluator = ForceEvaluator::from_config(&self.tree, &self.tree_config);
        evaluator.evaluate_bodies_into(&self.bodies, &self.kernel, &mut self.field);
        Ok(&self.field)
    }

    /// Advances the simulation by one `dt` and returns the field that drove the step.
    pub fn step(&mut self) -> Result<&[Vec2], TreeCodeError> {
        self.compute_field()?;

        let SimulationConfig { dt, coupling, model, boundary, .. } = self.config;
        let side = self.tree.domain_side();
        for (body, f) in self.bodies.iter_mut().zip(&self.field) {
            match model {
                InteractionModel::Gravity => {
                    body.velocity += *f * (coupling * dt);
                }
                InteractionModel::Vortex => {
                    body.velocity = *f * coupling;
                }
            }
            body.position += body.velocity * dt;
            if boundary == Boundary::Reflect {
                let (position, velocity) = reflect_into_domain(body.position, body.velocity, 0.0, side);
                body.position = position;
                body.velocity = velocity;
            }
        }

        self.steps += 1;
        if self.steps % 1000 == 0 {
            debug!("Completed {} steps with {} bodies", self.steps, self.bodies.count());
        }
        Ok(&self.field)
    }

    /// Runs `steps` steps, handing the simulator to `observer` after each one.
    pub fn run<F>(&mut self, steps: usize, mut observer: F) -> Result<(), TreeCodeError>
    where
        F: FnMut(&Simulator),
    {
        for _ in 0..steps {
            self.step()?;
            observer(&*self);
        }
        Ok(())
    }

    /// Tree evaluation at an arbitrary point against the last built tree.
    pub fn field_at(&self, query: Vec2) -> Vec2 {
        ForceEvaluator::from_config(&self.tree, &self.tree_config).evaluate(query, None, &self.kernel)
    }

    /// Exact field at `query` over the current bodies.
    pub fn direct_field_at(&self, query: Vec2) -> Vec2 {
        DirectEvaluator::evaluate(query, self.bodies.as_slice(), None, &self.kernel)
    }
}
