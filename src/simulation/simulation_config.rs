use crate::forces::Interaction;
use crate::utils::{TreeCodeError, TreeConfig, VORTEX_SOFTENING_EPSILON};

/// How the evaluated field moves the bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionModel {
    /// The field is an acceleration; semi-implicit Euler, `v += a * coupling * dt; x += v * dt`.
    Gravity,
    /// The field is a velocity (point vortices); `x += u * coupling * dt`.
    Vortex,
}

/// What happens to bodies that leave the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Bodies are mirrored back inside and their velocity component is flipped.
    Reflect,
    /// Bodies may leave; the tree files them into the nearest edge cells.
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    pub dt: f32,
    /// Scales the field before integration (the gravitational constant for gravity).
    pub coupling: f32,
    pub model: InteractionModel,
    pub boundary: Boundary,
    /// Kernel softening; `None` uses `TreeConfig::softening`.
    pub softening: Option<f32>,
}

pub const DEFAULT_SIMULATION_CONFIG: SimulationConfig = SimulationConfig {
    dt: 1e-4,
    coupling: 0.01,
    model: InteractionModel::Gravity,
    boundary: Boundary::Reflect,
    softening: None,
};

impl Default for SimulationConfig {
    fn default() -> Self {
        DEFAULT_SIMULATION_CONFIG
    }
}

impl SimulationConfig {
    pub fn new(
        dt: Option<f32>,
        coupling: Option<f32>,
        model: Option<InteractionModel>,
        boundary: Option<Boundary>,
    ) -> Self {
        let default = DEFAULT_SIMULATION_CONFIG;
        Self {
            dt: dt.unwrap_or(default.dt),
            coupling: coupling.unwrap_or(default.coupling),
            model: model.unwrap_or(default.model),
            boundary: boundary.unwrap_or(default.boundary),
            softening: default.softening,
        }
    }

    /// Point-vortex preset: tiny steps, unit coupling, open boundary, vortex softening.
    pub fn vortex() -> Self {
        SimulationConfig {
            dt: 2e-6,
            coupling: 1.0,
            model: InteractionModel::Vortex,
            boundary: Boundary::Open,
            softening: Some(VORTEX_SOFTENING_EPSILON),
        }
    }

    pub fn with_softening(mut self, softening: f32) -> Self {
        self.softening = Some(softening);
        self
    }

    /// The kernel matching `model`, softened by `softening` or else `tree_config.softening`.
    ///
    /// ```
    /// use rs_treecode::forces::Interaction;
    /// use rs_treecode::simulation::SimulationConfig;
    /// use rs_treecode::utils::{TreeConfig, VORTEX_SOFTENING_EPSILON};
    ///
    /// let kernel = SimulationConfig::vortex().kernel(&TreeConfig::default());
    /// assert_eq!(kernel, Interaction::PointVortex { softening: VORTEX_SOFTENING_EPSILON });
    /// ```
    pub fn kernel(&self, tree_config: &TreeConfig) -> Interaction {
        let softening = self.softening.unwrap_or(tree_config.softening);
        match self.model {
            InteractionModel::Gravity => Interaction::InverseSquare { softening },
            InteractionModel::Vortex => Interaction::PointVortex { softening },
        }
    }

    pub fn validate(&self) -> Result<(), TreeCodeError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(TreeCodeError::InvalidConfiguration(format!("dt must be positive, got {}", self.dt)));
        }
        if !self.coupling.is_finite() {
            return Err(TreeCodeError::InvalidConfiguration(format!("coupling must be finite, got {}", self.coupling)));
        }
        if let Some(softening) = self.softening {
            if !softening.is_finite() || softening <= 0.0 {
                return Err(TreeCodeError::InvalidConfiguration(format!("softening must be finite and positive, got {}", softening)));
            }
        }
        Ok(())
    }
}
