// src/utils/constants_config.rs
use crate::forces::Expansion;
use crate::utils::{
    DEFAULT_TREE_CONFIG,
    MAX_DEPTH_LIMIT,
    TreeCodeError
};

/// Capacity limits and numerical knobs shared by the point set, the tree and the evaluators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeConfig {
    pub max_particles: usize,
    pub max_nodes: usize,
    pub theta: f32,
    pub softening: f32,
    pub max_depth: u32,
    pub bucket_capacity: usize,
    pub domain_side: f32,
    /// Far-field expansion used by evaluators built with `ForceEvaluator::from_config`.
    pub expansion: Expansion,
}


impl Default for TreeConfig {
    fn default() -> Self {
        DEFAULT_TREE_CONFIG
    }
}

impl TreeConfig {
    pub fn new(
        max_particles: Option<usize>,
        max_nodes: Option<usize>,
        theta: Option<f32>,
        softening: Option<f32>,
        max_depth: Option<u32>,
        bucket_capacity: Option<usize>,
    ) -> Self {
        let default = DEFAULT_TREE_CONFIG;
        Self {
            max_particles: max_particles.unwrap_or(default.max_particles),
            max_nodes: max_nodes.unwrap_or(default.max_nodes),
            theta: theta.unwrap_or(default.theta),
            softening: softening.unwrap_or(default.softening),
            max_depth: max_depth.unwrap_or(default.max_depth),
            bucket_capacity: bucket_capacity.unwrap_or(default.bucket_capacity),
            domain_side: default.domain_side,
            expansion: default.expansion,
        }
    }

    /// Sizes the particle and node budgets for `n` bodies, keeping every other value.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_treecode::utils::TreeConfig;
    ///
    /// let config = TreeConfig::default().with_capacity(1000);
    /// assert_eq!(config.max_particles, 1000);
    /// assert_eq!(config.max_nodes, 4000);
    /// ```
    pub fn with_capacity(mut self, n: usize) -> Self {
        self.max_particles = n;
        self.max_nodes = (4 * n).max(1);
        self
    }

    pub fn with_theta(mut self, theta: f32) -> Self {
        self.theta = theta;
        self
    }

    pub fn with_softening(mut self, softening: f32) -> Self {
        self.softening = softening;
        self
    }

    pub fn with_expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    pub fn with_domain_side(mut self, side: f32) -> Self {
        self.domain_side = side;
        self
    }

    pub fn validate(&self) -> Result<(), TreeCodeError> {
        if self.max_nodes == 0 {
            return Err(TreeCodeError::InvalidConfiguration("max_nodes must hold at least the root".to_string()));
        }
        if !self.theta.is_finite() || self.theta < 0.0 {
            return Err(TreeCodeError::InvalidConfiguration(format!("theta must be finite and non-negative, got {}", self.theta)));
        }
        if !self.softening.is_finite() || self.softening <= 0.0 {
            return Err(TreeCodeError::InvalidConfiguration(format!("softening must be finite and positive, got {}", self.softening)));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(TreeCodeError::InvalidConfiguration(format!(
                "max_depth must be at most {}, got {}", MAX_DEPTH_LIMIT, self.max_depth
            )));
        }
        if self.bucket_capacity < 2 {
            return Err(TreeCodeError::InvalidConfiguration("bucket_capacity must hold at least two bodies".to_string()));
        }
        if !self.domain_side.is_finite() || self.domain_side <= 0.0 {
            return Err(TreeCodeError::InvalidConfiguration(format!("domain_side must be positive, got {}", self.domain_side)));
        }
        Ok(())
    }
}
