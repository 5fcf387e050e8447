use crate::models::Vec2;
use crate::utils::TreeCodeError;

/// A point mass (or point vortex, when `mass` is read as circulation).
///
/// Mass may be negative; vortex simulations pair positive and negative circulations.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub mass: f32,
    pub velocity: Vec2,
}

impl Body {
    /// Creates a new body.
    ///
    /// # Errors
    ///
    /// Returns `TreeCodeError::InvalidBody` if any component is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_treecode::models::{Body, Vec2};
    ///
    /// let body = Body::new(Vec2::new(0.25, 0.75), 2.0, Vec2::ZERO).unwrap();
    /// assert_eq!(body.mass, 2.0);
    ///
    /// assert!(Body::new(Vec2::new(f32::NAN, 0.0), 1.0, Vec2::ZERO).is_err());
    /// ```
    pub fn new(position: Vec2, mass: f32, velocity: Vec2) -> Result<Self, TreeCodeError> {
        let body = Body { position, mass, velocity };
        body.validate()?;
        Ok(body)
    }

    pub fn at_rest(position: Vec2, mass: f32) -> Result<Self, TreeCodeError> {
        Body::new(position, mass, Vec2::ZERO)
    }

    pub fn validate(&self) -> Result<(), TreeCodeError> {
        if !self.position.is_finite() {
            return Err(TreeCodeError::InvalidBody(format!("non-finite position {:?}", self.position)));
        }
        if !self.mass.is_finite() {
            return Err(TreeCodeError::InvalidBody(format!("non-finite mass {}", self.mass)));
        }
        if !self.velocity.is_finite() {
            return Err(TreeCodeError::InvalidBody(format!("non-finite velocity {:?}", self.velocity)));
        }
        Ok(())
    }

    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.norm_sqr()
    }
}
