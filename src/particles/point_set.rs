//! Flat, append-only storage for the bodies of a simulation.
//!
//! The point set outlives the spatial tree: bodies move every step while the tree is
//! rebuilt from scratch. Indices returned by [`PointSet::append`] stay valid for the
//! lifetime of the set since bodies are never removed.
use log::warn;
use crate::models::{Body, Vec2};
use crate::utils::{weighted_centroid, TreeCodeError, TreeConfig};

#[derive(Debug, Clone)]
pub struct PointSet {
    bodies: Vec<Body>,
    capacity: usize,
}

impl PointSet {
    /// Creates an empty point set that accepts at most `capacity` bodies.
    pub fn new(capacity: usize) -> Self {
        PointSet {
            bodies: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn with_config(config: &TreeConfig) -> Self {
        PointSet::new(config.max_particles)
    }

    pub fn count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Appends a body and returns its index.
    ///
    /// # Errors
    ///
    /// * `TreeCodeError::CapacityExceeded` if the set is full.
    /// * `TreeCodeError::InvalidBody` if a component is not finite.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_treecode::models::Vec2;
    /// use rs_treecode::particles::PointSet;
    ///
    /// let mut set = PointSet::new(1);
    /// let i = set.append(Vec2::new(0.5, 0.5), 1.0, Vec2::ZERO).unwrap();
    /// assert_eq!(i, 0);
    /// assert!(set.append(Vec2::new(0.1, 0.1), 1.0, Vec2::ZERO).is_err());
    /// ```
    pub fn append(&mut self, position: Vec2, mass: f32, velocity: Vec2) -> Result<usize, TreeCodeError> {
        if self.bodies.len() == self.capacity {
            warn!("Point set is full ({} bodies), body at {:?} rejected", self.capacity, position);
            return Err(TreeCodeError::CapacityExceeded { capacity: self.capacity });
        }
        let body = Body::new(position, mass, velocity)?;
        self.bodies.push(body);
        Ok(self.bodies.len() - 1)
    }

    pub fn append_at_rest(&mut self, position: Vec2, mass: f32) -> Result<usize, TreeCodeError> {
        self.append(position, mass, Vec2::ZERO)
    }

    pub fn get(&self, index: usize) -> Result<&Body, TreeCodeError> {
        let count = self.bodies.len();
        self.bodies
            .get(index)
            .ok_or(TreeCodeError::IndexOutOfBounds { index, count })
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut Body, TreeCodeError> {
        let count = self.bodies.len();
        self.bodies
            .get_mut(index)
            .ok_or(TreeCodeError::IndexOutOfBounds { index, count })
    }

    /// Overwrites the body at `index`, validating it first.
    pub fn set(&mut self, index: usize, body: Body) -> Result<(), TreeCodeError> {
        body.validate()?;
        *self.get_mut(index)? = body;
        Ok(())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Body> {
        self.bodies.iter_mut()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn positions(&self) -> Vec<Vec2> {
        self.bodies.iter().map(|b| b.position).collect()
    }

    pub fn total_mass(&self) -> f32 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Mass-weighted centroid of all bodies, `None` when the total mass is zero.
    pub fn mass_weighted_centroid(&self) -> Option<Vec2> {
        weighted_centroid(self.bodies.iter().map(|b| (b.position, b.mass)))
    }
}
