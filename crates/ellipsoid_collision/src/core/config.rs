//! # Collision Configuration
//!
//! Tunables for the ellipsoid collision manager. Values are per actor in
//! practice (a camera and a character usually want different radii), so
//! this struct is cheap to clone and can be loaded from TOML or RON.
//!
//! ```toml
//! radius = [0.5, 0.9, 0.5]
//! sliding_epsilon = 0.0005
//! gravity = [0.0, -0.1, 0.0]
//! ```

use serde::{Serialize, Deserialize};

use crate::config::Config;
use crate::foundation::math::{self, Vec3};
use crate::physics::CollisionError;

/// Default minimum distance kept from any surface, in ellipsoid space
pub const DEFAULT_SLIDING_EPSILON: f32 = 0.0005;

/// # Collision Configuration
///
/// Defaults for building a [`CollisionRequest`](crate::physics::CollisionRequest).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Per-axis ellipsoid radii
    pub radius: Vec3,
    /// Minimum approach distance kept from any surface
    pub sliding_epsilon: f32,
    /// Displacement applied by the gravity pass each step
    pub gravity: Vec3,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            radius: Vec3::new(1.0, 1.0, 1.0),
            sliding_epsilon: DEFAULT_SLIDING_EPSILON,
            gravity: Vec3::zeros(),
        }
    }
}

impl CollisionConfig {
    /// Builder-style radius override
    pub fn with_radius(mut self, radius: Vec3) -> Self {
        self.radius = radius;
        self
    }
    
    /// Builder-style gravity override
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }
    
    /// Builder-style sliding epsilon override
    pub fn with_sliding_epsilon(mut self, sliding_epsilon: f32) -> Self {
        self.sliding_epsilon = sliding_epsilon;
        self
    }
    
    /// Validate the configuration
    ///
    /// A zero radius axis is allowed here: it turns collision into a
    /// no-op rather than an error.
    pub fn validate(&self) -> Result<(), CollisionError> {
        if !(self.sliding_epsilon.is_finite() && self.sliding_epsilon > 0.0) {
            return Err(CollisionError::InvalidSlidingEpsilon(self.sliding_epsilon));
        }
        if !math::is_finite(&self.radius) {
            return Err(CollisionError::NonFiniteInput("radius"));
        }
        if !math::is_finite(&self.gravity) {
            return Err(CollisionError::NonFiniteInput("gravity"));
        }
        Ok(())
    }
}

impl Config for CollisionConfig {}
