//! Fixed-size plant state vector.
//!
//! The controlled plant is a cart with two articulated joints. Its state is
//! the six-vector `[x, theta1, theta2, x_dot, theta1_dot, theta2_dot]`:
//! cart position, the two joint angles, and their time derivatives. Control
//! laws read this vector once per step and never mutate it.

use nalgebra::Vector6;

use crate::Real;

/// Plant state: positions first, velocities second.
///
/// Layout is fixed and part of the controller contract; accessors are
/// preferred over raw indexing in downstream code.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlantState(Vector6<Real>);

impl PlantState {
    /// Build from explicit components.
    pub fn new(
        cart_pos: Real,
        theta1: Real,
        theta2: Real,
        cart_vel: Real,
        theta1_dot: Real,
        theta2_dot: Real,
    ) -> Self {
        Self(Vector6::new(
            cart_pos, theta1, theta2, cart_vel, theta1_dot, theta2_dot,
        ))
    }

    /// All-zero state (plant at the origin, at rest).
    pub fn zero() -> Self {
        Self(Vector6::zeros())
    }

    /// Wrap an existing vector without copying.
    pub fn from_vector(v: Vector6<Real>) -> Self {
        Self(v)
    }

    pub fn cart_pos(&self) -> Real {
        self.0[0]
    }

    pub fn theta1(&self) -> Real {
        self.0[1]
    }

    pub fn theta2(&self) -> Real {
        self.0[2]
    }

    pub fn cart_vel(&self) -> Real {
        self.0[3]
    }

    pub fn theta1_dot(&self) -> Real {
        self.0[4]
    }

    pub fn theta2_dot(&self) -> Real {
        self.0[5]
    }

    /// True when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }

    /// Borrow the underlying vector.
    pub fn as_vector(&self) -> &Vector6<Real> {
        &self.0
    }
}
