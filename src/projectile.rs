//! Projectile descriptors.
//!
//! A projectile only carries physical data; every solver reads it through the
//! [`Projectile`] trait so presets and user-defined bodies are interchangeable.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::constants::{CANNONBALL_DIAMETER_M, CANNONBALL_MASS_KG, SPHERE_DRAG_COEFFICIENT};
use crate::error::{ensure_non_negative, ensure_positive, Result};

/// Physical properties the drag integrator needs from a launched body
pub trait Projectile {
    /// Mass in kg
    fn mass(&self) -> f64;

    /// Diameter in meters
    fn diameter(&self) -> f64;

    /// Dimensionless drag coefficient, 0 for a drag-free body
    fn drag_coefficient(&self) -> f64;

    /// Frontal area in m²
    fn cross_sectional_area(&self) -> f64 {
        PI * self.diameter() * self.diameter() / 4.0
    }

    /// Check that the body is physically well formed
    fn validate(&self) -> Result<()> {
        ensure_positive("mass", self.mass())?;
        ensure_positive("diameter", self.diameter())?;
        ensure_non_negative("drag_coefficient", self.drag_coefficient())?;
        Ok(())
    }
}

/// Fixed cannonball preset: 3 kg iron sphere, 30 cm across
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cannonball;

impl Projectile for Cannonball {
    fn mass(&self) -> f64 {
        CANNONBALL_MASS_KG
    }

    fn diameter(&self) -> f64 {
        CANNONBALL_DIAMETER_M
    }

    fn drag_coefficient(&self) -> f64 {
        SPHERE_DRAG_COEFFICIENT
    }
}

/// User-configurable projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawProjectile")]
pub struct CustomProjectile {
    mass: f64,
    diameter: f64,
    drag_coefficient: f64,
}

impl CustomProjectile {
    /// Build a projectile, rejecting non-positive mass or diameter and negative drag
    pub fn new(mass: f64, diameter: f64, drag_coefficient: f64) -> Result<Self> {
        let projectile = CustomProjectile {
            mass,
            diameter,
            drag_coefficient,
        };
        projectile.validate()?;
        Ok(projectile)
    }

    /// Sphere with the standard smooth-sphere drag coefficient
    pub fn sphere(mass: f64, diameter: f64) -> Result<Self> {
        Self::new(mass, diameter, SPHERE_DRAG_COEFFICIENT)
    }
}

impl Projectile for CustomProjectile {
    fn mass(&self) -> f64 {
        self.mass
    }

    fn diameter(&self) -> f64 {
        self.diameter
    }

    fn drag_coefficient(&self) -> f64 {
        self.drag_coefficient
    }
}

impl<P: Projectile + ?Sized> Projectile for &P {
    fn mass(&self) -> f64 {
        (**self).mass()
    }

    fn diameter(&self) -> f64 {
        (**self).diameter()
    }

    fn drag_coefficient(&self) -> f64 {
        (**self).drag_coefficient()
    }
}

// Deserialization goes through the validating constructor
#[derive(Deserialize)]
struct RawProjectile {
    mass: f64,
    diameter: f64,
    #[serde(default = "default_drag_coefficient")]
    drag_coefficient: f64,
}

fn default_drag_coefficient() -> f64 {
    SPHERE_DRAG_COEFFICIENT
}

impl TryFrom<RawProjectile> for CustomProjectile {
    type Error = crate::error::BallisticsError;

    fn try_from(raw: RawProjectile) -> Result<Self> {
        CustomProjectile::new(raw.mass, raw.diameter, raw.drag_coefficient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannonball_preset() {
        let ball = Cannonball;
        assert_eq!(ball.mass(), 3.0);
        assert_eq!(ball.diameter(), 0.3);
        assert_eq!(ball.drag_coefficient(), 0.47);
        assert!(ball.validate().is_ok());
    }

    #[test]
    fn test_cross_sectional_area() {
        // π·d²/4 for d = 0.3 m
        let area = Cannonball.cross_sectional_area();
        assert!((area - 0.070686).abs() < 1e-6);

        let custom = CustomProjectile::new(1.0, 2.0, 0.5).unwrap();
        assert!((custom.cross_sectional_area() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_custom_projectile_validation() {
        assert!(CustomProjectile::new(1.0, 0.1, 0.0).is_ok());
        assert!(CustomProjectile::new(0.0, 0.1, 0.47).is_err());
        assert!(CustomProjectile::new(-1.0, 0.1, 0.47).is_err());
        assert!(CustomProjectile::new(1.0, 0.0, 0.47).is_err());
        assert!(CustomProjectile::new(1.0, 0.1, -0.1).is_err());
        assert!(CustomProjectile::new(f64::NAN, 0.1, 0.47).is_err());
    }

    #[test]
    fn test_sphere_uses_sphere_drag() {
        let sphere = CustomProjectile::sphere(2.0, 0.2).unwrap();
        assert_eq!(sphere.drag_coefficient(), SPHERE_DRAG_COEFFICIENT);
    }

    #[test]
    fn test_custom_projectile_from_json() {
        let projectile: CustomProjectile =
            serde_json::from_str(r#"{"mass": 1.5, "diameter": 0.1}"#).unwrap();
        assert_eq!(projectile.mass(), 1.5);
        assert_eq!(projectile.drag_coefficient(), SPHERE_DRAG_COEFFICIENT);

        let rejected = serde_json::from_str::<CustomProjectile>(r#"{"mass": -1, "diameter": 0.1}"#);
        assert!(rejected.is_err());
    }

    #[test]
    fn test_reference_forwards() {
        let ball = Cannonball;
        let by_ref: &dyn Projectile = &ball;
        assert_eq!(by_ref.mass(), ball.mass());
        assert_eq!((&ball).cross_sectional_area(), ball.cross_sectional_area());
    }
}
