//! JSON simulation configs.
//!
//! ```json
//! {
//!   "launch": { "velocity": 10.0, "angle_degrees": 45.0, "initial_height": 10.0 },
//!   "projectile": { "kind": "custom", "mass": 3.0, "diameter": 0.3 },
//!   "integrator": { "time_step": 0.001, "impact_angle_model": "terminal-velocity" }
//! }
//! ```
//!
//! Leaving out `projectile` selects the drag-free solver.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::{DRAG_TIME_STEP_S, MAX_INTEGRATION_STEPS};
use crate::drag_integrator::{DragIntegrator, ImpactAngleModel};
use crate::error::{BallisticsError, Result};
use crate::launch::LaunchParameters;
use crate::projectile::{Cannonball, CustomProjectile, Projectile};
use crate::trajectory::Trajectory;

/// Projectile selection in a config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ProjectileConfig {
    Cannonball,
    Custom(CustomProjectile),
}

impl Projectile for ProjectileConfig {
    fn mass(&self) -> f64 {
        match self {
            ProjectileConfig::Cannonball => Cannonball.mass(),
            ProjectileConfig::Custom(p) => p.mass(),
        }
    }

    fn diameter(&self) -> f64 {
        match self {
            ProjectileConfig::Cannonball => Cannonball.diameter(),
            ProjectileConfig::Custom(p) => p.diameter(),
        }
    }

    fn drag_coefficient(&self) -> f64 {
        match self {
            ProjectileConfig::Cannonball => Cannonball.drag_coefficient(),
            ProjectileConfig::Custom(p) => p.drag_coefficient(),
        }
    }
}

/// Drag integrator settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegratorConfig {
    pub time_step: f64,
    pub max_steps: usize,
    pub impact_angle_model: ImpactAngleModel,
    /// One point per step instead of `sample_count` resampled points
    pub dense: bool,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            time_step: DRAG_TIME_STEP_S,
            max_steps: MAX_INTEGRATION_STEPS,
            impact_angle_model: ImpactAngleModel::default(),
            dense: true,
        }
    }
}

impl IntegratorConfig {
    pub fn to_integrator(&self) -> DragIntegrator {
        let mut integrator = DragIntegrator::new();
        integrator.set_time_step(self.time_step);
        integrator.set_max_steps(self.max_steps);
        integrator.set_impact_angle_model(self.impact_angle_model);
        integrator
    }
}

/// A complete single-launch simulation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub launch: LaunchParameters,
    #[serde(default)]
    pub projectile: Option<ProjectileConfig>,
    #[serde(default)]
    pub integrator: IntegratorConfig,
}

impl SimulationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| BallisticsError::Config(e.to_string()))
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| BallisticsError::Config(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), "loaded simulation config");
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BallisticsError::Config(e.to_string()))
    }

    /// Solve the configured launch
    pub fn run(&self) -> Result<Trajectory> {
        let launch = &self.launch;
        match &self.projectile {
            None => launch.solve_no_drag(),
            Some(projectile) => {
                let integrator = self.integrator.to_integrator();
                if self.integrator.dense {
                    integrator.solve(
                        projectile,
                        launch.velocity,
                        launch.angle_degrees,
                        launch.initial_height,
                    )
                } else {
                    integrator.solve_sampled(
                        projectile,
                        launch.velocity,
                        launch.angle_degrees,
                        launch.initial_height,
                        launch.sample_count,
                    )
                }
            }
        }
    }
}
