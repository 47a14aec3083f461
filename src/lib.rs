//! # Trajectory Engine
//!
//! Planar projectile trajectories: a closed-form drag-free solver and a
//! fixed-step integrator for quadratic air drag with altitude-dependent air
//! density.
//!
//! ```no_run
//! use trajectory_engine::{solve_no_drag, solve_with_drag, Cannonball};
//!
//! let vacuum = solve_no_drag(10.0, 45.0, 10.0, 50)?;
//! let dragged = solve_with_drag(&Cannonball, 10.0, 45.0, 10.0)?;
//! assert!(dragged.distance() < vacuum.distance());
//! # Ok::<(), trajectory_engine::BallisticsError>(())
//! ```

// Re-export the main types and functions
pub use analytic::{launch_angles_for_distance, solve_no_drag, LaunchAngles};
pub use batch::{max_range_angle, solve_batch_no_drag, solve_batch_with_drag, RangeOptimum};
pub use config::{IntegratorConfig, ProjectileConfig, SimulationConfig};
pub use dispersion::{
    run_dispersion_no_drag, run_dispersion_with_drag, DispersionParams, DispersionResults,
    FieldStatistics,
};
pub use drag_integrator::{
    solve_with_drag, solve_with_drag_sampled, DragIntegrator, ImpactAngleModel,
};
pub use error::{BallisticsError, Result};
pub use launch::LaunchParameters;
pub use projectile::{Cannonball, CustomProjectile, Projectile};
pub use trajectory::Trajectory;

// Module declarations
pub mod analytic;
pub mod atmosphere;
pub mod batch;
pub mod config;
pub mod constants;
pub mod dispersion;
pub mod drag_integrator;
mod error;
mod launch;
mod projectile;
mod trajectory;
