//! Quadratic-drag trajectory integrator.
//!
//! Equations of motion:
//!
//! ```text
//! ax = -k·v·vx
//! ay = -k·v·vy - g
//! k  = Cd·A·ρ(y) / m / 8
//! ```
//!
//! integrated with a fixed-step semi-implicit Euler scheme. The integrator
//! state is a plain value threaded through [`step`]; nothing is updated in place
//! across concerns.

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::analytic::impact_angle_degrees;
use crate::atmosphere::air_density;
use crate::constants::{
    DRAG_TIME_STEP_S, GRAVITY_MPS2, GROUND_EPSILON_M, MAX_INTEGRATION_STEPS, STIFFNESS_LIMIT,
};
use crate::error::{ensure_positive, BallisticsError, Result};
use crate::launch::{validate_sample_count, LaunchParameters};
use crate::projectile::Projectile;
use crate::trajectory::{FlightSummary, Trajectory};

/// Position, velocity and elapsed time of the body at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationState {
    pub position: Vector2<f64>,
    pub velocity: Vector2<f64>,
    pub time: f64,
}

impl IntegrationState {
    /// State at the moment of launch
    pub fn launch(velocity: f64, angle_rad: f64, initial_height: f64) -> Self {
        let (sin, cos) = angle_rad.sin_cos();
        IntegrationState {
            position: Vector2::new(0.0, initial_height),
            velocity: Vector2::new(velocity * cos, velocity * sin),
            time: 0.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    pub fn is_finite(&self) -> bool {
        self.position.iter().chain(self.velocity.iter()).all(|c| c.is_finite())
    }

    /// Still above the ground (with a small allowance for rounding below zero)
    #[inline]
    pub fn airborne(&self) -> bool {
        self.position.y > -GROUND_EPSILON_M
    }
}

/// Drag factor `k` at the given altitude
pub fn drag_factor<P: Projectile + ?Sized>(projectile: &P, altitude_m: f64) -> f64 {
    projectile.drag_coefficient() * projectile.cross_sectional_area() * air_density(altitude_m)
        / projectile.mass()
        / 8.0
}

/// Acceleration from gravity and drag for the current state
pub fn acceleration<P: Projectile + ?Sized>(projectile: &P, state: &IntegrationState) -> Vector2<f64> {
    let k = drag_factor(projectile, state.position.y);
    let speed = state.speed();
    Vector2::new(
        -k * speed * state.velocity.x,
        -k * speed * state.velocity.y - GRAVITY_MPS2,
    )
}

/// Advance one step: velocity from the current acceleration, then position
/// from the updated velocity.
pub fn step<P: Projectile + ?Sized>(projectile: &P, state: IntegrationState, dt: f64) -> IntegrationState {
    let accel = acceleration(projectile, &state);
    let velocity = state.velocity + accel * dt;
    let position = state.position + velocity * dt + accel * (dt * dt);
    IntegrationState {
        position,
        velocity,
        time: state.time + dt,
    }
}

/// How the landing angle of a drag trajectory is reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactAngleModel {
    /// Closed-form drag-free relation evaluated with the final integrated speed
    #[default]
    Analytic,
    /// Direction of the final integrated velocity vector
    TerminalVelocity,
}

/// Fixed-step drag integrator with a step bound
#[derive(Debug, Clone, PartialEq)]
pub struct DragIntegrator {
    time_step: f64,
    max_steps: usize,
    impact_angle_model: ImpactAngleModel,
}

impl Default for DragIntegrator {
    fn default() -> Self {
        Self {
            time_step: DRAG_TIME_STEP_S,
            max_steps: MAX_INTEGRATION_STEPS,
            impact_angle_model: ImpactAngleModel::default(),
        }
    }
}

impl DragIntegrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_time_step(&mut self, step: f64) {
        self.time_step = step;
    }

    pub fn set_max_steps(&mut self, max_steps: usize) {
        self.max_steps = max_steps;
    }

    pub fn set_impact_angle_model(&mut self, model: ImpactAngleModel) {
        self.impact_angle_model = model;
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn impact_angle_model(&self) -> ImpactAngleModel {
        self.impact_angle_model
    }

    /// Dense trajectory: one point per integrator step, starting at the launch point
    pub fn solve<P: Projectile + ?Sized>(
        &self,
        projectile: &P,
        velocity: f64,
        angle_degrees: f64,
        initial_height: f64,
    ) -> Result<Trajectory> {
        self.validate(projectile, velocity, angle_degrees, initial_height)?;
        ensure_positive("time_step", self.time_step)?;

        let angle_rad = angle_degrees.to_radians();
        let start = IntegrationState::launch(velocity, angle_rad, initial_height);
        let mut points = vec![start.position];
        let (last, steps) = self.integrate(projectile, start, self.time_step, |s| {
            points.push(s.position)
        })?;

        debug!(
            velocity,
            angle_degrees,
            initial_height,
            steps,
            air_time = last.time,
            distance = last.position.x,
            "solved drag trajectory"
        );

        Ok(Trajectory::assemble(
            points,
            self.time_step,
            self.summarize(&last, angle_rad, initial_height),
        ))
    }

    /// Trajectory with roughly `sample_count` evenly timed points.
    ///
    /// A calibration pass at the fixed step estimates the air time, then a
    /// recording pass repeats the integration with `air_time / sample_count`
    /// as its step. The coarser step costs some accuracy.
    pub fn solve_sampled<P: Projectile + ?Sized>(
        &self,
        projectile: &P,
        velocity: f64,
        angle_degrees: f64,
        initial_height: f64,
        sample_count: usize,
    ) -> Result<Trajectory> {
        self.validate(projectile, velocity, angle_degrees, initial_height)?;
        validate_sample_count(sample_count)?;
        ensure_positive("time_step", self.time_step)?;

        let angle_rad = angle_degrees.to_radians();
        let start = IntegrationState::launch(velocity, angle_rad, initial_height);

        let (calibrated, calibration_steps) =
            self.integrate(projectile, start, self.time_step, |_| {})?;
        let recording_step = calibrated.time / sample_count as f64;

        let mut points = Vec::with_capacity(sample_count + 2);
        points.push(start.position);
        let (last, steps) = self.integrate(projectile, start, recording_step, |s| {
            points.push(s.position)
        })?;

        debug!(
            velocity,
            angle_degrees,
            initial_height,
            calibration_steps,
            estimated_air_time = calibrated.time,
            recorded = steps,
            "solved sampled drag trajectory"
        );

        Ok(Trajectory::assemble(
            points,
            recording_step,
            self.summarize(&last, angle_rad, initial_height),
        ))
    }

    fn validate<P: Projectile + ?Sized>(
        &self,
        projectile: &P,
        velocity: f64,
        angle_degrees: f64,
        initial_height: f64,
    ) -> Result<()> {
        projectile.validate()?;
        LaunchParameters::new(velocity, angle_degrees, initial_height, 1).validate_drag()
    }

    /// Step until the body is back on the ground, reporting each new state.
    /// Returns the final state and the number of steps taken.
    ///
    /// A step whose drag damping `k·|v|·dt` reaches [`STIFFNESS_LIMIT`] would
    /// move the body backwards, so it is reported as `Divergence` instead of taken.
    fn integrate<P, F>(
        &self,
        projectile: &P,
        start: IntegrationState,
        dt: f64,
        mut on_step: F,
    ) -> Result<(IntegrationState, usize)>
    where
        P: Projectile + ?Sized,
        F: FnMut(&IntegrationState),
    {
        let mut state = start;
        let mut steps = 0;
        while state.airborne() {
            if steps >= self.max_steps {
                warn!(
                    steps,
                    elapsed = state.time,
                    altitude = state.position.y,
                    "drag integration exceeded its step bound"
                );
                return Err(BallisticsError::Divergence {
                    steps,
                    elapsed: state.time,
                });
            }
            // Drag must not push the body backwards within one step
            let damping = drag_factor(projectile, state.position.y) * state.speed() * dt;
            if damping.is_nan() || damping >= STIFFNESS_LIMIT {
                warn!(steps, elapsed = state.time, damping, "drag step is unstable");
                return Err(BallisticsError::Divergence {
                    steps,
                    elapsed: state.time,
                });
            }
            state = step(projectile, state, dt);
            steps += 1;
            if !state.is_finite() {
                warn!(steps, elapsed = state.time, "drag integration produced a non-finite state");
                return Err(BallisticsError::Divergence {
                    steps,
                    elapsed: state.time,
                });
            }
            on_step(&state);
        }
        Ok((state, steps))
    }

    fn summarize(&self, last: &IntegrationState, angle_rad: f64, initial_height: f64) -> FlightSummary {
        let impact_speed = last.speed();
        let impact_angle = match self.impact_angle_model {
            ImpactAngleModel::Analytic => impact_angle_degrees(impact_speed, angle_rad, initial_height),
            ImpactAngleModel::TerminalVelocity => {
                (-last.velocity.y).atan2(last.velocity.x).to_degrees()
            }
        };
        FlightSummary {
            air_time: last.time,
            impact_angle_degrees: impact_angle,
            distance: last.position.x,
            impact_speed,
        }
    }
}

/// Dense drag trajectory with the default integrator settings
pub fn solve_with_drag<P: Projectile + ?Sized>(
    projectile: &P,
    velocity: f64,
    angle_degrees: f64,
    initial_height: f64,
) -> Result<Trajectory> {
    DragIntegrator::default().solve(projectile, velocity, angle_degrees, initial_height)
}

/// Evenly sampled drag trajectory with the default integrator settings
pub fn solve_with_drag_sampled<P: Projectile + ?Sized>(
    projectile: &P,
    velocity: f64,
    angle_degrees: f64,
    initial_height: f64,
    sample_count: usize,
) -> Result<Trajectory> {
    DragIntegrator::default().solve_sampled(
        projectile,
        velocity,
        angle_degrees,
        initial_height,
        sample_count,
    )
}
