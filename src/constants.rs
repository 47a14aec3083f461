//! Physical and numerical constants used by the trajectory solvers

/// Gravitational acceleration in m/s²
pub const GRAVITY_MPS2: f64 = 9.81;

/// Fixed integrator step for the drag solver (seconds)
///
/// Smaller steps follow the low-speed end of the quadratic drag curve more
/// closely but cost linearly more steps.
pub const DRAG_TIME_STEP_S: f64 = 0.001;

/// The drag integrator keeps stepping while altitude is above `-GROUND_EPSILON_M`
pub const GROUND_EPSILON_M: f64 = 1e-12;

/// Upper bound on integrator steps per pass before reporting divergence
pub const MAX_INTEGRATION_STEPS: usize = 10_000_000;

/// Bound on `k·|v|·dt` for one drag step. At 0.5 the `a·dt²` position term
/// cancels the forward motion; at 1 the velocity itself reverses.
pub const STIFFNESS_LIMIT: f64 = 0.5;

/// Finest angle step accepted by the range sweep, in degrees
pub const MIN_SWEEP_RESOLUTION_DEG: f64 = 0.01;

/// Decimal places kept on reported scalars (air time, impact angle, distance, impact speed)
pub const REPORT_DECIMALS: i32 = 4;

/// Tolerance on the final vertical coordinate when checking a landed trajectory
pub const GROUND_TOLERANCE_M: f64 = 1e-6;

/// Below this |cos θ| a launch is treated as vertical
pub const MIN_COS_THRESHOLD: f64 = 1e-12;

// Troposphere approximation (valid 0 - 11 km)

/// Ceiling of the troposphere model in meters
pub const TROPOSPHERE_CEILING_M: f64 = 11_000.0;

/// Sea-level temperature of the model (°C)
pub const SEA_LEVEL_TEMPERATURE_C: f64 = 15.04;

/// Temperature lapse rate (°C per meter)
pub const TEMPERATURE_LAPSE_C_PER_M: f64 = 0.00649;

/// Sea-level pressure of the model (kPa)
pub const SEA_LEVEL_PRESSURE_KPA: f64 = 101.29;

/// Celsius to Kelvin offset used by the model
pub const CELSIUS_TO_KELVIN: f64 = 273.1;

/// Reference temperature of the pressure ratio (K)
pub const REFERENCE_TEMPERATURE_K: f64 = 288.09;

/// Exponent of the barometric pressure ratio
pub const BAROMETRIC_EXPONENT: f64 = 5.256;

/// Specific gas constant of dry air in kJ/(kg·K)
pub const GAS_CONSTANT_AIR_KJ: f64 = 0.2869;

// Projectile presets

/// Drag coefficient of a smooth sphere
pub const SPHERE_DRAG_COEFFICIENT: f64 = 0.47;

/// Cannonball preset mass (kg)
pub const CANNONBALL_MASS_KG: f64 = 3.0;

/// Cannonball preset diameter (m)
pub const CANNONBALL_DIAMETER_M: f64 = 0.3;
