//! Troposphere air density model.
//!
//! Standard barometric approximation used by the drag integrator to scale
//! drag with altitude. Valid from sea level to the tropopause (11 km).

use crate::constants::{
    BAROMETRIC_EXPONENT, CELSIUS_TO_KELVIN, GAS_CONSTANT_AIR_KJ, REFERENCE_TEMPERATURE_K,
    SEA_LEVEL_PRESSURE_KPA, SEA_LEVEL_TEMPERATURE_C, TEMPERATURE_LAPSE_C_PER_M,
    TROPOSPHERE_CEILING_M,
};

/// Clamp altitude to the range the troposphere model covers.
///
/// Above the ceiling the linear temperature profile runs towards absolute
/// zero and the pressure ratio stops being meaningful, so altitudes are held
/// at the model bounds instead.
#[inline]
fn model_altitude(altitude_m: f64) -> f64 {
    altitude_m.clamp(0.0, TROPOSPHERE_CEILING_M)
}

/// Air temperature at altitude.
///
/// # Arguments
/// * `altitude_m` - Altitude in meters (0 to 11000)
///
/// # Returns
/// Temperature in °C
pub fn temperature_celsius(altitude_m: f64) -> f64 {
    SEA_LEVEL_TEMPERATURE_C - TEMPERATURE_LAPSE_C_PER_M * model_altitude(altitude_m)
}

/// Static air pressure at altitude.
///
/// # Arguments
/// * `altitude_m` - Altitude in meters (0 to 11000)
///
/// # Returns
/// Pressure in kPa
pub fn pressure_kpa(altitude_m: f64) -> f64 {
    let temp_k = temperature_celsius(altitude_m) + CELSIUS_TO_KELVIN;
    SEA_LEVEL_PRESSURE_KPA * (temp_k / REFERENCE_TEMPERATURE_K).powf(BAROMETRIC_EXPONENT)
}

/// Air density at altitude from the ideal gas law.
///
/// # Arguments
/// * `altitude_m` - Altitude in meters (0 to 11000)
///
/// # Returns
/// Density in kg/m³
pub fn air_density(altitude_m: f64) -> f64 {
    let temp_k = temperature_celsius(altitude_m) + CELSIUS_TO_KELVIN;
    pressure_kpa(altitude_m) / (GAS_CONSTANT_AIR_KJ * temp_k)
}
