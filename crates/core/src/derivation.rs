//! Derived meteorological quantities
//!
//! Closed-form empirical formulas computing dependent quantities from a
//! [`ParameterSet`]. Every function is pure and total over the validated
//! parameter domain.
//!
//! # Scientific References
//!
//! - Alduchov, O.A. & Eskridge, R.E. (1996). "Improved Magnus form approximation
//!   of saturation vapor pressure." Journal of Applied Meteorology, 35(4), 601-609.
//! - Rothfusz, L.P. (1990). "The heat index equation." NWS Technical Attachment SR 90-23.
//! - Osczevski, R. & Bluestein, M. (2005). "The new wind chill equivalent temperature
//!   chart." Bulletin of the AMS, 86(10), 1453-1458.
//! - ICAO Standard Atmosphere (1993) for the barometric reduction.

use crate::config::EngineConfig;
use crate::core_types::units::{
    Celsius, Hectopascals, Kilometers, KilometersPerHour, Meters, MillimetersPerHour, Percent,
    WattsPerSquareMeter,
};
use crate::core_types::ParameterSet;
use serde::{Deserialize, Serialize};

/// Magnus coefficient `a` (dimensionless)
const MAGNUS_A: f64 = 17.27;

/// Magnus coefficient `b` (°C)
const MAGNUS_B: f64 = 237.7;

/// Humidity floor used by [`dew_point`]; ln(0) is undefined
pub const DEFAULT_HUMIDITY_FLOOR: Percent = Percent::new(1.0);

/// Heat index is only meaningful from this temperature upward
pub const HEAT_INDEX_THRESHOLD: Celsius = Celsius::new(27.0);

/// Wind chill applies at or below this temperature
pub const WIND_CHILL_MAX_TEMPERATURE: Celsius = Celsius::new(10.0);

/// Wind chill applies from this wind speed upward
pub const WIND_CHILL_MIN_WIND: KilometersPerHour = KilometersPerHour::new(4.8);

/// Clear-air visibility ceiling (km)
pub const MAX_VISIBILITY_KM: f64 = 50.0;

/// Visibility floor (km)
pub const MIN_VISIBILITY_KM: f64 = 0.1;

/// Top of the UV index scale
pub const MAX_UV_INDEX: f64 = 11.0;

/// Magnus γ term: a·T/(b+T) + ln(RH/100)
#[inline]
fn magnus_gamma(temperature: f64, humidity_fraction: f64) -> f64 {
    (MAGNUS_A * temperature) / (MAGNUS_B + temperature) + humidity_fraction.ln()
}

/// Dew point from temperature and relative humidity (Magnus formula)
///
/// ```text
/// α  = a·T/(b+T) + ln(RH/100)
/// Td = b·α / (a − α)
/// ```
///
/// with a = 17.27 and b = 237.7 °C. Humidity is floored at 1% (the logarithm
/// is undefined at 0) and capped at 100%.
///
/// # Example
/// ```
/// use weather_lab_core::core_types::{Celsius, Percent};
/// use weather_lab_core::derivation::dew_point;
///
/// let td = dew_point(Celsius::new(25.0), Percent::new(60.0));
/// assert!((*td - 16.7).abs() < 0.1);
/// ```
#[must_use]
pub fn dew_point(temperature: Celsius, humidity: Percent) -> Celsius {
    dew_point_floored(temperature, humidity, DEFAULT_HUMIDITY_FLOOR)
}

/// [`dew_point`] with an explicit humidity floor
#[must_use]
pub fn dew_point_floored(temperature: Celsius, humidity: Percent, floor: Percent) -> Celsius {
    let lower = floor.value().clamp(f64::MIN_POSITIVE, 100.0);
    let rh = humidity.value().clamp(lower, 100.0);
    let alpha = magnus_gamma(*temperature, rh / 100.0);
    Celsius::new(MAGNUS_B * alpha / (MAGNUS_A - alpha))
}

/// Relative humidity from temperature and dew point (inverse Magnus)
///
/// RH = 100 · exp(a·Td/(b+Td) − a·T/(b+T)), clamped to [0, 100].
#[must_use]
pub fn relative_humidity(temperature: Celsius, dew_point: Celsius) -> Percent {
    let t = *temperature;
    let td = *dew_point;
    let exponent = (MAGNUS_A * td) / (MAGNUS_B + td) - (MAGNUS_A * t) / (MAGNUS_B + t);
    Percent::new((100.0 * exponent.exp()).clamp(0.0, 100.0))
}

/// Heat index (Rothfusz regression, Celsius coefficients)
///
/// Returns the air temperature unchanged below 27 °C, where the regression
/// is not valid. Above it:
///
/// ```text
/// HI = c1 + c2·T + c3·RH + c4·T·RH + c5·T² + c6·RH² + c7·T²·RH + c8·T·RH² + c9·T²·RH²
/// ```
#[must_use]
pub fn heat_index(temperature: Celsius, humidity: Percent) -> Celsius {
    if temperature < HEAT_INDEX_THRESHOLD {
        return temperature;
    }

    const C1: f64 = -8.78469475556;
    const C2: f64 = 1.61139411;
    const C3: f64 = 2.33854883889;
    const C4: f64 = -0.14611605;
    const C5: f64 = -0.012308094;
    const C6: f64 = -0.0164248277778;
    const C7: f64 = 0.002211732;
    const C8: f64 = 0.00072546;
    const C9: f64 = -0.000003582;

    let t = *temperature;
    let rh = *humidity;
    let t2 = t * t;
    let rh2 = rh * rh;

    Celsius::new(
        C1 + C2 * t
            + C3 * rh
            + C4 * t * rh
            + C5 * t2
            + C6 * rh2
            + C7 * t2 * rh
            + C8 * t * rh2
            + C9 * t2 * rh2,
    )
}

/// Wind chill equivalent temperature (JAG/TI 2001 formula)
///
/// ```text
/// WC = 13.12 + 0.6215·T − 11.37·V^0.16 + 0.3965·T·V^0.16
/// ```
///
/// Returns the air temperature unchanged above 10 °C or below 4.8 km/h.
#[must_use]
pub fn wind_chill(temperature: Celsius, wind_speed: KilometersPerHour) -> Celsius {
    if temperature > WIND_CHILL_MAX_TEMPERATURE || wind_speed < WIND_CHILL_MIN_WIND {
        return temperature;
    }

    let t = *temperature;
    let v16 = wind_speed.powf(0.16);
    Celsius::new(13.12 + 0.6215 * t - 11.37 * v16 + 0.3965 * t * v16)
}

/// Reduce station pressure to mean sea level
///
/// `P0 = P · (1 + 0.0065·h / 288.15)^5.255` (ICAO lapse rate 6.5 K/km,
/// standard sea-level temperature 288.15 K).
#[must_use]
pub fn sea_level_pressure(pressure: Hectopascals, altitude: Meters) -> Hectopascals {
    Hectopascals::new(*pressure * (1.0 + 0.0065 * *altitude / 288.15).powf(5.255))
}

/// Horizontal visibility estimate
///
/// Starts from 50 km and applies two capping ladders, each evaluated from the
/// highest threshold down so only the tightest cap of a ladder applies:
///
/// | humidity | cap   |   | precipitation | cap   |
/// |----------|-------|---|---------------|-------|
/// | > 95 %   | 1 km  |   | > 20 mm/h     | 2 km  |
/// | > 90 %   | 5 km  |   | > 10 mm/h     | 5 km  |
/// | > 80 %   | 15 km |   | > 2 mm/h      | 10 km |
///
/// Overcast skies (cloud cover > 80 %) then cut the remaining visibility by
/// 20 %. The result never drops below 0.1 km.
#[must_use]
pub fn visibility(
    humidity: Percent,
    precipitation: MillimetersPerHour,
    cloud_cover: Percent,
) -> Kilometers {
    let mut km = MAX_VISIBILITY_KM;

    if humidity > 95.0 {
        km = km.min(1.0);
    } else if humidity > 90.0 {
        km = km.min(5.0);
    } else if humidity > 80.0 {
        km = km.min(15.0);
    }

    if precipitation > 20.0 {
        km = km.min(2.0);
    } else if precipitation > 10.0 {
        km = km.min(5.0);
    } else if precipitation > 2.0 {
        km = km.min(10.0);
    }

    if cloud_cover > 80.0 {
        km *= 0.8;
    }

    Kilometers::new(km.max(MIN_VISIBILITY_KM))
}

/// UV index approximation from irradiance and cloud cover
///
/// `UV = (S / 25) · (1 − 0.7·C/100)`, clamped to [0, 11]. Thick cloud removes
/// at most 70 % of the UV load.
#[must_use]
pub fn uv_index(solar_radiation: WattsPerSquareMeter, cloud_cover: Percent) -> f64 {
    let attenuation = 1.0 - cloud_cover.to_fraction() * 0.7;
    ((*solar_radiation / 25.0) * attenuation).clamp(0.0, MAX_UV_INDEX)
}

/// Apparent ("feels like") temperature
///
/// Heat index in the heat, wind chill in the cold, air temperature otherwise.
#[must_use]
pub fn feels_like(
    temperature: Celsius,
    humidity: Percent,
    wind_speed: KilometersPerHour,
) -> Celsius {
    if temperature >= HEAT_INDEX_THRESHOLD {
        heat_index(temperature, humidity)
    } else if temperature <= WIND_CHILL_MAX_TEMPERATURE && wind_speed >= WIND_CHILL_MIN_WIND {
        wind_chill(temperature, wind_speed)
    } else {
        temperature
    }
}

/// Every derived quantity of one parameter set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedQuantities {
    /// Apparent temperature
    pub feels_like: Celsius,
    /// Rothfusz heat index (air temperature below 27 °C)
    pub heat_index: Celsius,
    /// Wind chill (air temperature outside its domain)
    pub wind_chill: Celsius,
    /// Horizontal visibility
    pub visibility: Kilometers,
    /// UV index, 0-11
    pub uv_index: f64,
    /// Pressure reduced to sea level
    pub sea_level_pressure: Hectopascals,
    /// Magnus dew point for the current temperature and humidity
    pub dew_point: Celsius,
}

/// Compute all derived quantities for `params`
#[must_use]
pub fn derive(params: &ParameterSet, config: &EngineConfig) -> DerivedQuantities {
    DerivedQuantities {
        feels_like: feels_like(params.temperature, params.humidity, params.wind_speed),
        heat_index: heat_index(params.temperature, params.humidity),
        wind_chill: wind_chill(params.temperature, params.wind_speed),
        visibility: visibility(params.humidity, params.precipitation, params.cloud_cover),
        uv_index: uv_index(params.solar_radiation, params.cloud_cover),
        sea_level_pressure: sea_level_pressure(params.pressure, config.station_altitude),
        dew_point: dew_point_floored(params.temperature, params.humidity, config.humidity_floor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dew_point_reference_values() {
        // Standard psychrometric table values
        let td = dew_point(Celsius::new(20.0), Percent::new(50.0));
        assert_relative_eq!(*td, 9.26, epsilon = 0.05);

        let td = dew_point(Celsius::new(30.0), Percent::new(80.0));
        assert_relative_eq!(*td, 26.17, epsilon = 0.05);

        // Saturated air: dew point equals air temperature
        let td = dew_point(Celsius::new(12.0), Percent::new(100.0));
        assert_relative_eq!(*td, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn test_dew_point_humidity_floor() {
        let at_zero = dew_point(Celsius::new(20.0), Percent::new(0.0));
        let at_floor = dew_point(Celsius::new(20.0), Percent::new(1.0));
        assert!(at_zero.is_finite());
        assert_eq!(at_zero, at_floor);
    }

    #[test]
    fn test_relative_humidity_inverts_dew_point() {
        for t in [-30.0, -5.0, 0.0, 12.0, 25.0, 38.0, 50.0] {
            for rh in [5.0, 20.0, 45.0, 70.0, 95.0, 100.0] {
                let td = dew_point(Celsius::new(t), Percent::new(rh));
                let back = relative_humidity(Celsius::new(t), td);
                assert_relative_eq!(*back, rh, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_relative_humidity_is_clamped() {
        // Dew point above air temperature would exceed saturation
        let rh = relative_humidity(Celsius::new(10.0), Celsius::new(15.0));
        assert_eq!(*rh, 100.0);
    }

    #[test]
    fn test_heat_index_identity_below_threshold() {
        for t in [-10.0, 0.0, 15.0, 26.9] {
            assert_eq!(heat_index(Celsius::new(t), Percent::new(90.0)), Celsius::new(t));
        }
    }

    #[test]
    fn test_heat_index_polynomial() {
        // 32 °C, 70 % → ~40.5 °C
        let hi = heat_index(Celsius::new(32.0), Percent::new(70.0));
        assert_relative_eq!(*hi, 40.6, epsilon = 0.5);

        // Dry heat feels slightly cooler than humid heat at the same temperature
        let dry = heat_index(Celsius::new(35.0), Percent::new(20.0));
        let humid = heat_index(Celsius::new(35.0), Percent::new(60.0));
        assert!(humid > dry);
    }

    #[test]
    fn test_heat_index_non_decreasing_over_humid_range() {
        // The regression dips slightly for very dry air (RH < ~13 %) between
        // 28 and 38 °C; over the humid range it is monotone.
        let mut t = 27.0;
        while t <= 50.0 {
            let mut prev = heat_index(Celsius::new(t), Percent::new(20.0));
            for rh in 21..=100 {
                let hi = heat_index(Celsius::new(t), Percent::new(f64::from(rh)));
                assert!(
                    *hi >= *prev - 1e-9,
                    "heat index decreased at T={t}, RH={rh}: {prev} -> {hi}"
                );
                prev = hi;
            }
            t += 0.5;
        }
    }

    #[test]
    fn test_wind_chill_identity_outside_domain() {
        // Calm air
        for t in [-40.0, -10.0, 0.0, 10.0] {
            for v in [0.0, 2.0, 4.79] {
                assert_eq!(
                    wind_chill(Celsius::new(t), KilometersPerHour::new(v)),
                    Celsius::new(t)
                );
            }
        }
        // Warm air
        assert_eq!(
            wind_chill(Celsius::new(10.5), KilometersPerHour::new(50.0)),
            Celsius::new(10.5)
        );
    }

    #[test]
    fn test_wind_chill_reference_values() {
        // Environment Canada table: -10 °C at 30 km/h → -19.5
        let wc = wind_chill(Celsius::new(-10.0), KilometersPerHour::new(30.0));
        assert_relative_eq!(*wc, -19.5, epsilon = 0.1);

        let wc = wind_chill(Celsius::new(-30.0), KilometersPerHour::new(50.0));
        assert_relative_eq!(*wc, -49.0, epsilon = 0.1);
    }

    #[test]
    fn test_sea_level_pressure() {
        // Sea-level station is unchanged
        let p = sea_level_pressure(Hectopascals::new(1000.0), Meters::new(0.0));
        assert_relative_eq!(*p, 1000.0, epsilon = 1e-9);

        // 500 m adds roughly 60 hPa
        let p = sea_level_pressure(Hectopascals::new(955.0), Meters::new(500.0));
        assert_relative_eq!(*p, 1012.6, epsilon = 1.0);
    }

    #[test]
    fn test_visibility_ladders() {
        let clear = visibility(Percent::new(50.0), MillimetersPerHour::DRY, Percent::new(10.0));
        assert_eq!(*clear, 50.0);

        let hazy = visibility(Percent::new(85.0), MillimetersPerHour::DRY, Percent::new(10.0));
        assert_eq!(*hazy, 15.0);

        let humid_rain = visibility(
            Percent::new(92.0),
            MillimetersPerHour::new(12.0),
            Percent::new(50.0),
        );
        assert_eq!(*humid_rain, 5.0);

        // Tightest cap wins regardless of which ladder produced it
        let downpour = visibility(
            Percent::new(85.0),
            MillimetersPerHour::new(25.0),
            Percent::new(50.0),
        );
        assert_eq!(*downpour, 2.0);

        // Overcast reduction compounds after the caps
        let overcast = visibility(
            Percent::new(85.0),
            MillimetersPerHour::new(5.0),
            Percent::new(90.0),
        );
        assert_relative_eq!(*overcast, 8.0, epsilon = 1e-9);

        let fog = visibility(
            Percent::new(99.0),
            MillimetersPerHour::new(30.0),
            Percent::new(100.0),
        );
        assert_relative_eq!(*fog, 0.8, epsilon = 1e-9);
    }

    #[test]
    fn test_visibility_bounds() {
        for rh in (0..=100).step_by(5) {
            for precip in [0.0, 1.0, 3.0, 11.0, 21.0, 200.0] {
                for cloud in [0.0, 50.0, 81.0, 100.0] {
                    let km = visibility(
                        Percent::new(f64::from(rh)),
                        MillimetersPerHour::new(precip),
                        Percent::new(cloud),
                    );
                    assert!((MIN_VISIBILITY_KM..=MAX_VISIBILITY_KM).contains(&*km));
                }
            }
        }
    }

    #[test]
    fn test_uv_index_bounds_and_attenuation() {
        assert_eq!(uv_index(WattsPerSquareMeter::new(0.0), Percent::new(0.0)), 0.0);
        assert_eq!(uv_index(WattsPerSquareMeter::new(1200.0), Percent::new(0.0)), 11.0);

        let clear = uv_index(WattsPerSquareMeter::new(200.0), Percent::new(0.0));
        let overcast = uv_index(WattsPerSquareMeter::new(200.0), Percent::new(100.0));
        assert_relative_eq!(clear, 8.0, epsilon = 1e-9);
        assert_relative_eq!(overcast, 2.4, epsilon = 1e-9);

        for s in (0..=1200).step_by(50) {
            for c in (0..=100).step_by(10) {
                let uv = uv_index(
                    WattsPerSquareMeter::new(f64::from(s)),
                    Percent::new(f64::from(c)),
                );
                assert!((0.0..=MAX_UV_INDEX).contains(&uv));
            }
        }
    }

    #[test]
    fn test_feels_like_selects_regime() {
        let hot = feels_like(Celsius::new(33.0), Percent::new(60.0), KilometersPerHour::new(5.0));
        assert_eq!(hot, heat_index(Celsius::new(33.0), Percent::new(60.0)));

        let cold = feels_like(Celsius::new(-5.0), Percent::new(60.0), KilometersPerHour::new(25.0));
        assert_eq!(cold, wind_chill(Celsius::new(-5.0), KilometersPerHour::new(25.0)));

        let mild = feels_like(Celsius::new(18.0), Percent::new(60.0), KilometersPerHour::new(25.0));
        assert_eq!(mild, Celsius::new(18.0));
    }

    #[test]
    fn test_derive_bundles_all_quantities() {
        let params = ParameterSet::default();
        let derived = derive(&params, &EngineConfig::default());

        assert_eq!(derived.feels_like, Celsius::new(20.0));
        assert_eq!(derived.heat_index, Celsius::new(20.0));
        assert_eq!(derived.wind_chill, Celsius::new(20.0));
        assert_eq!(*derived.visibility, 50.0);
        assert!(*derived.sea_level_pressure > *params.pressure);
        assert_relative_eq!(*derived.dew_point, 12.0, epsilon = 0.1);
    }
}
