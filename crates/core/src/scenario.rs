//! Scenario presets
//!
//! The five built-in scenarios are the lab's reference content; their values
//! are literal and already consistent, so the corrector leaves them unchanged.
//! Hosts may register additional presets.

use crate::core_types::units::{
    Celsius, Degrees, Hectopascals, KilometersPerHour, MillimetersPerHour, Percent,
    WattsPerSquareMeter,
};
use crate::core_types::{CloudType, ParameterSet};
use crate::error::LabResult;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A named, immutable parameter set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPreset {
    /// Lookup key (e.g. "sunny")
    pub key: String,
    /// Display name
    pub name: String,
    pub parameters: ParameterSet,
}

impl ScenarioPreset {
    /// Create a preset
    pub fn new(key: impl Into<String>, name: impl Into<String>, parameters: ParameterSet) -> Self {
        ScenarioPreset {
            key: key.into(),
            name: name.into(),
            parameters,
        }
    }

    /// Clear anticyclonic summer day
    pub fn sunny() -> Self {
        ScenarioPreset::new(
            "sunny",
            "Journée ensoleillée",
            ParameterSet {
                temperature: Celsius::new(28.0),
                humidity: Percent::new(45.0),
                pressure: Hectopascals::new(1020.0),
                wind_speed: KilometersPerHour::new(10.0),
                wind_direction: Degrees::new(180.0),
                dew_point: Celsius::new(15.0),
                cloud_cover: Percent::new(10.0),
                precipitation: MillimetersPerHour::DRY,
                cloud_type: CloudType::None,
                solar_radiation: WattsPerSquareMeter::new(900.0),
            },
        )
    }

    /// Steady frontal rain
    pub fn rainy() -> Self {
        ScenarioPreset::new(
            "rainy",
            "Journée pluvieuse",
            ParameterSet {
                temperature: Celsius::new(15.0),
                humidity: Percent::new(85.0),
                pressure: Hectopascals::new(1005.0),
                wind_speed: KilometersPerHour::new(20.0),
                wind_direction: Degrees::new(225.0),
                dew_point: Celsius::new(12.5),
                cloud_cover: Percent::new(90.0),
                precipitation: MillimetersPerHour::new(8.0),
                cloud_type: CloudType::Nimbostratus,
                solar_radiation: WattsPerSquareMeter::new(100.0),
            },
        )
    }

    /// Deep low with a thunderstorm
    pub fn stormy() -> Self {
        ScenarioPreset::new(
            "stormy",
            "Orage violent",
            ParameterSet {
                temperature: Celsius::new(26.0),
                humidity: Percent::new(85.0),
                pressure: Hectopascals::new(975.0),
                wind_speed: KilometersPerHour::new(85.0),
                wind_direction: Degrees::new(250.0),
                dew_point: Celsius::new(23.3),
                cloud_cover: Percent::new(95.0),
                precipitation: MillimetersPerHour::new(5.0),
                cloud_type: CloudType::Cumulonimbus,
                solar_radiation: WattsPerSquareMeter::new(50.0),
            },
        )
    }

    /// Raw, humid winter day below freezing
    pub fn winter() -> Self {
        ScenarioPreset::new(
            "winter",
            "Hiver rigoureux",
            ParameterSet {
                temperature: Celsius::new(-5.0),
                humidity: Percent::new(80.0),
                pressure: Hectopascals::new(1015.0),
                wind_speed: KilometersPerHour::new(15.0),
                wind_direction: Degrees::new(0.0),
                dew_point: Celsius::new(-7.9),
                cloud_cover: Percent::new(70.0),
                precipitation: MillimetersPerHour::DRY,
                cloud_type: CloudType::Stratus,
                solar_radiation: WattsPerSquareMeter::new(200.0),
            },
        )
    }

    /// Dry heatwave
    pub fn heatwave() -> Self {
        ScenarioPreset::new(
            "heatwave",
            "Canicule",
            ParameterSet {
                temperature: Celsius::new(40.0),
                humidity: Percent::new(20.0),
                pressure: Hectopascals::new(1012.0),
                wind_speed: KilometersPerHour::new(12.0),
                wind_direction: Degrees::new(90.0),
                dew_point: Celsius::new(12.7),
                cloud_cover: Percent::new(5.0),
                precipitation: MillimetersPerHour::DRY,
                cloud_type: CloudType::None,
                solar_radiation: WattsPerSquareMeter::new(1100.0),
            },
        )
    }

    /// The five built-in presets in display order
    pub fn builtin() -> [ScenarioPreset; 5] {
        [
            Self::sunny(),
            Self::rainy(),
            Self::stormy(),
            Self::winter(),
            Self::heatwave(),
        ]
    }
}

/// Preset lookup by key, listing keys in registration order
#[derive(Debug, Clone)]
pub struct ScenarioLibrary {
    presets: FxHashMap<String, ScenarioPreset>,
    order: Vec<String>,
}

impl Default for ScenarioLibrary {
    /// Library holding the built-in presets
    fn default() -> Self {
        let mut library = ScenarioLibrary::empty();
        for preset in ScenarioPreset::builtin() {
            library.insert(preset);
        }
        library
    }
}

impl ScenarioLibrary {
    /// Library without any preset
    pub fn empty() -> Self {
        ScenarioLibrary {
            presets: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    fn insert(&mut self, preset: ScenarioPreset) -> Option<ScenarioPreset> {
        let key = preset.key.clone();
        let previous = self.presets.insert(key.clone(), preset);
        if previous.is_none() {
            self.order.push(key);
        }
        previous
    }

    /// Add a preset, replacing any preset with the same key.
    ///
    /// A replaced preset keeps its position in [`ScenarioLibrary::keys`].
    ///
    /// # Errors
    /// The first out-of-domain field of the preset's parameters.
    pub fn register(&mut self, preset: ScenarioPreset) -> LabResult<Option<ScenarioPreset>> {
        preset.parameters.validate()?;
        Ok(self.insert(preset))
    }

    /// Preset registered under `key`
    pub fn get(&self, key: &str) -> Option<&ScenarioPreset> {
        self.presets.get(key)
    }

    /// Keys in registration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Presets in registration order
    pub fn presets(&self) -> impl Iterator<Item = &ScenarioPreset> {
        self.order.iter().filter_map(|key| self.presets.get(key))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LabError;

    #[test]
    fn test_builtin_keys_in_order() {
        let library = ScenarioLibrary::default();
        let keys: Vec<_> = library.keys().collect();
        assert_eq!(keys, ["sunny", "rainy", "stormy", "winter", "heatwave"]);
        assert_eq!(library.len(), 5);
    }

    #[test]
    fn test_builtin_presets_are_valid() {
        for preset in ScenarioPreset::builtin() {
            assert!(preset.parameters.validate().is_ok(), "{}", preset.key);
        }
    }

    #[test]
    fn test_literal_values() {
        let stormy = ScenarioPreset::stormy();
        assert_eq!(stormy.name, "Orage violent");
        assert_eq!(*stormy.parameters.pressure, 975.0);
        assert_eq!(*stormy.parameters.wind_speed, 85.0);
        assert_eq!(stormy.parameters.cloud_type, CloudType::Cumulonimbus);

        let winter = ScenarioPreset::winter();
        assert_eq!(*winter.parameters.temperature, -5.0);
        assert_eq!(*winter.parameters.dew_point, -7.9);
    }

    #[test]
    fn test_register_custom_and_replace() {
        let mut library = ScenarioLibrary::default();

        let fog = ScenarioPreset::new(
            "fog",
            "Brouillard matinal",
            ParameterSet {
                humidity: Percent::new(98.0),
                dew_point: Celsius::new(19.7),
                ..ParameterSet::default()
            },
        );
        assert_eq!(library.register(fog).unwrap(), None);
        assert_eq!(library.keys().last(), Some("fog"));

        let replacement = ScenarioPreset::new("sunny", "Grand soleil", ParameterSet::default());
        let previous = library.register(replacement).unwrap();
        assert_eq!(previous.map(|p| p.name), Some("Journée ensoleillée".to_string()));
        assert_eq!(library.keys().next(), Some("sunny"));
        assert_eq!(library.get("sunny").unwrap().name, "Grand soleil");
        assert_eq!(library.len(), 6);
    }

    #[test]
    fn test_register_rejects_invalid_parameters() {
        let mut library = ScenarioLibrary::empty();
        let broken = ScenarioPreset::new(
            "broken",
            "Cassé",
            ParameterSet {
                humidity: Percent::new(150.0),
                ..ParameterSet::default()
            },
        );
        assert!(matches!(
            library.register(broken),
            Err(LabError::OutOfRange { .. })
        ));
        assert!(library.is_empty());
        assert!(library.get("broken").is_none());
    }
}
