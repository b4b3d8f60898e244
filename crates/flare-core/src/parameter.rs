use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};

pub const DEFAULT_THRESHOLD: f32 = 0.9;
pub const DEFAULT_SCALE: f32 = 0.6;
pub const DEFAULT_SPREAD: f32 = 0.004;
pub const DEFAULT_INTENSITY: f32 = 1.0;

/// Identifies one of the four flare controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlareParamId {
    Threshold,
    Scale,
    Spread,
    Intensity,
}

impl FlareParamId {
    pub const ALL: [FlareParamId; 4] = [
        FlareParamId::Threshold,
        FlareParamId::Scale,
        FlareParamId::Spread,
        FlareParamId::Intensity,
    ];

    /// Stable key used in preset files and widget ids.
    pub fn key(&self) -> &'static str {
        match self {
            FlareParamId::Threshold => "threshold",
            FlareParamId::Scale => "scale",
            FlareParamId::Spread => "spread",
            FlareParamId::Intensity => "intensity",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FlareParamId::Threshold => "Threshold",
            FlareParamId::Scale => "Scale",
            FlareParamId::Spread => "Spread",
            FlareParamId::Intensity => "Intensity",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }
}

/// Per-frame values of the flare controls.
///
/// The filter reads these as-is; nothing validates or clamps them. Ranges
/// are only enforced by the slider widgets (see [`FlareParameter`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlareParams {
    /// Minimum neighbor brightness (max channel) that contributes.
    pub threshold: f32,
    /// Overall effect strength.
    pub scale: f32,
    /// Horizontal distance between taps in normalized texture units.
    pub spread: f32,
    /// Post-multiplier on the accumulated flare.
    pub intensity: f32,
}

impl Default for FlareParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            scale: DEFAULT_SCALE,
            spread: DEFAULT_SPREAD,
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl FlareParams {
    pub fn get(&self, id: FlareParamId) -> f32 {
        match id {
            FlareParamId::Threshold => self.threshold,
            FlareParamId::Scale => self.scale,
            FlareParamId::Spread => self.spread,
            FlareParamId::Intensity => self.intensity,
        }
    }

    pub fn set(&mut self, id: FlareParamId, value: f32) {
        match id {
            FlareParamId::Threshold => self.threshold = value,
            FlareParamId::Scale => self.scale = value,
            FlareParamId::Spread => self.spread = value,
            FlareParamId::Intensity => self.intensity = value,
        }
    }

    /// Copy with every value clamped into its slider range.
    pub fn clamped(&self) -> Self {
        let mut out = *self;
        for param in FlareParameter::descriptors() {
            out.set(param.id, param.clamp_to_range(self.get(param.id)));
        }
        out
    }
}

/// Atomic f32 wrapper for lock-free access from the UI and render paths.
#[derive(Debug)]
pub struct AtomicF32(AtomicU32);

impl AtomicF32 {
    pub fn new(val: f32) -> Self {
        Self(AtomicU32::new(val.to_bits()))
    }

    pub fn load(&self) -> f32 {
        f32::from_bits(self.0.load(Ordering::Relaxed))
    }

    pub fn store(&self, val: f32) {
        self.0.store(val.to_bits(), Ordering::Relaxed);
    }
}

impl Default for AtomicF32 {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clone for AtomicF32 {
    fn clone(&self) -> Self {
        Self::new(self.load())
    }
}

/// The four flare controls shared between the UI and the renderer.
///
/// Each value is stored independently, so a snapshot taken while the UI is
/// writing may mix old and new values. That is acceptable for a cosmetic
/// effect and avoids any locking on the render path.
#[derive(Debug)]
pub struct SharedFlareParams {
    threshold: AtomicF32,
    scale: AtomicF32,
    spread: AtomicF32,
    intensity: AtomicF32,
}

impl SharedFlareParams {
    pub fn new(params: FlareParams) -> Self {
        Self {
            threshold: AtomicF32::new(params.threshold),
            scale: AtomicF32::new(params.scale),
            spread: AtomicF32::new(params.spread),
            intensity: AtomicF32::new(params.intensity),
        }
    }

    pub fn load(&self, id: FlareParamId) -> f32 {
        self.slot(id).load()
    }

    pub fn store(&self, id: FlareParamId, value: f32) {
        self.slot(id).store(value);
    }

    /// Read all four values once, for use during a single frame.
    pub fn snapshot(&self) -> FlareParams {
        FlareParams {
            threshold: self.threshold.load(),
            scale: self.scale.load(),
            spread: self.spread.load(),
            intensity: self.intensity.load(),
        }
    }

    pub fn store_all(&self, params: &FlareParams) {
        for id in FlareParamId::ALL {
            self.store(id, params.get(id));
        }
    }

    fn slot(&self, id: FlareParamId) -> &AtomicF32 {
        match id {
            FlareParamId::Threshold => &self.threshold,
            FlareParamId::Scale => &self.scale,
            FlareParamId::Spread => &self.spread,
            FlareParamId::Intensity => &self.intensity,
        }
    }
}

impl Default for SharedFlareParams {
    fn default() -> Self {
        Self::new(FlareParams::default())
    }
}

/// Describes one flare control: range, default, and slider step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlareParameter {
    pub id: FlareParamId,
    pub name: String,
    pub description: String,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub default_value: f32,
    pub step: f32,
}

impl FlareParameter {
    pub fn new(
        id: FlareParamId,
        description: impl Into<String>,
        value: f32,
        min: f32,
        max: f32,
    ) -> Self {
        Self {
            id,
            name: id.name().to_string(),
            description: description.into(),
            value,
            min,
            max,
            default_value: value,
            step: 0.01,
        }
    }

    pub fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// The four controls with their default values, in display order.
    pub fn descriptors() -> [FlareParameter; 4] {
        [
            FlareParameter::new(
                FlareParamId::Threshold,
                "Minimum neighbor brightness that feeds the streak.",
                DEFAULT_THRESHOLD,
                0.0,
                2.0,
            ),
            FlareParameter::new(
                FlareParamId::Scale,
                "Overall strength of the streak.",
                DEFAULT_SCALE,
                0.0,
                4.0,
            ),
            FlareParameter::new(
                FlareParamId::Spread,
                "Horizontal distance between samples, in texture units.",
                DEFAULT_SPREAD,
                0.001,
                0.02,
            )
            .with_step(0.0001),
            FlareParameter::new(
                FlareParamId::Intensity,
                "Multiplier applied to the accumulated streak.",
                DEFAULT_INTENSITY,
                0.0,
                4.0,
            ),
        ]
    }

    /// Descriptors carrying the current values of `params`.
    pub fn from_params(params: &FlareParams) -> [FlareParameter; 4] {
        let mut out = Self::descriptors();
        for param in out.iter_mut() {
            param.value = params.get(param.id);
        }
        out
    }

    pub fn clamp_to_range(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }

    /// Get the normalized value in [0, 1].
    pub fn normalized_value(&self) -> f32 {
        if self.max == self.min {
            return 0.0;
        }
        ((self.value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Set value from a normalized [0, 1] input.
    pub fn set_from_normalized(&mut self, normalized: f32) {
        let clamped = normalized.clamp(0.0, 1.0);
        self.value = self.min + clamped * (self.max - self.min);
    }

    pub fn reset_to_default(&mut self) {
        self.value = self.default_value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_descriptors() {
        let params = FlareParams::default();
        for param in FlareParameter::descriptors() {
            assert_eq!(param.default_value, params.get(param.id), "{}", param.name);
            assert!(param.min <= param.default_value && param.default_value <= param.max);
        }
    }

    #[test]
    fn test_descriptor_ranges() {
        let [threshold, scale, spread, intensity] = FlareParameter::descriptors();
        assert_eq!((threshold.min, threshold.max), (0.0, 2.0));
        assert_eq!((scale.min, scale.max), (0.0, 4.0));
        assert_eq!((spread.min, spread.max), (0.001, 0.02));
        assert_eq!(spread.step, 0.0001);
        assert_eq!((intensity.min, intensity.max), (0.0, 4.0));
    }

    #[test]
    fn test_key_roundtrip() {
        for id in FlareParamId::ALL {
            assert_eq!(FlareParamId::from_key(id.key()), Some(id));
        }
        assert_eq!(FlareParamId::from_key("bloom"), None);
    }

    #[test]
    fn test_clamped_only_touches_out_of_range() {
        let params = FlareParams { threshold: 5.0, scale: -1.0, spread: 0.01, intensity: 2.0 };
        let clamped = params.clamped();
        assert_eq!(clamped.threshold, 2.0);
        assert_eq!(clamped.scale, 0.0);
        assert_eq!(clamped.spread, 0.01);
        assert_eq!(clamped.intensity, 2.0);
    }

    #[test]
    fn test_parameter_normalize() {
        let mut p = FlareParameter::descriptors()[1].clone();
        p.value = 1.0;
        assert!((p.normalized_value() - 0.25).abs() < 0.001);
        p.set_from_normalized(0.5);
        assert!((p.value - 2.0).abs() < 0.001);
        p.reset_to_default();
        assert_eq!(p.value, DEFAULT_SCALE);
    }

    #[test]
    fn test_from_params_carries_values() {
        let params = FlareParams { threshold: 0.5, ..Default::default() };
        let descriptors = FlareParameter::from_params(&params);
        assert_eq!(descriptors[0].value, 0.5);
        assert_eq!(descriptors[0].default_value, DEFAULT_THRESHOLD);
    }

    #[test]
    fn test_shared_params_snapshot() {
        let shared = SharedFlareParams::default();
        assert_eq!(shared.snapshot(), FlareParams::default());

        shared.store(FlareParamId::Spread, 0.01);
        assert_eq!(shared.load(FlareParamId::Spread), 0.01);
        assert_eq!(shared.snapshot().spread, 0.01);

        let preset = FlareParams { threshold: 1.5, scale: 2.0, spread: 0.002, intensity: 3.0 };
        shared.store_all(&preset);
        assert_eq!(shared.snapshot(), preset);
    }

    #[test]
    fn test_atomic_f32() {
        let a = AtomicF32::new(3.14);
        assert!((a.load() - 3.14).abs() < 0.001);
        a.store(2.71);
        assert!((a.load() - 2.71).abs() < 0.001);
    }
}
