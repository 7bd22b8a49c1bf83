use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const KG_PER_LB: f64 = 0.453_592_37;
pub const LB_PER_KG: f64 = 1.0 / KG_PER_LB;

/// Mass unit used for entering and displaying weights.
///
/// Stored weights are always kilograms, the unit only affects conversion at the
/// boundaries.
#[derive(
    AsRefStr, Display, EnumIter, EnumString, Debug, Default, Clone, Copy, PartialEq, Eq, Hash,
)]
pub enum Unit {
    #[default]
    #[strum(serialize = "kg")]
    Kg,
    #[strum(serialize = "lbs")]
    Lbs,
}

impl Unit {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Unit::Kg => Unit::Lbs,
            Unit::Lbs => Unit::Kg,
        }
    }

    #[must_use]
    pub fn to_kg(self, value: f64) -> f64 {
        match self {
            Unit::Kg => value,
            Unit::Lbs => value * KG_PER_LB,
        }
    }

    #[must_use]
    pub fn from_kg(self, kg: f64) -> f64 {
        match self {
            Unit::Kg => kg,
            Unit::Lbs => kg * LB_PER_KG,
        }
    }
}

/// A weight as it arrives from an input field or a stored record.
///
/// Anything that is not a finite number counts as zero.
pub trait WeightInput {
    fn numeric_value(&self) -> Option<f64>;
}

impl WeightInput for str {
    fn numeric_value(&self) -> Option<f64> {
        let trimmed = self.trim();
        if trimmed.is_empty() {
            return Some(0.0);
        }
        trimmed
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
    }
}

impl WeightInput for &str {
    fn numeric_value(&self) -> Option<f64> {
        (**self).numeric_value()
    }
}

impl WeightInput for String {
    fn numeric_value(&self) -> Option<f64> {
        self.as_str().numeric_value()
    }
}

impl WeightInput for f64 {
    fn numeric_value(&self) -> Option<f64> {
        Some(*self).filter(|v| v.is_finite())
    }
}

impl WeightInput for f32 {
    fn numeric_value(&self) -> Option<f64> {
        f64::from(*self).numeric_value()
    }
}

impl WeightInput for u32 {
    fn numeric_value(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl WeightInput for i32 {
    fn numeric_value(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl<T: WeightInput> WeightInput for Option<T> {
    fn numeric_value(&self) -> Option<f64> {
        self.as_ref().and_then(WeightInput::numeric_value)
    }
}

/// Converts a value entered in `unit` into kilograms.
#[must_use]
pub fn to_canonical(unit: Unit, value: impl WeightInput) -> f64 {
    unit.to_kg(value.numeric_value().unwrap_or(0.0))
}

/// Converts stored kilograms into `unit` for display.
#[must_use]
pub fn from_canonical(unit: Unit, kg: impl Into<Option<f64>>) -> f64 {
    unit.from_kg(kg.into().unwrap_or(0.0))
}

/// Rounds to two decimals, with halves rounded up towards positive infinity.
#[must_use]
pub fn round_display(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}
