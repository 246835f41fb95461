//! Weight strings such as `"3 x 150g"` or `"1.2kg"` normalized to kilograms.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

static WEIGHT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\s*(\d+\.\d*|\d*\.\d+|\d+)\s*(?:[xX]\s*(\d+\.\d*|\d*\.\d+|\d+)\s*)?([a-zA-Z]+)[\s.]*$",
    )
    .expect("Invalid weight regex")
});

const GRAMS_PER_KG: f64 = 1000.0;
const KG_PER_OUNCE: f64 = 0.028_349_5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Gram,
    Kilogram,
    Millilitre,
    Ounce,
}

impl WeightUnit {
    pub fn to_kg(self, amount: f64) -> f64 {
        match self {
            WeightUnit::Gram | WeightUnit::Millilitre => amount / GRAMS_PER_KG,
            WeightUnit::Kilogram => amount,
            WeightUnit::Ounce => amount * KG_PER_OUNCE,
        }
    }
}

impl FromStr for WeightUnit {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "g" => Ok(WeightUnit::Gram),
            "kg" => Ok(WeightUnit::Kilogram),
            // Treated as water density.
            "ml" => Ok(WeightUnit::Millilitre),
            "oz" => Ok(WeightUnit::Ounce),
            _ => Err(()),
        }
    }
}

/// Parse `N unit` or `N x M unit` into kilograms.
///
/// Returns `None` for unparseable strings, unknown units and results that are
/// not strictly positive.
pub fn parse_weight_kg(raw: &str) -> Option<f64> {
    let captures = WEIGHT_REGEX.captures(raw)?;
    let amount: f64 = captures.get(1)?.as_str().parse().ok()?;
    let multiplier: f64 = match captures.get(2) {
        Some(value) => value.as_str().parse().ok()?,
        None => 1.0,
    };
    let unit: WeightUnit = captures.get(3)?.as_str().parse().ok()?;
    let kg = unit.to_kg(amount * multiplier);
    (kg.is_finite() && kg > 0.0).then_some(kg)
}

/// Shipping class derived from `weight_kg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightClass {
    Light,
    MidSized,
    Heavy,
    TruckRequired,
}

impl WeightClass {
    pub fn for_weight(kg: f64) -> Self {
        if kg < 2.0 {
            WeightClass::Light
        } else if kg < 40.0 {
            WeightClass::MidSized
        } else if kg < 140.0 {
            WeightClass::Heavy
        } else {
            WeightClass::TruckRequired
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WeightClass::Light => "Light",
            WeightClass::MidSized => "Mid_Sized",
            WeightClass::Heavy => "Heavy",
            WeightClass::TruckRequired => "Truck_Required",
        }
    }
}

impl fmt::Display for WeightClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
