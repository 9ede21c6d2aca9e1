// Mon Oct 19 2026 - Alex

use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const NANOS_PER_UNIT: u128 = 1_000_000_000;

static QUANTITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<int>[0-9]*)(?:\.(?P<frac>[0-9]*))?(?P<suffix>[eE][+-]?[0-9]+|Ki|Mi|Gi|Ti|Pi|Ei|[numkMGTPE])?$")
        .expect("quantity pattern is valid")
});

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuantityError {
    #[error("Empty quantity")]
    Empty,
    #[error("Negative quantity: {0}")]
    Negative(String),
    #[error("Unable to parse quantity: {0}")]
    Malformed(String),
    #[error("Quantity out of range: {0}")]
    Overflow(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityFormat {
    BinarySI,
    DecimalSI,
    DecimalExponent,
}

/// An exact, non-negative resource amount.
///
/// Values are held in nano-units so that decimal suffixes down to `n`
/// survive parsing without loss. Comparison is exact; `value()` rounds up to
/// whole units the same way the Kubernetes API does.
#[derive(Debug, Clone, Copy)]
pub struct Quantity {
    nanos: u128,
    format: QuantityFormat,
}

impl Quantity {
    pub fn from_bytes(bytes: u64, format: QuantityFormat) -> Self {
        Self {
            nanos: bytes as u128 * NANOS_PER_UNIT,
            format,
        }
    }

    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(QuantityError::Empty);
        }
        if s.starts_with('-') {
            return Err(QuantityError::Negative(s.to_string()));
        }
        let s = s.strip_prefix('+').unwrap_or(s);

        let caps = QUANTITY_PATTERN
            .captures(s)
            .ok_or_else(|| QuantityError::Malformed(input.to_string()))?;

        let int = caps.name("int").map_or("", |m| m.as_str());
        let frac = caps.name("frac").map_or("", |m| m.as_str());
        if int.is_empty() && frac.is_empty() {
            return Err(QuantityError::Malformed(input.to_string()));
        }

        let overflow = || QuantityError::Overflow(input.to_string());

        let digits = format!("{}{}", int, frac);
        let digits = digits.trim_start_matches('0');
        let mantissa: u128 = if digits.is_empty() {
            0
        } else {
            digits.parse().map_err(|_| overflow())?
        };
        let frac_len = frac.len() as i32;

        let suffix = caps.name("suffix").map_or("", |m| m.as_str());
        let (format, binary_shift, decimal_exp) = match suffix {
            "Ki" => (QuantityFormat::BinarySI, 10, 0),
            "Mi" => (QuantityFormat::BinarySI, 20, 0),
            "Gi" => (QuantityFormat::BinarySI, 30, 0),
            "Ti" => (QuantityFormat::BinarySI, 40, 0),
            "Pi" => (QuantityFormat::BinarySI, 50, 0),
            "Ei" => (QuantityFormat::BinarySI, 60, 0),
            "n" => (QuantityFormat::DecimalSI, 0, -9),
            "u" => (QuantityFormat::DecimalSI, 0, -6),
            "m" => (QuantityFormat::DecimalSI, 0, -3),
            "" => (QuantityFormat::DecimalSI, 0, 0),
            "k" => (QuantityFormat::DecimalSI, 0, 3),
            "M" => (QuantityFormat::DecimalSI, 0, 6),
            "G" => (QuantityFormat::DecimalSI, 0, 9),
            "T" => (QuantityFormat::DecimalSI, 0, 12),
            "P" => (QuantityFormat::DecimalSI, 0, 15),
            "E" => (QuantityFormat::DecimalSI, 0, 18),
            exp => {
                let exp: i32 = exp[1..].parse().map_err(|_| overflow())?;
                (QuantityFormat::DecimalExponent, 0, exp)
            }
        };

        let scaled = mantissa.checked_shl(binary_shift).ok_or_else(overflow)?;
        if binary_shift > 0 && scaled >> binary_shift != mantissa {
            return Err(overflow());
        }

        // nanos = scaled * 10^(9 + exp - frac_len), rounding any remainder up
        if scaled == 0 {
            return Ok(Self { nanos: 0, format });
        }
        let power = decimal_exp
            .checked_add(9)
            .and_then(|p| p.checked_sub(frac_len))
            .ok_or_else(overflow)?;
        let nanos = if power >= 0 {
            let factor = 10u128.checked_pow(power as u32).ok_or_else(overflow)?;
            scaled.checked_mul(factor).ok_or_else(overflow)?
        } else {
            match 10u128.checked_pow(power.unsigned_abs()) {
                Some(divisor) => div_ceil(scaled, divisor),
                None => 1,
            }
        };

        Ok(Self { nanos, format })
    }

    /// Whole units, rounded up.
    pub fn value(&self) -> u128 {
        div_ceil(self.nanos, NANOS_PER_UNIT)
    }

    pub fn format(&self) -> QuantityFormat {
        self.format
    }

    pub fn is_zero(&self) -> bool {
        self.nanos == 0
    }

    pub fn is_multiple_of(&self, unit: u64) -> bool {
        if unit == 0 {
            return false;
        }
        self.value() % unit as u128 == 0
    }

    fn render_binary(&self) -> Option<String> {
        if self.nanos % NANOS_PER_UNIT != 0 {
            return None;
        }
        let units = self.nanos / NANOS_PER_UNIT;
        if units == 0 {
            return Some("0".to_string());
        }
        const SUFFIXES: [&str; 6] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];
        let mut value = units;
        let mut picked = None;
        for suffix in SUFFIXES {
            if value % 1024 != 0 {
                break;
            }
            value /= 1024;
            picked = Some(suffix);
        }
        picked.map(|suffix| format!("{}{}", value, suffix))
    }

    fn render_decimal(&self, exponent_form: bool) -> String {
        if self.nanos == 0 {
            return "0".to_string();
        }
        let mut value = self.nanos;
        let mut exp: i32 = -9;
        while value % 1000 == 0 && exp < 18 {
            value /= 1000;
            exp += 3;
        }
        if exponent_form {
            if exp == 0 {
                value.to_string()
            } else {
                format!("{}e{}", value, exp)
            }
        } else {
            let suffix = match exp {
                -9 => "n",
                -6 => "u",
                -3 => "m",
                0 => "",
                3 => "k",
                6 => "M",
                9 => "G",
                12 => "T",
                15 => "P",
                _ => "E",
            };
            format!("{}{}", value, suffix)
        }
    }
}

fn div_ceil(value: u128, divisor: u128) -> u128 {
    value / divisor + u128::from(value % divisor != 0)
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.nanos == other.nanos
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.nanos.cmp(&other.nanos)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = match self.format {
            QuantityFormat::BinarySI => self
                .render_binary()
                .unwrap_or_else(|| self.render_decimal(false)),
            QuantityFormat::DecimalSI => self.render_decimal(false),
            QuantityFormat::DecimalExponent => self.render_decimal(true),
        };
        f.write_str(&rendered)
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Quantity {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

struct QuantityVisitor;

impl<'de> Visitor<'de> for QuantityVisitor {
    type Value = Quantity;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a quantity string such as \"2Gi\" or a non-negative integer")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Quantity, E> {
        Quantity::parse(v).map_err(E::custom)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Quantity, E> {
        Ok(Quantity::from_bytes(v, QuantityFormat::DecimalSI))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Quantity, E> {
        if v < 0 {
            return Err(E::custom(QuantityError::Negative(v.to_string())));
        }
        self.visit_u64(v as u64)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(QuantityVisitor)
    }
}
