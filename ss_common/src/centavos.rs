use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, AddAssign, Mul, Sub},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::Type;
use thiserror::Error;

pub const CENTAVOS_PER_PESO: i64 = 100;

//--------------------------------------     Centavos       ----------------------------------------------------------
/// An exact money amount, stored as an integer number of centavos.
///
/// Client-facing payloads carry decimal peso amounts, so the serde representation is a plain number (`19.5` means
/// 19 pesos 50 centavos). Internally all arithmetic is integer arithmetic on the centavo count.
#[derive(Debug, Clone, Copy, Default, Type, PartialEq, Eq, PartialOrd, Ord)]
#[sqlx(transparent)]
pub struct Centavos(i64);

impl Add for Centavos {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Centavos {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Centavos {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Mul<i64> for Centavos {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        Self::from(self.value() * rhs)
    }
}

impl Sum for Centavos {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented in centavos: {0}")]
pub struct CentavosConversionError(String);

impl From<i64> for Centavos {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl Display for Centavos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.as_pesos())
    }
}

impl Serialize for Centavos {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_pesos())
    }
}

impl<'de> Deserialize<'de> for Centavos {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pesos = f64::deserialize(deserializer)?;
        Self::try_from_pesos(pesos).map_err(serde::de::Error::custom)
    }
}

impl Centavos {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn from_pesos(pesos: i64) -> Self {
        Self(pesos * CENTAVOS_PER_PESO)
    }

    pub fn as_pesos(&self) -> f64 {
        self.0 as f64 / CENTAVOS_PER_PESO as f64
    }

    /// Convert a decimal peso amount to centavos, rounding to the nearest centavo.
    pub fn try_from_pesos(pesos: f64) -> Result<Self, CentavosConversionError> {
        let centavos = (pesos * CENTAVOS_PER_PESO as f64).round();
        if !centavos.is_finite() || centavos.abs() > i64::MAX as f64 {
            return Err(CentavosConversionError(format!("{pesos} is out of range")));
        }
        #[allow(clippy::cast_possible_truncation)]
        Ok(Self(centavos as i64))
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Overflow-aware multiplication, for callers that take the factor from untrusted input.
    pub fn checked_mul(self, rhs: i64) -> Option<Self> {
        self.0.checked_mul(rhs).map(Self)
    }

    /// Overflow-aware addition, for callers accumulating untrusted amounts.
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn peso_conversions() {
        assert_eq!(Centavos::from_pesos(10), Centavos::from(1_000));
        assert_eq!(Centavos::try_from_pesos(19.5).unwrap(), Centavos::from(1_950));
        assert_eq!(Centavos::try_from_pesos(0.1).unwrap(), Centavos::from(10));
        assert!(Centavos::try_from_pesos(f64::NAN).is_err());
        assert!(Centavos::try_from_pesos(f64::INFINITY).is_err());
    }

    #[test]
    fn exact_subtotals() {
        let unit = Centavos::try_from_pesos(0.1).unwrap();
        let subtotal = unit * 3;
        assert_eq!(subtotal, Centavos::from(30));
        let total: Centavos = vec![subtotal, Centavos::from_pesos(2)].into_iter().sum();
        assert_eq!(total, Centavos::from(230));
    }

    #[test]
    fn wire_format_is_decimal() {
        let amount = Centavos::from(1_950);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "19.5");
        let back: Centavos = serde_json::from_str("19.5").unwrap();
        assert_eq!(back, amount);
        let whole: Centavos = serde_json::from_str("20").unwrap();
        assert_eq!(whole, Centavos::from_pesos(20));
    }

    #[test]
    fn checked_arithmetic_reports_overflow() {
        let unit = Centavos::from(1_000);
        assert_eq!(unit.checked_mul(3), Some(Centavos::from(3_000)));
        assert_eq!(unit.checked_mul(i64::MAX), None);
        assert_eq!(unit.checked_add(Centavos::from(500)), Some(Centavos::from(1_500)));
        assert_eq!(Centavos::from(i64::MAX).checked_add(unit), None);
    }

    #[test]
    fn display_as_pesos() {
        assert_eq!(Centavos::from(1_950).to_string(), "$19.50");
        assert_eq!(Centavos::default().to_string(), "$0.00");
    }
}
