//! Typed scalar cell values as read from a worksheet.

use std::fmt;

use crate::core::error::ConvertError;

/// One worksheet cell. `Absent` is distinct from an empty string.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Absent,
    Text(String),
    Int(i64),
    Float(f64),
}

/// An ordered row of cells, 0-indexed by column
pub type Row = Vec<CellValue>;

impl CellValue {
    /// Shorthand used heavily by fixtures
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// Present means truthy: not absent, not an empty string, not zero.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Absent => false,
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Int(n) => *n != 0,
            CellValue::Float(x) => *x != 0.0,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render as text: absent is empty, integral floats keep one decimal.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Numeric view of the cell; text is accepted when it parses as a number.
    pub fn as_number(&self) -> Option<CellValue> {
        match self {
            CellValue::Int(_) | CellValue::Float(_) => Some(self.clone()),
            CellValue::Text(s) => {
                let s = s.trim();
                if let Ok(n) = s.parse::<i64>() {
                    Some(CellValue::Int(n))
                } else {
                    s.parse::<f64>().ok().map(CellValue::Float)
                }
            }
            CellValue::Absent => None,
        }
    }

    /// Multiply two numeric cells. Integers stay integral unless the
    /// product overflows; any float operand yields a float.
    pub fn checked_product(&self, other: &CellValue) -> Result<CellValue, ConvertError> {
        let lhs = self
            .as_number()
            .ok_or_else(|| ConvertError::NonNumericQuantity(self.to_text()))?;
        let rhs = other
            .as_number()
            .ok_or_else(|| ConvertError::NonNumericQuantity(other.to_text()))?;

        Ok(match (lhs, rhs) {
            (CellValue::Int(a), CellValue::Int(b)) => match a.checked_mul(b) {
                Some(n) => CellValue::Int(n),
                None => CellValue::Float(a as f64 * b as f64),
            },
            (a, b) => CellValue::Float(a.as_f64() * b.as_f64()),
        })
    }

    fn as_f64(&self) -> f64 {
        match self {
            CellValue::Int(n) => *n as f64,
            CellValue::Float(f) => *f,
            _ => 0.0,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Int(n) => write!(f, "{n}"),
            CellValue::Float(x) if x.is_finite() && x.fract() == 0.0 && x.abs() < 1e16 => {
                write!(f, "{x:.1}")
            }
            CellValue::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Int(n.into())
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Absent)
    }
}

/// Build a `Row` from heterogeneous literals: `row![None::<&str>, "中間横桁", 6i64]`
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        vec![$($crate::core::cell::CellValue::from($cell)),*]
    };
}
