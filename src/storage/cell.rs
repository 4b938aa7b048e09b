use serde::{Deserialize, Serialize};
use std::fmt;

/// One spreadsheet cell
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Empty cells and whitespace-only text count as blank
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Display text of the cell; whole numbers render without a fraction
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Number(n) => format_number(*n),
            CellValue::Text(s) => s.trim().to_string(),
        }
    }

    /// Numeric value of the cell, parsing text when needed
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            _ => None,
        }
    }

    /// Integer value of the cell; fractional numbers are rejected.
    ///
    /// Text such as `"12.0"` counts as the whole number it spells.
    pub fn as_i64(&self) -> Option<i64> {
        if let CellValue::Text(s) = self {
            if let Ok(n) = s.trim().parse::<i64>() {
                return Some(n);
            }
        }
        self.as_f64()
            .filter(|n| n.fract() == 0.0 && n.abs() < 9.0e15)
            .map(|n| n as i64)
    }

    /// Non-negative integer value, used for remote ids
    pub fn as_u64(&self) -> Option<u64> {
        self.as_i64().and_then(|n| u64::try_from(n).ok())
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1.0e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}
