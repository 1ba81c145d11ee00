//! Closed categorical encodings: position side and position action.
//!
//! The source data stores these as raw codes (`l`/`s` and `1`/`-1`/`0`).
//! Both enums own their code and display-label tables so nothing downstream
//! maps strings ad hoc.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A raw code that does not belong to a closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} code '{code}'")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: String,
}

/// Side of the reported position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Long,
    Short,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Long, Side::Short];

    /// Raw code as stored in the source table.
    pub fn code(self) -> &'static str {
        match self {
            Side::Long => "l",
            Side::Short => "s",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Side::Long => "Long",
            Side::Short => "Short",
        }
    }

    /// Decode a raw code. Accepts the short code, the snake_case name and
    /// the original spreadsheet label.
    pub fn from_code(code: &str) -> Result<Self, UnknownCode> {
        match code.trim() {
            "l" | "L" | "long" | "Long" | "多头" => Ok(Side::Long),
            "s" | "S" | "short" | "Short" | "空头" => Ok(Side::Short),
            other => Err(UnknownCode {
                kind: "side",
                code: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Side {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Side::from_code(s)
    }
}

/// What the broker did to the position on this date, a signed tri-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Decrease,
    Unchanged,
    Increase,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Increase, Action::Decrease, Action::Unchanged];

    /// Signed code: +1 increase, -1 decrease, 0 unchanged.
    pub fn code(self) -> i8 {
        match self {
            Action::Increase => 1,
            Action::Decrease => -1,
            Action::Unchanged => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::Increase => "Increase",
            Action::Decrease => "Decrease",
            Action::Unchanged => "Unchanged",
        }
    }

    pub fn from_signed(code: i64) -> Result<Self, UnknownCode> {
        match code {
            1 => Ok(Action::Increase),
            -1 => Ok(Action::Decrease),
            0 => Ok(Action::Unchanged),
            other => Err(UnknownCode {
                kind: "action",
                code: other.to_string(),
            }),
        }
    }

    /// Decode a raw code. Spreadsheet exports sometimes write the signed code
    /// as a float (`1.0`), so integral floats are accepted too.
    pub fn from_code(code: &str) -> Result<Self, UnknownCode> {
        let trimmed = code.trim();
        match trimmed {
            "increase" | "Increase" | "加仓" => return Ok(Action::Increase),
            "decrease" | "Decrease" | "减仓" => return Ok(Action::Decrease),
            "unchanged" | "Unchanged" | "不变" => return Ok(Action::Unchanged),
            _ => {}
        }
        let unknown = || UnknownCode {
            kind: "action",
            code: trimmed.to_string(),
        };
        if let Ok(n) = trimmed.parse::<i64>() {
            return Action::from_signed(n).map_err(|_| unknown());
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.fract() == 0.0 => Action::from_signed(f as i64).map_err(|_| unknown()),
            _ => Err(unknown()),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = UnknownCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::from_code(s)
    }
}
