//! Layout targets selectable through layout directives.

use std::{fmt, str::FromStr};

use super::error::DomainError;

const MAX_COLUMNS: u8 = 4;

/// Number of inline units per row for the column layout, restricted to `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ColumnCount(u8);

impl ColumnCount {
    pub fn new(columns: u8) -> Result<Self, DomainError> {
        if columns == 0 || columns > MAX_COLUMNS {
            return Err(DomainError::invalid_configuration(format!(
                "unsupported column count `{columns}` (expected 1 to {MAX_COLUMNS})"
            )));
        }
        Ok(Self(columns))
    }

    pub fn get(self) -> usize {
        usize::from(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutTarget {
    #[default]
    Normal,
    Columns(ColumnCount),
    Center,
}

impl LayoutTarget {
    pub fn columns(columns: u8) -> Result<Self, DomainError> {
        ColumnCount::new(columns).map(LayoutTarget::Columns)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutTarget::Normal => "normal",
            LayoutTarget::Columns(count) => match count.0 {
                1 => "one",
                2 => "two",
                3 => "three",
                _ => "four",
            },
            LayoutTarget::Center => "center",
        }
    }
}

impl fmt::Display for LayoutTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutTarget {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "normal" => Ok(LayoutTarget::Normal),
            "one" => LayoutTarget::columns(1),
            "two" => LayoutTarget::columns(2),
            "three" => LayoutTarget::columns(3),
            "four" => LayoutTarget::columns(4),
            "center" => Ok(LayoutTarget::Center),
            other => Err(DomainError::invalid_configuration(format!(
                "unknown layout `{other}`"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_count_rejects_unsupported_values() {
        for columns in [0u8, 5, 12] {
            let err = ColumnCount::new(columns).expect_err("unsupported count");
            assert!(
                err.to_string().contains(&format!("`{columns}`")),
                "error should name the offending value: {err}"
            );
        }
        assert_eq!(ColumnCount::new(4).expect("supported").get(), 4);
    }

    #[test]
    fn names_round_trip_through_display() {
        for name in ["normal", "one", "two", "three", "four", "center"] {
            let target: LayoutTarget = name.parse().expect("recognised name");
            assert_eq!(target.as_str(), name);
        }
    }

    #[test]
    fn unknown_name_is_invalid_configuration() {
        let err = "grid".parse::<LayoutTarget>().expect_err("unknown");
        assert_eq!(
            err,
            DomainError::invalid_configuration("unknown layout `grid`")
        );
    }
}
