//! board creation settings and the limits of the generator
use serde::{Deserialize, Serialize};

use crate::compact_representation::dimensions::check_range;
use crate::errors::BoardError;

#[allow(missing_docs)]
pub const MIN_COLS: usize = 2;
#[allow(missing_docs)]
pub const MAX_COLS: usize = 15;
#[allow(missing_docs)]
pub const DEFAULT_COLS: usize = 10;
#[allow(missing_docs)]
pub const MIN_ROWS: usize = 2;
#[allow(missing_docs)]
pub const MAX_ROWS: usize = 15;
#[allow(missing_docs)]
pub const DEFAULT_ROWS: usize = 10;
#[allow(missing_docs)]
pub const MIN_WALL_PERCENT: u8 = 0;
#[allow(missing_docs)]
pub const MAX_WALL_PERCENT: u8 = 100;
#[allow(missing_docs)]
pub const DEFAULT_WALL_PERCENT: u8 = 10;

/// What a new board should look like. Fields missing from a JSON document fall
/// back to the defaults.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    #[allow(missing_docs)]
    pub cols: usize,
    #[allow(missing_docs)]
    pub rows: usize,
    /// upper bound for the share of wall cells, in percent
    pub max_wall_percent: u8,
    /// board edges wrap around
    pub overflow: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            max_wall_percent: DEFAULT_WALL_PERCENT,
            overflow: false,
        }
    }
}

impl Settings {
    #[allow(missing_docs)]
    pub fn new(cols: usize, rows: usize, max_wall_percent: u8, overflow: bool) -> Self {
        Settings {
            cols,
            rows,
            max_wall_percent,
            overflow,
        }
    }

    /// checks cols, rows and the wall budget, in that order
    pub fn validate(&self) -> Result<(), BoardError> {
        check_range("cols", self.cols, MIN_COLS, MAX_COLS)?;
        check_range("rows", self.rows, MIN_ROWS, MAX_ROWS)?;
        check_range(
            "max_wall_percent",
            self.max_wall_percent as usize,
            MIN_WALL_PERCENT as usize,
            MAX_WALL_PERCENT as usize,
        )
    }

    /// the largest number of walls an accepted board may contain
    pub fn wall_budget(&self) -> usize {
        self.cols * self.rows * self.max_wall_percent as usize / 100
    }

    /// Loads settings from a json document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Bounds for the accept/reject loop of the generator
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationLimits {
    /// boards drawn before giving up
    pub max_attempts: u32,
}

impl Default for GenerationLimits {
    fn default() -> Self {
        GenerationLimits {
            max_attempts: 100_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings, Settings::new(10, 10, 10, false));
        assert_eq!(settings.validate(), Ok(()));
        assert_eq!(settings.wall_budget(), 10);
    }

    #[test]
    fn test_validate_reports_first_problem() {
        assert!(matches!(
            Settings::new(1, 16, 101, false).validate(),
            Err(BoardError::OutOfRange { what: "cols", .. })
        ));
        assert!(matches!(
            Settings::new(2, 16, 101, false).validate(),
            Err(BoardError::OutOfRange { what: "rows", .. })
        ));
        assert!(matches!(
            Settings::new(2, 15, 101, false).validate(),
            Err(BoardError::OutOfRange {
                what: "max_wall_percent",
                ..
            })
        ));
    }

    #[test]
    fn test_wall_budget_rounds_down() {
        assert_eq!(Settings::new(3, 3, 50, false).wall_budget(), 4);
        assert_eq!(Settings::new(2, 2, 24, false).wall_budget(), 0);
        assert_eq!(Settings::new(15, 15, 100, true).wall_budget(), 225);
    }

    #[test]
    fn test_from_json_fills_missing_fields() {
        let settings = Settings::from_json(r#"{"cols": 4, "overflow": true}"#).unwrap();
        assert_eq!(settings, Settings::new(4, DEFAULT_ROWS, DEFAULT_WALL_PERCENT, true));
        assert!(Settings::from_json("{\"cols\": -1}").is_err());
    }
}
