//! Layout analysis parameters.
//!
//! Contains LayoutParams struct for controlling clustering and highlighting.

use serde::{Deserialize, Serialize};

use crate::error::{InklineError, Result};

pub const DEFAULT_EQUATION_TOLERANCE: f64 = 20.0;
pub const DEFAULT_LINE_TOLERANCE: f64 = 30.0;
pub const DEFAULT_HIGHLIGHT_PADDING: f64 = 10.0;

/// Parameters for board layout analysis.
///
/// Tolerances are vertical center distances in image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutParams {
    /// Two tokens whose centers are at most this far apart vertically from an
    /// equation's anchor token belong to that equation.
    pub equation_tolerance: f64,

    /// Maximum vertical center distance between a token and the previously
    /// added token of a reading line.
    pub line_tolerance: f64,

    /// Padding reported with every highlight region, in canvas units.
    pub highlight_padding: f64,

    /// Whether the first detection is the provider's full-transcript entry.
    pub skip_transcript: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            equation_tolerance: DEFAULT_EQUATION_TOLERANCE,
            line_tolerance: DEFAULT_LINE_TOLERANCE,
            highlight_padding: DEFAULT_HIGHLIGHT_PADDING,
            skip_transcript: true,
        }
    }
}

impl LayoutParams {
    /// Creates new layout parameters with the specified values.
    ///
    /// Every numeric value must be finite and non-negative.
    pub fn new(
        equation_tolerance: f64,
        line_tolerance: f64,
        highlight_padding: f64,
        skip_transcript: bool,
    ) -> Result<Self> {
        let params = Self {
            equation_tolerance,
            line_tolerance,
            highlight_padding,
            skip_transcript,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks values that may have come from a config file or the command line.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("equation_tolerance", self.equation_tolerance),
            ("line_tolerance", self.line_tolerance),
            ("highlight_padding", self.highlight_padding),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(InklineError::InvalidParam { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_tolerance() {
        let err = LayoutParams::new(-1.0, 30.0, 10.0, true).unwrap_err();
        assert!(matches!(
            err,
            InklineError::InvalidParam {
                name: "equation_tolerance",
                ..
            }
        ));
        assert!(LayoutParams::new(20.0, f64::NAN, 10.0, true).is_err());
    }

    #[test]
    fn partial_config_falls_back_to_defaults() {
        let params: LayoutParams = serde_json::from_str(r#"{"lineTolerance": 25}"#).unwrap();
        assert_eq!(params.line_tolerance, 25.0);
        assert_eq!(params.equation_tolerance, DEFAULT_EQUATION_TOLERANCE);
        assert!(params.skip_transcript);
    }
}
