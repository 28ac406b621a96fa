//! Explicit numeric formatting for decimal values exchanged as text.
//!
//! Stores hand decimals back as text in whichever representation they were
//! configured with. `NumberFormat` names the decimal separator of that text
//! so parsing never depends on the host locale. Callers receive it through
//! configuration and pass it to every parse and format call.

use std::str::FromStr;

use rust_decimal::Decimal;

const INVARIANT_SEPARATOR: char = '.';

/// Errors raised while configuring or applying a [`NumberFormat`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberFormatError {
    /// The configured separator is neither one character nor a known name.
    #[error("decimal separator must be a single character, `dot`, or `comma`, got {value:?}")]
    SeparatorLength {
        /// The rejected separator text.
        value: String,
    },
    /// The configured separator would be ambiguous inside a number.
    #[error("decimal separator {separator:?} cannot be a digit, sign, or whitespace")]
    InvalidSeparator {
        /// The rejected separator character.
        separator: char,
    },
    /// The text does not describe a decimal number.
    #[error("{text:?} is not a valid decimal number")]
    Unparseable {
        /// The text that failed to parse.
        text: String,
    },
}

/// Decimal separator configuration used when converting decimals to and from
/// text.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use traveler_backend::domain::NumberFormat;
///
/// let format = NumberFormat::new(',').expect("comma is a valid separator");
/// let value = format.parse_decimal("150,50").expect("parse");
/// assert_eq!(value, Decimal::new(15050, 2));
/// assert_eq!(format.format_decimal(value), "150,50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    decimal_separator: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::invariant()
    }
}

impl NumberFormat {
    /// Format using `.` as the decimal separator.
    #[must_use]
    pub const fn invariant() -> Self {
        Self {
            decimal_separator: INVARIANT_SEPARATOR,
        }
    }

    /// Build a format with a custom decimal separator.
    ///
    /// # Errors
    /// Returns [`NumberFormatError::InvalidSeparator`] for digits, signs,
    /// whitespace, and control characters.
    pub fn new(decimal_separator: char) -> Result<Self, NumberFormatError> {
        if decimal_separator.is_ascii_digit()
            || decimal_separator.is_whitespace()
            || decimal_separator.is_control()
            || matches!(decimal_separator, '-' | '+')
        {
            return Err(NumberFormatError::InvalidSeparator {
                separator: decimal_separator,
            });
        }
        Ok(Self { decimal_separator })
    }

    /// Build a format from a configuration value.
    ///
    /// The value is either a single character or one of the names `dot`,
    /// `period`, or `comma` (any case). Names exist because environment
    /// values containing `,` are read as lists.
    ///
    /// # Errors
    /// Returns [`NumberFormatError::SeparatorLength`] unless `value` holds
    /// exactly one character or a known name, or the errors of
    /// [`NumberFormat::new`].
    pub fn from_setting(value: &str) -> Result<Self, NumberFormatError> {
        let named = value.trim();
        if named.eq_ignore_ascii_case("dot") || named.eq_ignore_ascii_case("period") {
            return Ok(Self::invariant());
        }
        if named.eq_ignore_ascii_case("comma") {
            return Self::new(',');
        }
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(separator), None) => Self::new(separator),
            _ => Err(NumberFormatError::SeparatorLength {
                value: value.to_owned(),
            }),
        }
    }

    /// Configured decimal separator.
    #[must_use]
    pub const fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// Parse text written with this format's separator.
    ///
    /// Text already using `.` is accepted as well, so values written by an
    /// invariant store parse under any configured format.
    ///
    /// # Errors
    /// Returns [`NumberFormatError::Unparseable`] when the normalised text is
    /// not an exact decimal.
    pub fn parse_decimal(&self, text: &str) -> Result<Decimal, NumberFormatError> {
        let trimmed = text.trim();
        let normalised = if self.decimal_separator == INVARIANT_SEPARATOR {
            trimmed.to_owned()
        } else {
            trimmed.replace(self.decimal_separator, ".")
        };
        Decimal::from_str_exact(&normalised)
            .or_else(|_| Decimal::from_str(&normalised))
            .map_err(|_| NumberFormatError::Unparseable {
                text: text.to_owned(),
            })
    }

    /// Render a decimal with this format's separator, preserving its scale.
    #[must_use]
    pub fn format_decimal(&self, value: Decimal) -> String {
        let rendered = value.to_string();
        if self.decimal_separator == INVARIANT_SEPARATOR {
            rendered
        } else {
            rendered.replace(INVARIANT_SEPARATOR, &self.decimal_separator.to_string())
        }
    }
}
