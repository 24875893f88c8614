//! Regex-driven classification of tokens and equation lines.
//!
//! Two rule tables live side by side:
//! - [`EQUATION_RULES`] extracts equation components with the narrow ASCII
//!   operator set and single-letter variables.
//! - [`TOKEN_RULES`] tags isolated tokens with the broader Unicode operator
//!   set and subscripted variables (`x_1`, `x2`).

pub mod equation;
pub mod rules;

pub use equation::{ClassifiedLine, Components, EquationKind, classify_line};
pub use rules::{ComponentKind, EQUATION_RULES, Rule, RuleSet, TOKEN_RULES, TokenKind, classify_token};
