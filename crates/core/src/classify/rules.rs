//! Pattern tables evaluated in priority order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One `{pattern, label}` entry of a rule table.
#[derive(Debug)]
pub struct Rule<L> {
    pub pattern: Regex,
    pub label: L,
}

/// An ordered rule table. The first matching rule wins.
#[derive(Debug)]
pub struct RuleSet<L> {
    name: &'static str,
    rules: Vec<Rule<L>>,
    fallback: Option<L>,
}

impl<L: Copy + PartialEq> RuleSet<L> {
    fn build(name: &'static str, table: &[(&str, L)], fallback: Option<L>) -> Self {
        let rules = table
            .iter()
            .map(|&(pattern, label)| Rule {
                // Patterns are literals in this file; a bad one is a programming error.
                pattern: Regex::new(pattern).expect("rule pattern must compile"),
                label,
            })
            .collect();
        Self {
            name,
            rules,
            fallback,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule<L>] {
        &self.rules
    }

    /// Label of the first rule matching the trimmed text, else the fallback.
    pub fn classify(&self, text: &str) -> Option<L> {
        let text = text.trim();
        self.rules
            .iter()
            .find(|r| r.pattern.is_match(text))
            .map(|r| r.label)
            .or(self.fallback)
    }

    /// Whether any rule carrying `label` matches the trimmed text,
    /// regardless of higher-priority rules.
    pub fn matches(&self, label: L, text: &str) -> bool {
        let text = text.trim();
        self.rules
            .iter()
            .filter(|r| r.label == label)
            .any(|r| r.pattern.is_match(text))
    }
}

/// Equation component categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Number,
    Operator,
    Variable,
    Symbol,
}

/// Tag for an isolated token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Number,
    Operator,
    Variable,
    Equation,
    Word,
}

/// Integer or decimal over ASCII digits.
const NUMBER: &str = r"^-?[0-9]+(\.[0-9]+)?$";

/// Greek letters plus the summation, root, integral and infinity signs.
const SYMBOL: &str = r"^[α-ωΑ-ΩΣ√∫∑∞]$";

/// Narrow rules for equation component extraction.
///
/// Variables are single ASCII letters only; operators are the ASCII set
/// `+ - * / = < >`.
pub static EQUATION_RULES: Lazy<RuleSet<ComponentKind>> = Lazy::new(|| {
    RuleSet::build(
        "equation",
        &[
            (NUMBER, ComponentKind::Number),
            (r"^[+\-*/=<>]$", ComponentKind::Operator),
            (r"^[a-zA-Z]$", ComponentKind::Variable),
            (SYMBOL, ComponentKind::Symbol),
        ],
        None,
    )
});

/// Broad rules for tagging isolated tokens.
///
/// Operators also cover `× ÷ ≤ ≥`; variables may carry a digit subscript
/// with or without an underscore.
pub static TOKEN_RULES: Lazy<RuleSet<TokenKind>> = Lazy::new(|| {
    RuleSet::build(
        "token",
        &[
            (NUMBER, TokenKind::Number),
            (r"^[+\-*/×÷=<>≤≥]$", TokenKind::Operator),
            (r"^[a-zA-Z](_?[0-9]+)?$", TokenKind::Variable),
            ("=", TokenKind::Equation),
        ],
        Some(TokenKind::Word),
    )
});

/// Tag a single token's text with the broad rule table.
pub fn classify_token(text: &str) -> TokenKind {
    TOKEN_RULES.classify(text).unwrap_or(TokenKind::Word)
}
