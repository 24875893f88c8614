//! A left-to-right run of tokens judged to share one writing line.

use itertools::Itertools;
use serde::Serialize;

use super::token::Token;
use crate::geometry::{BBox, union_all};
use crate::mapping::CanvasTransform;

/// Tokens sorted ascending by `center.x`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Line {
    tokens: Vec<Token>,
}

impl Line {
    /// Builds a line, ordering tokens left to right.
    ///
    /// The sort is stable, so tokens sharing a center keep their input order.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        tokens.sort_by(|a, b| a.center().x.total_cmp(&b.center().x));
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token texts joined by a single space.
    pub fn text(&self) -> String {
        self.tokens.iter().map(Token::text).join(" ")
    }

    /// Union of all member boxes; the zero box for an empty line.
    pub fn bbox(&self) -> BBox {
        union_all(self.tokens.iter().map(Token::bbox)).unwrap_or_default()
    }

    /// The line with every token moved through `transform`.
    ///
    /// Token order is kept as is, so a flipped axis does not reorder the line.
    pub fn mapped(&self, transform: &CanvasTransform) -> Line {
        Line {
            tokens: self.tokens.iter().map(|t| t.mapped(transform)).collect(),
        }
    }

    /// Mean `center.y` of the members.
    pub fn mean_center_y(&self) -> f64 {
        if self.tokens.is_empty() {
            return 0.0;
        }
        self.tokens.iter().map(|t| t.center().y).sum::<f64>() / self.tokens.len() as f64
    }
}
