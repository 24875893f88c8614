//! Classification of a whole line into an equation type with components.

use serde::Serialize;
use tracing::trace;

use super::rules::{ComponentKind, EQUATION_RULES};
use crate::geometry::BBox;
use crate::layout::{Line, Token};
use crate::mapping::CanvasTransform;

/// Structural type of a line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EquationKind {
    Equation,
    Expression,
    NumberSequence,
    Unknown,
}

/// Token texts sorted into component buckets, in line order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Components {
    pub numbers: Vec<String>,
    pub operators: Vec<String>,
    pub variables: Vec<String>,
    pub symbols: Vec<String>,
}

impl Components {
    /// Runs one independent pass per component kind over the tokens.
    pub fn extract(tokens: &[Token]) -> Self {
        let pass = |kind: ComponentKind| -> Vec<String> {
            tokens
                .iter()
                .map(|t| t.text().trim())
                .filter(|text| EQUATION_RULES.matches(kind, text))
                .map(str::to_owned)
                .collect()
        };
        Self {
            numbers: pass(ComponentKind::Number),
            operators: pass(ComponentKind::Operator),
            variables: pass(ComponentKind::Variable),
            symbols: pass(ComponentKind::Symbol),
        }
    }

    fn has_operator(&self, ops: &[&str]) -> bool {
        self.operators.iter().any(|o| ops.contains(&o.as_str()))
    }
}

type KindRule = (fn(&Components) -> bool, EquationKind);

fn has_equals(c: &Components) -> bool {
    c.has_operator(&["="])
}

fn has_arithmetic(c: &Components) -> bool {
    c.has_operator(&["+", "-", "*", "/"])
}

fn only_numbers(c: &Components) -> bool {
    !c.numbers.is_empty() && c.operators.is_empty()
}

/// Type decision table, highest priority first.
const KIND_RULES: [KindRule; 3] = [
    (has_equals, EquationKind::Equation),
    (has_arithmetic, EquationKind::Expression),
    (only_numbers, EquationKind::NumberSequence),
];

impl EquationKind {
    pub fn decide(components: &Components) -> Self {
        KIND_RULES
            .iter()
            .find(|(pred, _)| pred(components))
            .map(|&(_, kind)| kind)
            .unwrap_or(EquationKind::Unknown)
    }
}

/// A line plus its reconstructed text, components, type and union box.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedLine {
    #[serde(flatten)]
    pub line: Line,
    pub reconstructed_text: String,
    pub components: Components,
    #[serde(rename = "type")]
    pub kind: EquationKind,
    pub bounding_box: BBox,
}

impl ClassifiedLine {
    /// The same classification with the line and its box in canvas space.
    pub fn mapped(&self, transform: &CanvasTransform) -> ClassifiedLine {
        ClassifiedLine {
            line: self.line.mapped(transform),
            reconstructed_text: self.reconstructed_text.clone(),
            components: self.components.clone(),
            kind: self.kind,
            bounding_box: transform.map_box(&self.bounding_box),
        }
    }
}

impl AsRef<Line> for ClassifiedLine {
    fn as_ref(&self) -> &Line {
        &self.line
    }
}

/// Classify one line.
pub fn classify_line(line: Line) -> ClassifiedLine {
    let components = Components::extract(line.tokens());
    let kind = EquationKind::decide(&components);
    let reconstructed_text = line.text();
    trace!(text = %reconstructed_text, ?kind, "classified line");
    ClassifiedLine {
        reconstructed_text,
        components,
        kind,
        bounding_box: line.bbox(),
        line,
    }
}
