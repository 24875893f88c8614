//! Tolerance-based grouping of tokens into lines.
//!
//! Two strategies coexist and are deliberately not unified:
//!
//! - [`group_equations`] clusters around anchor tokens. Membership is decided
//!   only against the anchor, so a group is not transitively closed: two
//!   members may lie further apart than the tolerance from each other.
//! - [`group_reading_lines`] scans tokens top to bottom and chains each token
//!   to the previously added one, following gradual baseline drift.

use tracing::trace;

use super::line::Line;
use super::token::Token;

/// Group tokens into equations around anchor tokens.
///
/// Tokens are visited in input order. Every token not yet assigned becomes an
/// anchor and pulls in all remaining unassigned tokens whose `center.y` is
/// within `tolerance` of the anchor's. The result partitions the input.
pub fn group_equations(tokens: &[Token], tolerance: f64) -> Vec<Line> {
    let mut assigned = vec![false; tokens.len()];
    let mut groups = Vec::new();

    for (i, anchor) in tokens.iter().enumerate() {
        if assigned[i] {
            continue;
        }
        assigned[i] = true;
        let anchor_y = anchor.center().y;
        let mut members = vec![anchor.clone()];

        // Everything before `i` is already assigned.
        for (j, other) in tokens.iter().enumerate().skip(i + 1) {
            if !assigned[j] && (other.center().y - anchor_y).abs() <= tolerance {
                assigned[j] = true;
                members.push(other.clone());
            }
        }

        trace!(anchor = anchor.text(), members = members.len(), "equation group");
        groups.push(Line::from_tokens(members));
    }

    groups
}

/// Group tokens into reading lines, top to bottom.
///
/// Tokens are sorted by `center.y`; a token joins the current line when it is
/// within `tolerance` of the most recently added token, otherwise it starts a
/// new line. Lines come out in non-decreasing mean `center.y`.
pub fn group_reading_lines(tokens: &[Token], tolerance: f64) -> Vec<Line> {
    let mut ordered: Vec<&Token> = tokens.iter().collect();
    ordered.sort_by(|a, b| a.center().y.total_cmp(&b.center().y));

    let mut lines = Vec::new();
    let mut current: Vec<Token> = Vec::new();
    let mut reference_y: Option<f64> = None;

    for token in ordered {
        let y = token.center().y;
        match reference_y {
            Some(r) if (y - r).abs() <= tolerance => {}
            _ => {
                if !current.is_empty() {
                    lines.push(Line::from_tokens(std::mem::take(&mut current)));
                }
            }
        }
        current.push(token.clone());
        reference_y = Some(y);
    }
    if !current.is_empty() {
        lines.push(Line::from_tokens(current));
    }

    trace!(lines = lines.len(), "reading lines");
    lines
}

/// One joined string per reading line, top to bottom.
pub fn lines_in_order(lines: &[Line]) -> Vec<String> {
    lines.iter().map(Line::text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str, cx: f64, cy: f64) -> Token {
        Token::from_rect(text, cx - 5.0, cy - 5.0, cx + 5.0, cy + 5.0).unwrap()
    }

    fn texts(lines: &[Line]) -> Vec<String> {
        lines_in_order(lines)
    }

    #[test]
    fn anchor_grouping_is_not_transitive() {
        // b is within 20 of anchor a, c is within 20 of b but 30 from a.
        let tokens = vec![tok("a", 0.0, 100.0), tok("b", 10.0, 115.0), tok("c", 20.0, 130.0)];
        let groups = group_equations(&tokens, 20.0);
        assert_eq!(texts(&groups), vec!["a b", "c"]);
    }

    #[test]
    fn anchor_grouping_depends_on_input_order() {
        let tokens = vec![tok("b", 10.0, 115.0), tok("a", 0.0, 100.0), tok("c", 20.0, 130.0)];
        let groups = group_equations(&tokens, 20.0);
        assert_eq!(texts(&groups), vec!["a b c"]);
    }

    #[test]
    fn chain_grouping_follows_drift() {
        let tokens = vec![
            tok("c", 20.0, 150.0),
            tok("a", 0.0, 100.0),
            tok("b", 10.0, 125.0),
            tok("z", 0.0, 300.0),
        ];
        let lines = group_reading_lines(&tokens, 30.0);
        assert_eq!(texts(&lines), vec!["a b c", "z"]);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(group_equations(&[], 20.0).is_empty());
        assert!(group_reading_lines(&[], 30.0).is_empty());
    }

    #[test]
    fn zero_tolerance_only_joins_identical_centers() {
        let tokens = vec![tok("x", 0.0, 50.0), tok("y", 10.0, 50.0), tok("z", 20.0, 51.0)];
        assert_eq!(texts(&group_reading_lines(&tokens, 0.0)), vec!["x y", "z"]);
        assert_eq!(texts(&group_equations(&tokens, 0.0)), vec!["x y", "z"]);
    }
}
