//! Locating the tokens behind a phrase of recognized text.
//!
//! Matching works on lowercased, trimmed token texts. An exact contiguous
//! run of the query words is preferred; failing that, each query word is
//! looked up independently. A failed lookup is a normal `None` result.

use serde::Serialize;
use smallvec::SmallVec;
use tracing::debug;

use crate::geometry::{BBox, union_all};
use crate::layout::{Line, Token};
use crate::mapping::CanvasTransform;

/// How the matched tokens were found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The query words appeared as one contiguous run.
    Exact,
    /// Words were found independently; some may be missing.
    Partial,
    /// Nothing matched; the region covers the whole line.
    WholeLine,
}

/// Tokens matched for a query, in the order they were matched.
#[derive(Clone, Debug, PartialEq)]
pub struct TokenMatch<'a> {
    pub tokens: Vec<&'a Token>,
    pub kind: MatchKind,
}

impl TokenMatch<'_> {
    pub fn bbox(&self) -> Option<BBox> {
        union_all(self.tokens.iter().copied().map(Token::bbox))
    }
}

/// A canvas-space box to draw around referenced text.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightRegion {
    pub bounding_box: BBox,
    pub matched_token_texts: Vec<String>,
    pub padding: f64,
    pub match_kind: MatchKind,
}

impl HighlightRegion {
    /// The bounding box grown by the padding.
    pub fn padded_box(&self) -> BBox {
        self.bounding_box.expand(self.padding)
    }
}

type QueryWords = SmallVec<[String; 8]>;

fn query_words(query: &str) -> QueryWords {
    query
        .trim()
        .to_lowercase()
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

fn exact_run<'a>(tokens: &'a [Token], words: &[String]) -> Option<Vec<&'a Token>> {
    let mut run: Vec<&Token> = Vec::new();
    let mut i = 0;
    for token in tokens {
        if i == words.len() {
            break;
        }
        let key = token.match_key();
        if key == words[i] {
            run.push(token);
            i += 1;
        } else if key == words[0] {
            run.clear();
            run.push(token);
            i = 1;
        } else if !run.is_empty() {
            run.clear();
            i = 0;
        }
    }
    (i == words.len()).then_some(run)
}

fn independent_words<'a>(tokens: &'a [Token], words: &[String]) -> Vec<&'a Token> {
    let keys: Vec<String> = tokens.iter().map(Token::match_key).collect();
    let mut picked: SmallVec<[usize; 8]> = SmallVec::new();
    for word in words {
        if let Some(idx) = keys.iter().position(|k| k == word) {
            if !picked.contains(&idx) {
                picked.push(idx);
            }
        }
    }
    picked.into_iter().map(|idx| &tokens[idx]).collect()
}

/// Find the tokens of `line` that produced `query`.
pub fn match_tokens<'a>(line: &'a Line, query: &str) -> Option<TokenMatch<'a>> {
    let words = query_words(query);
    if words.is_empty() {
        return None;
    }
    if let Some(tokens) = exact_run(line.tokens(), &words) {
        return Some(TokenMatch {
            tokens,
            kind: MatchKind::Exact,
        });
    }
    let tokens = independent_words(line.tokens(), &words);
    if tokens.is_empty() {
        return None;
    }
    Some(TokenMatch {
        tokens,
        kind: MatchKind::Partial,
    })
}

fn region_from(m: &TokenMatch<'_>, transform: &CanvasTransform, padding: f64) -> Option<HighlightRegion> {
    let pixel_box = m.bbox()?;
    Some(HighlightRegion {
        bounding_box: transform.map_box(&pixel_box),
        matched_token_texts: m.tokens.iter().map(|t| t.text().to_owned()).collect(),
        padding,
        match_kind: m.kind,
    })
}

/// Locate `query` within one line and return its canvas-space region.
pub fn locate(line: &Line, query: &str, transform: &CanvasTransform, padding: f64) -> Option<HighlightRegion> {
    let m = match_tokens(line, query)?;
    region_from(&m, transform, padding)
}

/// Like [`locate`], but an unmatched query highlights the whole line.
///
/// Returns `None` only for an empty line.
pub fn highlight_or_line(
    line: &Line,
    query: &str,
    transform: &CanvasTransform,
    padding: f64,
) -> Option<HighlightRegion> {
    if let Some(region) = locate(line, query, transform, padding) {
        return Some(region);
    }
    if line.is_empty() {
        return None;
    }
    Some(HighlightRegion {
        bounding_box: transform.map_box(&line.bbox()),
        matched_token_texts: Vec::new(),
        padding,
        match_kind: MatchKind::WholeLine,
    })
}

/// A highlight located somewhere on the board.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardHighlight {
    pub equation_index: usize,
    #[serde(flatten)]
    pub region: HighlightRegion,
}

/// Locate `query` across all equations.
///
/// The first equation holding an exact run wins. Otherwise the equation with
/// the most independently matched words wins, earliest on ties.
pub fn locate_on_board<L: AsRef<Line>>(
    equations: &[L],
    query: &str,
    transform: &CanvasTransform,
    padding: f64,
) -> Option<BoardHighlight> {
    let mut best: Option<(usize, TokenMatch<'_>)> = None;
    for (idx, eq) in equations.iter().enumerate() {
        let Some(m) = match_tokens(eq.as_ref(), query) else {
            continue;
        };
        if m.kind == MatchKind::Exact {
            best = Some((idx, m));
            break;
        }
        let better = match &best {
            Some((_, current)) => m.tokens.len() > current.tokens.len(),
            None => true,
        };
        if better {
            best = Some((idx, m));
        }
    }

    let (equation_index, m) = best?;
    debug!(equation_index, kind = ?m.kind, matched = m.tokens.len(), "highlight located");
    let region = region_from(&m, transform, padding)?;
    Some(BoardHighlight {
        equation_index,
        region,
    })
}
