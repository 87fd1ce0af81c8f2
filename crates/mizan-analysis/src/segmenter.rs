//! Paragraph segmentation and first-match clause classification.

use tracing::debug;

use mizan_core::catalog::{Catalog, ClauseTypeDefinition, Haystack};
use mizan_core::model::{ExtractedClause, TextSpan};
use mizan_core::text;

/// A non-blank run of lines, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    pub text: &'a str,
    pub span: TextSpan,
}

/// Split a document on blank lines.
///
/// Spans are char offsets into `doc`; `line` is the 1-based line where the
/// paragraph's first non-blank line starts.
pub fn paragraphs(doc: &str) -> Vec<Paragraph<'_>> {
    let mut out = Vec::new();
    // (byte start, char start, line) of the paragraph being built.
    let mut open: Option<(usize, usize, usize)> = None;
    let mut byte_pos = 0;
    let mut char_pos = 0;

    for (idx, line) in doc.split_inclusive('\n').enumerate() {
        if line.trim().is_empty() {
            if let Some(start) = open.take() {
                out.push(close(doc, start, byte_pos));
            }
        } else if open.is_none() {
            open = Some((byte_pos, char_pos, idx + 1));
        }
        byte_pos += line.len();
        char_pos += line.chars().count();
    }
    if let Some(start) = open {
        out.push(close(doc, start, byte_pos));
    }
    out
}

fn close(
    doc: &str,
    (byte_start, char_start, line): (usize, usize, usize),
    byte_end: usize,
) -> Paragraph<'_> {
    let raw = &doc[byte_start..byte_end];
    let lead = raw.len() - raw.trim_start().len();
    let text = raw.trim();
    let start = char_start + raw[..lead].chars().count();
    Paragraph {
        text,
        span: TextSpan {
            start,
            end: start + text.chars().count(),
            line,
        },
    }
}

/// A paragraph together with the clause type that claimed it.
#[derive(Debug, Clone)]
pub struct ClauseMatch<'a, 'c> {
    pub paragraph: Paragraph<'a>,
    pub clause_type: &'c ClauseTypeDefinition,
}

/// Classify every paragraph; unmatched paragraphs are dropped.
pub fn match_paragraphs<'a, 'c>(catalog: &'c Catalog, doc: &'a str) -> Vec<ClauseMatch<'a, 'c>> {
    paragraphs(doc)
        .into_iter()
        .filter_map(|paragraph| {
            let haystack = Haystack::new(paragraph.text);
            let clause_type = catalog.first_match(&haystack)?;
            debug!(
                clause_type = %clause_type.id,
                line = paragraph.span.line,
                "matched paragraph"
            );
            Some(ClauseMatch {
                paragraph,
                clause_type,
            })
        })
        .collect()
}

/// Related-clause ids for each clause, index-aligned with `clauses`.
///
/// A and B are related when either one's content mentions the other's title
/// (Turkish case-insensitive). The relation is symmetric; a clause is never
/// related to itself.
pub fn related_clauses(clauses: &[ExtractedClause]) -> Vec<Vec<String>> {
    let contents: Vec<String> = clauses.iter().map(|c| text::fold(&c.content)).collect();
    let mentions = |a: usize, b: usize| text::contains_folded(&contents[a], &clauses[b].title);

    (0..clauses.len())
        .map(|a| {
            (0..clauses.len())
                .filter(|&b| b != a && (mentions(a, b) || mentions(b, a)))
                .map(|b| clauses[b].id.clone())
                .collect()
        })
        .collect()
}
