//! Documentation comment association
//!
//! tree-sitter keeps comments as `comment` extras next to the declaration
//! rather than as trivia attached to it. The leading trivia of a declaration
//! is therefore the run of comment siblings directly before it, minus a
//! comment that sits on the same line as the previous token (that one
//! trails the previous token).
//!
//! The first structured comment in that run, together with any following
//! lines of the same style, is the documentation block. It is returned
//! verbatim; the XML markup inside is left to downstream consumers.

use tree_sitter::Node;

use crate::detectors::grammar::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocStyle {
    /// `/// ...`
    SingleLine,
    /// `/** ... */`
    MultiLine,
}

fn doc_style(text: &str) -> Option<DocStyle> {
    // `////` and `/**/` are ordinary comments
    if text.starts_with("///") && !text.starts_with("////") {
        Some(DocStyle::SingleLine)
    } else if text.starts_with("/**") && text != "/**/" {
        Some(DocStyle::MultiLine)
    } else {
        None
    }
}

fn comment_text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Leading comment run of `node`, in source order
fn leading_comments<'t>(node: &Node<'t>) -> Vec<Node<'t>> {
    let mut run = Vec::new();
    let mut boundary_row = None;
    let mut current = node.prev_sibling();

    while let Some(sibling) = current {
        if SyntaxKind::of(&sibling) != SyntaxKind::Comment {
            boundary_row = Some(sibling.end_position().row);
            break;
        }
        run.push(sibling);
        current = sibling.prev_sibling();
    }

    run.reverse();
    if let Some(row) = boundary_row {
        run.retain(|c| c.start_position().row != row);
    }
    run
}

/// Documentation block immediately preceding `node`, verbatim, or `None`
pub fn documentation_for(node: &Node, source: &str) -> Option<String> {
    let run = leading_comments(node);

    let (start, style) = run
        .iter()
        .enumerate()
        .find_map(|(i, c)| doc_style(comment_text(c, source)).map(|s| (i, s)))?;

    let first = run[start];
    let mut last = first;
    if style == DocStyle::SingleLine {
        for next in &run[start + 1..] {
            let contiguous = next.start_position().row == last.end_position().row + 1;
            if contiguous && doc_style(comment_text(next, source)) == Some(DocStyle::SingleLine) {
                last = *next;
            } else {
                break;
            }
        }
    }

    source
        .get(first.start_byte()..last.end_byte())
        .map(|text| text.to_string())
}
