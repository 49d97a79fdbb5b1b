//! Pairing of pane-marked code blocks into comparison panels.

use tandem_mdx::{CodeBlock, Pane};

use crate::panel::ComparePanel;

/// A block that could not be paired.
///
/// Issues do not abort a build; the orphaned block stays in the document as
/// an ordinary code block and the issue is reported to the caller.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PairingIssue {
    #[error("left pane at line {line} has no matching right pane")]
    UnmatchedLeft { line: usize },

    #[error("right pane at line {line} has no preceding left pane")]
    UnmatchedRight { line: usize },
}

/// Pair `left`/`right` blocks into panels, in document order.
///
/// A `left` block pairs with the next `right` block. A second `left` before
/// any `right` orphans the first; a `right` with no pending `left` is orphaned
/// itself. Unmarked blocks never participate.
pub fn pair_blocks(blocks: &[CodeBlock]) -> (Vec<ComparePanel>, Vec<PairingIssue>) {
    let mut panels = Vec::new();
    let mut issues = Vec::new();
    let mut pending_left: Option<&CodeBlock> = None;

    for block in blocks {
        match block.pane {
            Some(Pane::Left) => {
                if let Some(orphan) = pending_left.replace(block) {
                    issues.push(PairingIssue::UnmatchedLeft {
                        line: orphan.line_number,
                    });
                }
            }
            Some(Pane::Right) => match pending_left.take() {
                Some(left) => panels.push(ComparePanel {
                    left: left.clone(),
                    right: block.clone(),
                }),
                None => issues.push(PairingIssue::UnmatchedRight {
                    line: block.line_number,
                }),
            },
            None => {}
        }
    }

    if let Some(orphan) = pending_left {
        issues.push(PairingIssue::UnmatchedLeft {
            line: orphan.line_number,
        });
    }

    (panels, issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tandem_mdx::Language;

    fn block(pane: Option<Pane>, line: usize) -> CodeBlock {
        CodeBlock::new(Language::Tsx, pane, format!("// line {line}"), line)
    }

    #[test]
    fn pairs_left_then_right() {
        let blocks = [block(Some(Pane::Left), 5), block(Some(Pane::Right), 10)];

        let (panels, issues) = pair_blocks(&blocks);

        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].left.line_number, 5);
        assert_eq!(panels[0].right.line_number, 10);
        assert!(issues.is_empty());
    }

    #[test]
    fn unmarked_blocks_do_not_interrupt_a_pair() {
        let blocks = [
            block(Some(Pane::Left), 5),
            block(None, 8),
            block(Some(Pane::Right), 12),
        ];

        let (panels, issues) = pair_blocks(&blocks);

        assert_eq!(panels.len(), 1);
        assert!(issues.is_empty());
    }

    #[test]
    fn second_left_orphans_the_first() {
        let blocks = [
            block(Some(Pane::Left), 5),
            block(Some(Pane::Left), 9),
            block(Some(Pane::Right), 13),
        ];

        let (panels, issues) = pair_blocks(&blocks);

        assert_eq!(panels.len(), 1);
        assert_eq!(panels[0].left.line_number, 9);
        assert_eq!(issues, vec![PairingIssue::UnmatchedLeft { line: 5 }]);
    }

    #[test]
    fn right_without_left_is_orphaned() {
        let blocks = [block(Some(Pane::Right), 3)];

        let (panels, issues) = pair_blocks(&blocks);

        assert!(panels.is_empty());
        assert_eq!(issues, vec![PairingIssue::UnmatchedRight { line: 3 }]);
    }

    #[test]
    fn trailing_left_is_orphaned() {
        let blocks = [
            block(Some(Pane::Left), 5),
            block(Some(Pane::Right), 9),
            block(Some(Pane::Left), 20),
        ];

        let (panels, issues) = pair_blocks(&blocks);

        assert_eq!(panels.len(), 1);
        assert_eq!(issues, vec![PairingIssue::UnmatchedLeft { line: 20 }]);
    }

    #[test]
    fn multiple_panels_keep_document_order() {
        let blocks = [
            block(Some(Pane::Left), 5),
            block(Some(Pane::Right), 9),
            block(Some(Pane::Left), 20),
            block(Some(Pane::Right), 26),
        ];

        let (panels, issues) = pair_blocks(&blocks);

        assert_eq!(panels.len(), 2);
        assert!(panels[0].left.line_number < panels[1].left.line_number);
        assert!(issues.is_empty());
    }
}
