//! Splicing panels into page markdown.
//!
//! Paired fences are cut out of the markdown before rendering and replaced
//! with single-line comment markers; the markers pass through the markdown
//! renderer untouched and are swapped for panel HTML afterwards. Going
//! through markers keeps multi-line escaped source out of the markdown
//! renderer's HTML-block handling.

use regex::Regex;

use crate::html::render_panel;
use crate::panel::{CompareLabels, ComparePanel};

/// Marker emitted in place of a panel's fences.
fn marker(panel: &ComparePanel) -> String {
    format!("<!-- tandem:panel:{} -->", panel.id())
}

/// Replace each panel's paired fences in the markdown source.
///
/// The left fence becomes the panel's marker line; the right fence is
/// removed. Fences that fail to match (edited source, unusual fencing) are
/// left alone, which degrades to ordinary code blocks in the output.
pub fn splice_panels(content: &str, panels: &[ComparePanel]) -> String {
    let mut processed = content.to_string();

    for panel in panels {
        // Note: Regex is compiled per-fence because the pattern embeds the
        // block's source text. Pages carry few panels, so this stays cheap.
        if let Some(re) = fence_pattern(&panel.left.source, "left") {
            processed = re
                .replace(&processed, format!("{}\n", marker(panel)).as_str())
                .to_string();
        }
        if let Some(re) = fence_pattern(&panel.right.source, "right") {
            processed = re.replace(&processed, "").to_string();
        }
    }

    processed
}

/// Replace panel markers in rendered HTML with panel markup.
pub fn inject_panels(html: &str, panels: &[ComparePanel], labels: &CompareLabels) -> String {
    let mut out = html.to_string();

    for panel in panels {
        out = out.replace(&marker(panel), &render_panel(panel, labels));
    }

    out
}

/// Pattern matching a fenced block with the given pane keyword and source.
fn fence_pattern(source: &str, keyword: &str) -> Option<Regex> {
    let escaped = regex::escape(source);
    let pattern = format!(
        r"```[^\n]*\s{}\b[^\n]*\n{}\n?```",
        keyword,
        escaped.trim()
    );
    Regex::new(&pattern).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pairing::pair_blocks;
    use pretty_assertions::assert_eq;
    use tandem_mdx::parse_doc;

    const PAGE: &str = r#"# Redirects

Server-side redirects.

```tsx left filename="app/page.tsx"
redirect('/login');
```

```tsx right filename="app/routes/_index.tsx"
return redirect('/login');
```

Plain block stays:

```bash
echo ok
```
"#;

    #[test]
    fn splices_markers_for_paired_fences() {
        let doc = parse_doc(PAGE).unwrap();
        let (panels, issues) = pair_blocks(&doc.code_blocks);
        assert!(issues.is_empty());

        let processed = splice_panels(&doc.content, &panels);

        assert!(processed.contains("<!-- tandem:panel:"));
        assert!(!processed.contains("```tsx left"));
        assert!(!processed.contains("```tsx right"));
        assert!(processed.contains("```bash"));
    }

    #[test]
    fn injects_panel_html_at_markers() {
        let doc = parse_doc(PAGE).unwrap();
        let (panels, _) = pair_blocks(&doc.code_blocks);

        let processed = splice_panels(&doc.content, &panels);
        let injected = inject_panels(&processed, &panels, &CompareLabels::default());

        assert!(!injected.contains("<!-- tandem:panel:"));
        assert!(injected.contains(r#"<div class="side-by-side">"#));
        assert!(injected.contains("redirect('/login');"));
    }

    #[test]
    fn identical_sources_resolve_to_their_own_fences() {
        // Both panes share the exact same source text; the pane keyword in the
        // fence info keeps the patterns distinct.
        let page = "```tsx left\nexport {};\n```\n\n```tsx right\nexport {};\n```\n";
        let doc = parse_doc(page).unwrap();
        let (panels, issues) = pair_blocks(&doc.code_blocks);
        assert!(issues.is_empty());

        let processed = splice_panels(&doc.content, &panels);

        assert_eq!(processed.matches("tandem:panel").count(), 1);
        assert!(!processed.contains("```tsx"));
    }

    #[test]
    fn unmatched_fence_degrades_to_plain_block() {
        let doc = parse_doc(PAGE).unwrap();
        let (mut panels, _) = pair_blocks(&doc.code_blocks);
        // Simulate a block whose source no longer appears in the page.
        panels[0].left.source = "something else".to_string();

        let processed = splice_panels(&doc.content, &panels);

        assert!(processed.contains("```tsx left"));
    }
}
