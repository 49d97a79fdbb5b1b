//! HTML rendering for comparison panels.

use tandem_mdx::CodeBlock;

use crate::panel::{CompareLabels, ComparePanel};

/// Render a panel to an HTML fragment.
///
/// Two columns, each headed by its framework label and optional filename
/// caption. Column layout and narrow-screen stacking come from the site
/// stylesheet.
pub fn render_panel(panel: &ComparePanel, labels: &CompareLabels) -> String {
    format!(
        r#"<div class="side-by-side">{}{}</div>"#,
        render_pane(&panel.left, &labels.left),
        render_pane(&panel.right, &labels.right),
    )
}

fn render_pane(block: &CodeBlock, label: &str) -> String {
    let caption = match &block.filename {
        Some(name) => format!(
            r#"<div class="pane-filename">{}</div>"#,
            escape_html(name)
        ),
        None => String::new(),
    };

    format!(
        r#"<div class="pane"><div class="pane-label">{}</div>{}<pre><code class="language-{}">{}</code></pre></div>"#,
        escape_html(label),
        caption,
        block.language.as_str(),
        escape_html(block.source.trim_end()),
    )
}

/// Minimal HTML escaping for text interpolated into panel markup.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_mdx::{Language, Pane};

    fn panel() -> ComparePanel {
        let mut left = CodeBlock::new(
            Language::Tsx,
            Some(Pane::Left),
            "export default function Page() {\n  return <h1>Hi</h1>;\n}\n".to_string(),
            5,
        );
        left.filename = Some("app/page.tsx".to_string());

        let right = CodeBlock::new(
            Language::Tsx,
            Some(Pane::Right),
            "export default function Index() {}\n".to_string(),
            12,
        );

        ComparePanel { left, right }
    }

    #[test]
    fn renders_both_panes_with_labels() {
        let html = render_panel(&panel(), &CompareLabels::default());

        assert!(html.contains(r#"<div class="side-by-side">"#));
        assert!(html.contains(r#"<div class="pane-label">Next.js</div>"#));
        assert!(html.contains(r#"<div class="pane-label">Remix</div>"#));
        assert!(html.contains(r#"<div class="pane-filename">app/page.tsx</div>"#));
        assert!(html.contains(r#"class="language-tsx""#));
    }

    #[test]
    fn escapes_source_markup() {
        let html = render_panel(&panel(), &CompareLabels::default());

        assert!(html.contains("&lt;h1&gt;Hi&lt;/h1&gt;"));
        assert!(!html.contains("<h1>Hi</h1>"));
    }

    #[test]
    fn custom_labels() {
        let labels = CompareLabels {
            left: "Vue".to_string(),
            right: "Svelte".to_string(),
        };

        let html = render_panel(&panel(), &labels);

        assert!(html.contains(">Vue</div>"));
        assert!(html.contains(">Svelte</div>"));
    }

    #[test]
    fn escape_covers_quotes_and_ampersands() {
        assert_eq!(
            escape_html(r#"a < b && c > "d""#),
            "a &lt; b &amp;&amp; c &gt; &quot;d&quot;"
        );
    }
}
