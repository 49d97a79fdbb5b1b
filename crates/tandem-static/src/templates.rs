//! Template engine for rendering comparison pages.

use minijinja::{context, Environment};

/// A navigation item.
#[derive(Debug, Clone, serde::Serialize)]
pub struct NavItem {
    /// Display title
    pub title: String,
    /// URL path
    pub path: String,
    /// Child items
    pub children: Vec<NavItem>,
    /// Whether this is the active page
    pub active: bool,
}

/// A flattened table-of-contents entry, already in display order.
#[derive(Debug, Clone, serde::Serialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Anchor ID
    pub id: String,
    /// Heading level; drives indentation via per-depth CSS classes
    pub depth: u8,
}

/// Context for rendering a page template.
#[derive(Debug, Clone, serde::Serialize)]
pub struct Context {
    /// Page title
    pub title: String,
    /// Site title
    pub site_title: String,
    /// Rendered content HTML (panels already injected)
    pub content: String,
    /// Navigation items
    pub nav: Vec<NavItem>,
    /// Table of contents, flattened to pre-order
    pub toc: Vec<TocEntry>,
    /// Base URL
    pub base_url: String,
    /// Paths to CSS stylesheets to include
    pub styles: Vec<String>,
}

/// Template engine using minijinja.
pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with the built-in templates.
    pub fn new() -> Self {
        let mut env = Environment::new();

        env.add_template_owned("base.html".to_string(), BASE_TEMPLATE.to_string())
            .expect("Failed to add base template");

        env.add_template_owned("doc.html".to_string(), DOC_TEMPLATE.to_string())
            .expect("Failed to add doc template");

        env.add_template_owned("nav.html".to_string(), NAV_TEMPLATE.to_string())
            .expect("Failed to add nav template");

        Self { env }
    }

    /// Render a page using the specified template.
    pub fn render_page(
        &self,
        template: &str,
        context: &Context,
    ) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template)?;

        tmpl.render(context! {
            title => &context.title,
            site_title => &context.site_title,
            content => &context.content,
            nav => &context.nav,
            toc => &context.toc,
            base_url => &context.base_url,
            styles => &context.styles,
        })
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

const BASE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{{ title }} - {{ site_title }}</title>
  {% for style in styles %}<link rel="stylesheet" href="{{ style }}">
  {% endfor %}<link rel="stylesheet" href="{{ base_url }}assets/main.css">
</head>
<body>
  <div class="layout">
    <nav class="sidebar">
      {% include "nav.html" %}
    </nav>
    <main class="main">
      {% block content %}{% endblock %}
    </main>
  </div>
  <script src="{{ base_url }}assets/main.js"></script>
</body>
</html>"##;

const DOC_TEMPLATE: &str = r##"{% extends "base.html" %}

{% block content %}
<article class="doc">
  <div class="content">
    {{ content | safe }}
  </div>
</article>

{% if toc %}
<aside class="toc">
  <h2>On this page</h2>
  <ul>
  {% for entry in toc %}
    <li class="toc-depth-{{ entry.depth }}">
      <a href="#{{ entry.id }}">{{ entry.title }}</a>
    </li>
  {% endfor %}
  </ul>
</aside>
{% endif %}
{% endblock %}"##;

const NAV_TEMPLATE: &str = r##"<div class="nav-header">
  <a href="{{ base_url }}" class="nav-logo">{{ site_title }}</a>
</div>
<ul class="nav-list">
{% for item in nav %}
  <li class="nav-item{% if item.active %} active{% endif %}">
    <a href="{{ item.path }}">{{ item.title }}</a>
    {% if item.children %}
    <ul class="nav-children">
      {% for child in item.children %}
      <li class="nav-item{% if child.active %} active{% endif %}">
        <a href="{{ child.path }}">{{ child.title }}</a>
      </li>
      {% endfor %}
    </ul>
    {% endif %}
  </li>
{% endfor %}
</ul>"##;

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_context() -> Context {
        Context {
            title: "Routing".to_string(),
            site_title: "Remix for Next.js Developers".to_string(),
            content: "<p>Hello world</p>".to_string(),
            nav: vec![],
            toc: vec![],
            base_url: "/".to_string(),
            styles: vec![],
        }
    }

    #[test]
    fn renders_basic_page() {
        let engine = TemplateEngine::new();

        let html = engine.render_page("doc.html", &empty_context()).unwrap();

        assert!(html.contains("<title>Routing - Remix for Next.js Developers</title>"));
        assert!(html.contains("<p>Hello world</p>"));
    }

    #[test]
    fn renders_flat_toc_with_depth_classes() {
        let engine = TemplateEngine::new();

        let mut context = empty_context();
        context.toc = vec![
            TocEntry {
                title: "Routing".to_string(),
                id: "routing".to_string(),
                depth: 1,
            },
            TocEntry {
                title: "Pages".to_string(),
                id: "pages".to_string(),
                depth: 2,
            },
        ];

        let html = engine.render_page("doc.html", &context).unwrap();

        assert!(html.contains(r##"class="toc-depth-1""##));
        assert!(html.contains(r##"class="toc-depth-2""##));
        assert!(html.contains(r##"href="#pages""##));
        // Pre-order: parent link precedes child link
        assert!(html.find("#routing").unwrap() < html.find("#pages").unwrap());
    }

    #[test]
    fn omits_toc_aside_when_empty() {
        let engine = TemplateEngine::new();

        let html = engine.render_page("doc.html", &empty_context()).unwrap();

        assert!(!html.contains("On this page"));
    }

    #[test]
    fn renders_navigation() {
        let engine = TemplateEngine::new();

        let mut context = empty_context();
        context.nav = vec![
            NavItem {
                title: "Home".to_string(),
                path: "/".to_string(),
                children: vec![],
                active: true,
            },
            NavItem {
                title: "Comparisons".to_string(),
                path: "/comparisons/".to_string(),
                children: vec![NavItem {
                    title: "Data Fetching".to_string(),
                    path: "/comparisons/data-fetching/".to_string(),
                    children: vec![],
                    active: false,
                }],
                active: false,
            },
        ];

        let html = engine.render_page("doc.html", &context).unwrap();

        assert!(html.contains("Home"));
        assert!(html.contains("Comparisons"));
        assert!(html.contains("Data Fetching"));
    }
}
