//! Static site generator for tandem comparison docs.
//!
//! Builds a static documentation site from Markdown/MDX pages with
//! side-by-side framework comparison panels and per-page tables of contents.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{render_markdown, BuildConfig, BuildError, BuildResult, StaticBuilder};
