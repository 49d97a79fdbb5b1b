//! Side-by-side comparison assembly for tandem docs.
//!
//! This crate turns `left`/`right` tagged code blocks into two-column
//! comparison panels: pairing blocks in document order, rendering panel
//! HTML, and splicing panels into page markdown.

pub mod html;
pub mod pairing;
pub mod panel;
pub mod splice;

pub use html::render_panel;
pub use pairing::{pair_blocks, PairingIssue};
pub use panel::{CompareLabels, ComparePanel};
pub use splice::{inject_panels, splice_panels};
