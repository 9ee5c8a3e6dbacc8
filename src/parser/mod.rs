//! Structure-recovery engine: turns the unstructured paragraph/table stream of
//! one statute or judicial-interpretation document into a canonical Markdown
//! line sequence with a consistent heading hierarchy.
//!
//! Everything here is synchronous and per-document: the only state shared
//! between documents is the read-only [`PatternCatalog`].

mod assemble;
mod description;
mod normalize;
mod outline;
mod patterns;
mod table;
#[cfg(test)]
mod tests;
mod toc;

pub use assemble::{INFO_END, NoContentExtracted, assemble_document};
pub use description::extract_description;
pub use normalize::normalize_line;
pub use outline::{OutlinedLine, assign_headings};
pub use patterns::{PatternCatalog, PatternKind};
pub use table::{TABLE_END, TABLE_START, render_row, render_separator, render_table};
pub use toc::filter_content;
