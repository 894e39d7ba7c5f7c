//! Heuristic enrichment of textbook chunks — keyword matching, regex
//! parsing, and scoring tables in place of any model inference.

pub mod category;
pub mod concepts;
pub mod enhance;
pub mod enricher;
pub mod frontmatter;
pub mod heading;
pub mod keywords;
pub mod summary;

pub use category::{map_category, DEFAULT_CATEGORY};
pub use enhance::{enhance_chunk, Enhancement};
pub use enricher::{enrich_row, FALLBACK_CHAPTER};
pub use frontmatter::is_front_matter;
pub use heading::HeadingPath;
pub use keywords::{clean_keywords, MAX_KEYWORDS};
pub use summary::{generate_summary, MAX_SUMMARY_WORDS};
