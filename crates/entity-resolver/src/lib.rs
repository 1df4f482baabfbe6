//! Entity resolution by display name.
//!
//! The rendered collection offers no stable identifier for domain entities,
//! names may carry locale accents the caller omits (or vice versa), and the
//! collection can reorder, grow or shrink between reads. Resolution runs a
//! tiered matching ladder over a fresh snapshot of the render on every
//! call:
//!
//! 1. Exact label match in render order.
//! 2. Accent-folded label match.
//! 3. URL-safe slug of the query as a substring of the navigational target.

pub mod errors;
pub mod normalize;
pub mod resolver;
pub mod types;

pub use errors::ResolveError;
pub use resolver::{resolve_by_name, CollectionSelectors, EntityResolver};
pub use types::{CardFacts, MatchTier, Resolution};
