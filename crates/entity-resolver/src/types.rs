//! Core types for the tiered matcher.

use serde::{Deserialize, Serialize};

/// One strategy in the matching ladder, attempted only if all prior tiers
/// fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    /// Exact primary-label match.
    ExactLabel,
    /// Label match after folding accented vowels on both sides.
    FoldedLabel,
    /// Query slug contained in the card's navigational target.
    SlugHref,
}

impl MatchTier {
    pub fn name(&self) -> &'static str {
        match self {
            MatchTier::ExactLabel => "exact-label",
            MatchTier::FoldedLabel => "folded-label",
            MatchTier::SlugHref => "slug-href",
        }
    }

    /// All tiers in strict fallback order.
    pub fn fallback_chain() -> Vec<MatchTier> {
        vec![
            MatchTier::ExactLabel,
            MatchTier::FoldedLabel,
            MatchTier::SlugHref,
        ]
    }
}

/// Snapshot of one rendered card, collected fresh per resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardFacts {
    /// Primary display label.
    pub label: String,
    /// Navigational target (href) of the card's link, when present.
    pub nav_target: Option<String>,
}

impl CardFacts {
    pub fn new(label: impl Into<String>, nav_target: Option<String>) -> Self {
        Self {
            label: label.into(),
            nav_target,
        }
    }
}

/// A successful resolution: index into the snapshot, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub index: usize,
    /// Tier that produced the match.
    pub tier: MatchTier,
}
