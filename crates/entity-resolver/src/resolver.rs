//! Tiered by-name resolution with fallback ladder orchestration.

use std::sync::Arc;

use tracing::{debug, warn};
use url::Url;

use driver_port::{DriverPort, ElementHandle, Selector};

use crate::errors::ResolveError;
use crate::normalize::{canon, fold_accents, slugify};
use crate::types::{CardFacts, MatchTier, Resolution};

/// Resolve a name against a snapshot of the rendered collection.
///
/// Tiers run in strict order; the first match wins, and ties within a tier
/// resolve to the first card in render order.
pub fn resolve_by_name(cards: &[CardFacts], name: &str) -> Result<Resolution, ResolveError> {
    for tier in MatchTier::fallback_chain() {
        debug!(tier = tier.name(), query = name, "trying match tier");
        if let Some(index) = match_tier(tier, cards, name) {
            debug!(
                tier = tier.name(),
                query = name,
                index,
                label = %cards[index].label,
                "entity resolved"
            );
            return Ok(Resolution { index, tier });
        }
    }
    Err(ResolveError::not_found(name))
}

fn match_tier(tier: MatchTier, cards: &[CardFacts], name: &str) -> Option<usize> {
    match tier {
        MatchTier::ExactLabel => {
            let query = canon(name);
            cards.iter().position(|card| canon(&card.label) == query)
        }
        MatchTier::FoldedLabel => {
            let query = fold_accents(&canon(name));
            cards
                .iter()
                .position(|card| fold_accents(&canon(&card.label)) == query)
        }
        MatchTier::SlugHref => {
            let slug = slugify(name);
            if slug.is_empty() {
                return None;
            }
            cards.iter().position(|card| {
                card.nav_target
                    .as_deref()
                    .map(|target| nav_path(target).to_lowercase().contains(&slug))
                    .unwrap_or(false)
            })
        }
    }
}

/// Path component of a navigational target; relative targets pass through.
fn nav_path(target: &str) -> String {
    match Url::parse(target) {
        Ok(url) => url.path().to_string(),
        Err(_) => target.to_string(),
    }
}

/// Selectors describing one rendered collection of entity cards.
#[derive(Clone, Debug)]
pub struct CollectionSelectors {
    /// Selector for the card containers.
    pub card: Selector,
    /// Label element inside a card.
    pub label: Selector,
    /// Link element inside a card carrying the navigational target.
    pub link: Selector,
}

/// Snapshots a rendered collection and runs the tier ladder over it.
///
/// A resolved handle is valid only for the current render; the resolver
/// re-collects on every call and callers must not cache indices across a
/// mutating action.
pub struct EntityResolver {
    port: Arc<dyn DriverPort>,
    selectors: CollectionSelectors,
}

impl EntityResolver {
    pub fn new(port: Arc<dyn DriverPort>, selectors: CollectionSelectors) -> Self {
        Self { port, selectors }
    }

    /// Snapshot the current render: card handles with their facts.
    ///
    /// Cards whose label cannot be read are skipped rather than failing the
    /// whole snapshot; the collection may be mid-render.
    pub async fn collect(&self) -> Result<Vec<(ElementHandle, CardFacts)>, ResolveError> {
        let handles = self.port.locate_all(&self.selectors.card).await?;
        let mut cards = Vec::with_capacity(handles.len());
        for handle in handles {
            let label = match self.label_of(&handle).await {
                Ok(label) => label,
                Err(err) => {
                    debug!(card = %handle, error = %err, "skipping unreadable card");
                    continue;
                }
            };
            let nav_target = self.nav_target_of(&handle).await;
            cards.push((handle, CardFacts::new(label, nav_target)));
        }
        Ok(cards)
    }

    /// Resolve `name` against the current render and return the card's
    /// fresh handle together with the winning tier.
    pub async fn resolve(
        &self,
        name: &str,
    ) -> Result<(ElementHandle, Resolution), ResolveError> {
        let cards = self.collect().await?;
        let facts: Vec<CardFacts> = cards.iter().map(|(_, f)| f.clone()).collect();
        let resolution = resolve_by_name(&facts, name)?;
        if resolution.tier != MatchTier::ExactLabel {
            warn!(
                query = name,
                tier = resolution.tier.name(),
                "entity resolved through fallback tier"
            );
        }
        let (handle, _) = cards.into_iter().nth(resolution.index).expect("index from resolution");
        Ok((handle, resolution))
    }

    /// Number of cards in the current render.
    pub async fn count(&self) -> Result<usize, ResolveError> {
        Ok(self.port.locate_all(&self.selectors.card).await?.len())
    }

    async fn label_of(&self, card: &ElementHandle) -> Result<String, ResolveError> {
        let label = self.port.locate_within(card, &self.selectors.label).await?;
        Ok(self.port.text(&label).await?.trim().to_string())
    }

    async fn nav_target_of(&self, card: &ElementHandle) -> Option<String> {
        let link = self
            .port
            .locate_within(card, &self.selectors.link)
            .await
            .ok()?;
        self.port.attribute(&link, "href").await.ok().flatten()
    }
}
