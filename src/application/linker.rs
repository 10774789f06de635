//! Read-then-write reconciliation of cross-contract settings.
//!
//! Every setter reads the current on-chain value first and only submits a
//! transaction when it differs from the desired one. A failed link aborts
//! the sequence it belongs to; links already applied are not rolled back.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::{ContractHandle, ContractKind, Link, LinkOutcome};
use crate::error::{ChainError, Error, Result};
use crate::port::ChainClient;

/// Applies [`Link`]s through a chain client.
pub struct Linker {
    chain: Arc<dyn ChainClient>,
}

/// Tally of a sequence of applied links.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkSummary {
    pub applied: usize,
    pub already_set: usize,
}

impl LinkSummary {
    pub fn record(&mut self, outcome: &LinkOutcome) {
        if outcome.is_applied() {
            self.applied += 1;
        } else {
            self.already_set += 1;
        }
    }

    pub fn absorb(&mut self, other: LinkSummary) {
        self.applied += other.applied;
        self.already_set += other.already_set;
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.applied + self.already_set
    }
}

impl Linker {
    #[must_use]
    pub fn new(chain: Arc<dyn ChainClient>) -> Self {
        Self { chain }
    }

    /// Reconcile one setting.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Link`] naming both contracts when the read or the
    /// write fails.
    pub async fn apply(&self, link: &Link) -> Result<LinkOutcome> {
        let current = self
            .chain
            .read_setting(link.contract.address, &link.setting)
            .await
            .map_err(|source| Self::failed(link, source))?;

        if current == link.desired {
            debug!(
                component = "linker",
                method = "apply",
                link = %link,
                "Setting already matches"
            );
            return Ok(LinkOutcome::AlreadySet);
        }

        let tx_hash = self
            .chain
            .write_setting(link.contract.address, &link.setting, &link.desired)
            .await
            .map_err(|source| Self::failed(link, source))?;

        info!(
            component = "linker",
            method = "apply",
            link = %link,
            previous = %current,
            tx_hash = %tx_hash,
            "Setting applied"
        );
        Ok(LinkOutcome::Applied { tx_hash })
    }

    /// Apply links in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`Error::Link`] encountered.
    pub async fn apply_all(&self, links: &[Link]) -> Result<LinkSummary> {
        let mut summary = LinkSummary::default();
        for link in links {
            let outcome = self.apply(link).await?;
            summary.record(&outcome);
        }
        Ok(summary)
    }

    pub async fn set_public_mint(
        &self,
        token: &ContractHandle,
        enabled: bool,
    ) -> Result<LinkOutcome> {
        self.apply(&Link::public_mint(token, enabled)).await
    }

    pub async fn set_burn(&self, token: &ContractHandle, enabled: bool) -> Result<LinkOutcome> {
        self.apply(&Link::burn(token, enabled)).await
    }

    pub async fn set_allowed_contract(
        &self,
        marketplace: &ContractHandle,
        token: &ContractHandle,
        allowed: bool,
    ) -> Result<LinkOutcome> {
        self.apply(&Link::allowed_contract(marketplace, token, allowed))
            .await
    }

    pub async fn set_vendor_status(
        &self,
        escrow: &ContractHandle,
        token: &ContractHandle,
        status: bool,
    ) -> Result<LinkOutcome> {
        self.apply(&Link::vendor(escrow, token, status)).await
    }

    /// Flag `case` on a moments or reels contract.
    pub async fn set_case_contract(
        &self,
        target: &ContractHandle,
        case: &ContractHandle,
        status: bool,
    ) -> Result<LinkOutcome> {
        self.apply(&Link::case_contract(target, case, status)).await
    }

    pub async fn set_moments_contract(
        &self,
        case: &ContractHandle,
        moments: &ContractHandle,
    ) -> Result<LinkOutcome> {
        self.apply(&Link::moments_contract(case, moments)).await
    }

    pub async fn set_reels_contract(
        &self,
        case: &ContractHandle,
        reels: &ContractHandle,
    ) -> Result<LinkOutcome> {
        self.apply(&Link::reels_contract(case, reels)).await
    }

    fn failed(link: &Link, source: ChainError) -> Error {
        error!(
            component = "linker",
            method = "apply",
            link = %link,
            error = %source,
            "Link failed"
        );
        Error::Link {
            contract: link.contract.name.clone(),
            counterpart: link.counterpart.clone(),
            source,
        }
    }
}

/// Allow-list entry for `token` on a marketplace of the given kind.
///
/// `MarketplaceERC721Escrow_v1` keeps an allowed-contract list; the other
/// marketplaces track vendors.
#[must_use]
pub fn marketplace_entry(
    kind: ContractKind,
    marketplace: &ContractHandle,
    token: &ContractHandle,
    allowed: bool,
) -> Link {
    match kind {
        ContractKind::MarketplaceErc721EscrowV1 => {
            Link::allowed_contract(marketplace, token, allowed)
        }
        _ => Link::vendor(marketplace, token, allowed),
    }
}
