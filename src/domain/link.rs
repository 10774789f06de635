//! On-chain settings that wire deployed contracts together.

use std::fmt;

use alloy_primitives::Address;

use crate::domain::contract::ContractHandle;

/// A single on-chain setting that can be read and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// ERC-721 public mint toggle.
    PublicMint,
    /// ERC-721 burn toggle.
    Burn,
    /// Marketplace allow-list entry for a token contract.
    AllowedContract(Address),
    /// Escrow vendor flag for a token contract.
    Vendor(Address),
    /// Moments/Reels flag for a case contract.
    CaseContract(Address),
    /// Moments pointer held by a case.
    MomentsContract,
    /// Reels pointer held by a case.
    ReelsContract,
}

impl Setting {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Setting::PublicMint => "publicMintEnabled",
            Setting::Burn => "burnEnabled",
            Setting::AllowedContract(_) => "allowedContract",
            Setting::Vendor(_) => "vendorStatus",
            Setting::CaseContract(_) => "caseContract",
            Setting::MomentsContract => "momentsContract",
            Setting::ReelsContract => "reelsContract",
        }
    }

    /// Whether the setting holds a flag rather than an address.
    #[must_use]
    pub const fn is_flag(&self) -> bool {
        !matches!(self, Setting::MomentsContract | Setting::ReelsContract)
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::AllowedContract(addr)
            | Setting::Vendor(addr)
            | Setting::CaseContract(addr) => write!(f, "{}({addr})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}

/// Value held by a [`Setting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingValue {
    Flag(bool),
    Address(Address),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Flag(flag) => write!(f, "{flag}"),
            SettingValue::Address(addr) => write!(f, "{addr}"),
        }
    }
}

/// Result of reconciling one setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome {
    /// A transaction was submitted and confirmed.
    Applied { tx_hash: String },
    /// On-chain state already matched; nothing was sent.
    AlreadySet,
}

impl LinkOutcome {
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, LinkOutcome::Applied { .. })
    }
}

/// Desired state of one setting on one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Contract the setting lives on.
    pub contract: ContractHandle,
    /// Name of the other side, for error reporting.
    pub counterpart: String,
    pub setting: Setting,
    pub desired: SettingValue,
}

impl Link {
    #[must_use]
    pub fn public_mint(contract: &ContractHandle, enabled: bool) -> Self {
        Self::flag(contract, contract.name.clone(), Setting::PublicMint, enabled)
    }

    #[must_use]
    pub fn burn(contract: &ContractHandle, enabled: bool) -> Self {
        Self::flag(contract, contract.name.clone(), Setting::Burn, enabled)
    }

    #[must_use]
    pub fn allowed_contract(
        marketplace: &ContractHandle,
        token: &ContractHandle,
        allowed: bool,
    ) -> Self {
        Self::flag(
            marketplace,
            token.name.clone(),
            Setting::AllowedContract(token.address),
            allowed,
        )
    }

    #[must_use]
    pub fn vendor(escrow: &ContractHandle, token: &ContractHandle, status: bool) -> Self {
        Self::flag(
            escrow,
            token.name.clone(),
            Setting::Vendor(token.address),
            status,
        )
    }

    /// Flag `case` on a moments or reels contract.
    #[must_use]
    pub fn case_contract(target: &ContractHandle, case: &ContractHandle, status: bool) -> Self {
        Self::flag(
            target,
            case.name.clone(),
            Setting::CaseContract(case.address),
            status,
        )
    }

    #[must_use]
    pub fn moments_contract(case: &ContractHandle, moments: &ContractHandle) -> Self {
        Self {
            contract: case.clone(),
            counterpart: moments.name.clone(),
            setting: Setting::MomentsContract,
            desired: SettingValue::Address(moments.address),
        }
    }

    #[must_use]
    pub fn reels_contract(case: &ContractHandle, reels: &ContractHandle) -> Self {
        Self {
            contract: case.clone(),
            counterpart: reels.name.clone(),
            setting: Setting::ReelsContract,
            desired: SettingValue::Address(reels.address),
        }
    }

    fn flag(contract: &ContractHandle, counterpart: String, setting: Setting, value: bool) -> Self {
        Self {
            contract: contract.clone(),
            counterpart,
            setting,
            desired: SettingValue::Flag(value),
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} = {}", self.contract.name, self.setting, self.desired)
    }
}
