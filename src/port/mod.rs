//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │   Orchestrator, Linker  │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌──────────┐           ┌─────────────┐              ┌───────────┐
//! │ Artifact │           │  Registry   │              │   Chain   │
//! │ Resolver │           │  (SQLite)   │              │   (EVM)   │
//! └──────────┘           └─────────────┘              └───────────┘
//! ```

pub mod outbound;

pub use outbound::artifact::ArtifactResolver;
pub use outbound::chain::{ChainClient, DeployRequest, Deployment};
pub use outbound::registry::ContractRegistry;
