//! Deployment domain: contract kinds, records, plans and links.

pub mod artifact;
pub mod collection;
pub mod container;
pub mod contract;
pub mod environment;
pub mod link;
pub mod plan;

pub use artifact::Artifact;
pub use collection::CollectionConfig;
pub use container::ContractContainer;
pub use contract::{ContractHandle, ContractKind, ContractRecord, ContractType, NewContractRecord};
pub use environment::{ActiveEnvironment, Client, EnvTier, TokenIds};
pub use link::{Link, LinkOutcome, Setting, SettingValue};
pub use plan::{ArtifactLocation, ConstructorArgs, DeployPlan};
