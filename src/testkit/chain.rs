//! Mock [`ChainClient`] for testing.
//!
//! Deployments get sequential addresses (`0x…01`, `0x…02`, …). Settings
//! live in a map; unset flags read as `false` and unset pointers as the
//! zero address. Every deploy and write is recorded for assertions.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use alloy_primitives::Address;
use async_trait::async_trait;

use crate::domain::{Setting, SettingValue};
use crate::error::ChainError;
use crate::port::{ChainClient, DeployRequest, Deployment};

/// A recorded setting write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Write {
    pub contract: Address,
    pub setting: Setting,
    pub value: SettingValue,
}

#[derive(Default)]
struct State {
    deployments: Vec<(DeployRequest, Deployment)>,
    writes: Vec<Write>,
    settings: HashMap<(Address, Setting), SettingValue>,
    reads: usize,
    fail_deploy: Option<ChainError>,
    fail_write: Option<ChainError>,
}

/// In-memory chain client.
#[derive(Default)]
pub struct MockChainClient {
    state: Mutex<State>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every deployment fail with `error`.
    pub fn failing_deploys(self, error: ChainError) -> Self {
        self.lock().fail_deploy = Some(error);
        self
    }

    /// Make every setting write fail with `error`.
    pub fn failing_writes(self, error: ChainError) -> Self {
        self.lock().fail_write = Some(error);
        self
    }

    /// Seed the on-chain value of a setting.
    pub fn set(&self, contract: Address, setting: Setting, value: SettingValue) {
        self.lock().settings.insert((contract, setting), value);
    }

    /// Current value of a setting as a read would return it.
    pub fn value(&self, contract: Address, setting: &Setting) -> SettingValue {
        Self::current(&self.lock(), contract, setting)
    }

    /// Names of deployed contracts, in deployment order.
    pub fn deployed_names(&self) -> Vec<String> {
        self.lock()
            .deployments
            .iter()
            .map(|(request, _)| request.name.clone())
            .collect()
    }

    pub fn deployments(&self) -> Vec<(DeployRequest, Deployment)> {
        self.lock().deployments.clone()
    }

    pub fn writes(&self) -> Vec<Write> {
        self.lock().writes.clone()
    }

    pub fn read_count(&self) -> usize {
        self.lock().reads
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn current(state: &State, contract: Address, setting: &Setting) -> SettingValue {
        state
            .settings
            .get(&(contract, *setting))
            .copied()
            .unwrap_or(if setting.is_flag() {
                SettingValue::Flag(false)
            } else {
                SettingValue::Address(Address::ZERO)
            })
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn deploy(&self, request: &DeployRequest) -> Result<Deployment, ChainError> {
        let mut state = self.lock();
        if let Some(error) = &state.fail_deploy {
            return Err(error.clone());
        }

        let n = state.deployments.len() + 1;
        let byte = u8::try_from(n)
            .map_err(|_| ChainError::Submission("mock address space exhausted".into()))?;
        let deployment = Deployment {
            address: Address::with_last_byte(byte),
            tx_hash: format!("0x{n:064x}"),
        };
        state.deployments.push((request.clone(), deployment.clone()));
        Ok(deployment)
    }

    async fn read_setting(
        &self,
        contract: Address,
        setting: &Setting,
    ) -> Result<SettingValue, ChainError> {
        let mut state = self.lock();
        state.reads += 1;
        Ok(Self::current(&state, contract, setting))
    }

    async fn write_setting(
        &self,
        contract: Address,
        setting: &Setting,
        value: &SettingValue,
    ) -> Result<String, ChainError> {
        let mut state = self.lock();
        if let Some(error) = &state.fail_write {
            return Err(error.clone());
        }
        if setting.is_flag() != matches!(value, SettingValue::Flag(_)) {
            return Err(ChainError::SettingMismatch {
                setting: setting.to_string(),
                value: value.to_string(),
            });
        }

        state.settings.insert((contract, *setting), *value);
        state.writes.push(Write {
            contract,
            setting: *setting,
            value: *value,
        });
        Ok(format!("0x{:064x}", 0x1000 + state.writes.len()))
    }

    fn network_name(&self) -> &str {
        "mock"
    }
}
