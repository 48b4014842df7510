//! Nullable thread factory — deterministic deployments, primable failures.

use std::sync::Mutex;
use weft_governance::ThreadFactory;
use weft_types::{MemberAddress, ThreadVariant};

struct Inner {
    deployed: Vec<MemberAddress>,
    validate_failure: Option<String>,
    deploy_failure: Option<String>,
}

/// A factory that "deploys" threads at predictable addresses
/// (`weft_thread0000`, `weft_thread0001`, ...) and never runs real code.
pub struct NullFactory {
    inner: Mutex<Inner>,
}

impl NullFactory {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                deployed: Vec::new(),
                validate_failure: None,
                deploy_failure: None,
            }),
        }
    }

    /// Make every subsequent `validate` call fail with `reason`.
    pub fn fail_validation(&self, reason: &str) {
        self.inner.lock().unwrap().validate_failure = Some(reason.to_owned());
    }

    /// Make every subsequent `deploy` call fail with `reason`.
    pub fn fail_deployment(&self, reason: &str) {
        self.inner.lock().unwrap().deploy_failure = Some(reason.to_owned());
    }

    /// Addresses deployed so far, in order.
    pub fn deployed(&self) -> Vec<MemberAddress> {
        self.inner.lock().unwrap().deployed.clone()
    }
}

impl Default for NullFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ThreadFactory for NullFactory {
    fn validate(&self, _variant: ThreadVariant, _config: &[u8]) -> Result<(), String> {
        match &self.inner.lock().unwrap().validate_failure {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }

    fn deploy(
        &self,
        _variant: ThreadVariant,
        _leader: &MemberAddress,
        _name: &str,
        _symbol: &str,
        _config: &[u8],
    ) -> Result<MemberAddress, String> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(reason) = &inner.deploy_failure {
            return Err(reason.clone());
        }
        let address = MemberAddress::new(format!("weft_thread{:04}", inner.deployed.len()));
        inner.deployed.push(address.clone());
        Ok(address)
    }
}
