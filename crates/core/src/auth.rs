//! Authorization collaborator seam.
//!
//! Administrative operations (parameter updates, manual triggers) are gated
//! by a capability check, independent of any caller-identity mechanism.

use elastic_types::{RebaseError, RebaseResult};

/// Capability check for administrative operations.
pub trait Authorizer {
    fn is_authorized(&self, caller: &str) -> bool;
}

/// Single fixed administrator.
#[derive(Debug, Clone)]
pub struct SingleAdmin {
    admin: String,
}

impl SingleAdmin {
    pub fn new(admin: impl Into<String>) -> Self {
        Self {
            admin: admin.into(),
        }
    }
}

impl Authorizer for SingleAdmin {
    fn is_authorized(&self, caller: &str) -> bool {
        caller == self.admin
    }
}

pub(crate) fn ensure_authorized(auth: &dyn Authorizer, caller: &str) -> RebaseResult<()> {
    if auth.is_authorized(caller) {
        Ok(())
    } else {
        Err(RebaseError::Unauthorized)
    }
}
