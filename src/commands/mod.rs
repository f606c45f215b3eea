use crate::domain::LoyaltyPolicy;
use std::{borrow::Cow, sync::Arc};

pub mod downgrade;
pub mod enroll;
pub mod export_statement;
pub mod mark_attendance;
pub mod pay_due;
pub mod revert;
pub mod set_status;
pub mod upgrade_plan;

/// Entry point for every membership action.
///
/// One [`tower::Service`] implementation exists per user-driven action;
/// all of them run against the same registry and statement ports.
pub struct DomainLogic<R, S> {
    registry: Arc<R>,
    statement: Arc<S>,
    policy: LoyaltyPolicy,
}

impl<R, S> DomainLogic<R, S> {
    pub fn new(registry: Arc<R>, statement: Arc<S>) -> Self {
        Self {
            registry,
            statement,
            policy: LoyaltyPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LoyaltyPolicy) -> Self {
        self.policy = policy;
        self
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("registry port error: {0:?}")]
    Registry(#[from] crate::ports::registry::Error),
    #[error("statement port error: {0:?}")]
    Statement(#[from] crate::ports::statement::Error),
    #[error("tier mismatch: {0}")]
    Tier(#[from] crate::domain::TierError),

    #[error("invalid state")]
    InvalidState(Cow<'static, str>),
}
