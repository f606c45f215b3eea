use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{MemberId, MemberKind, Plan, TierError, UpgradeOutcome},
    ports::registry::RegistryPort,
};
use tower::Service;

use super::{DomainLogic, Error};

pub struct UpgradePlanRequest {
    pub member_id: MemberId,
    /// Requested plan name; matched case-insensitively.
    pub new_plan: String,
}

/// Classified result of an upgrade request.
///
/// The attendance gate runs here, before the member's own eligibility
/// check: the two thresholds coincide under the default policy but are
/// enforced independently.
#[derive(Clone, Debug, PartialEq)]
pub enum UpgradePlanOutcome {
    AttendanceBelowMinimum { required: u32, current: u32 },
    NotEligible,
    AlreadyOnPlan(Plan),
    InvalidPlan(String),
    Upgraded { plan: Plan, price: f64 },
}

impl From<UpgradeOutcome> for UpgradePlanOutcome {
    fn from(outcome: UpgradeOutcome) -> Self {
        match outcome {
            UpgradeOutcome::NotEligible => UpgradePlanOutcome::NotEligible,
            UpgradeOutcome::AlreadyOnPlan(plan) => UpgradePlanOutcome::AlreadyOnPlan(plan),
            UpgradeOutcome::InvalidPlan(name) => UpgradePlanOutcome::InvalidPlan(name),
            UpgradeOutcome::Upgraded { plan, price } => UpgradePlanOutcome::Upgraded { plan, price },
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct UpgradePlanResponse {
    pub member_id: MemberId,
    pub outcome: UpgradePlanOutcome,
}

impl<R, S> Service<UpgradePlanRequest> for DomainLogic<R, S>
where
    R: RegistryPort + 'static,
{
    type Response = UpgradePlanResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: UpgradePlanRequest) -> Self::Future {
        let registry = self.registry.clone();
        let policy = self.policy;
        Box::pin(async move {
            let mut member = registry.get_member(req.member_id).await?;

            if !matches!(member.kind, MemberKind::Regular(_)) {
                return Err(TierError::NotRegular(req.member_id).into());
            }
            if member.attendance_count < policy.upgrade_attendance_threshold {
                return Ok(UpgradePlanResponse {
                    member_id: req.member_id,
                    outcome: UpgradePlanOutcome::AttendanceBelowMinimum {
                        required: policy.upgrade_attendance_threshold,
                        current: member.attendance_count,
                    },
                });
            }

            let outcome = member.upgrade_plan(&req.new_plan)?;
            if let UpgradeOutcome::Upgraded { plan, .. } = &outcome {
                let plan = plan.name();
                registry.update_member(member).await?;
                tracing::info!(member_id = req.member_id, plan, "plan upgraded");
            }

            Ok(UpgradePlanResponse {
                member_id: req.member_id,
                outcome: outcome.into(),
            })
        })
    }
}
