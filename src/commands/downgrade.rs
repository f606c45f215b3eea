use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{Member, MemberId},
    ports::registry::RegistryPort,
};
use tower::Service;

use super::{DomainLogic, Error};

/// Converts a premium member to a regular one.
///
/// This is not an in-place type change: the premium record is reverted,
/// removed from the registry, and a freshly constructed regular record
/// carrying the identity fields takes its place.
pub struct DowngradeToRegularRequest {
    pub member_id: MemberId,
    /// Referral source recorded on the replacement regular record.
    pub referral_source: String,
}

#[derive(Debug, PartialEq)]
pub struct DowngradeToRegularResponse {
    /// The replacement record: active, Basic plan, no progress.
    pub member: Member,
}

impl<R, S> Service<DowngradeToRegularRequest> for DomainLogic<R, S>
where
    R: RegistryPort + 'static,
{
    type Response = DowngradeToRegularResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: DowngradeToRegularRequest) -> Self::Future {
        let registry = self.registry.clone();
        Box::pin(async move {
            let mut member = registry.get_member(req.member_id).await?;

            // Also rejects regular members with a tier error.
            member.revert_premium()?;

            let removed = registry.remove_member(req.member_id).await?;
            let member = Member::new_regular(removed.id, removed.profile, req.referral_source);
            registry.insert_member(member.clone()).await?;

            tracing::info!(member_id = member.id, "premium member downgraded to regular");
            Ok(DowngradeToRegularResponse { member })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        adapters::registry::memory::MemoryRegistry,
        domain::{LoyaltyPolicy, MemberKind, MemberProfile, Plan, TierError},
        ports::statement::MockStatementPort,
    };
    use rstest::*;
    use speculoos::prelude::*;
    use std::sync::Arc;
    use tower::{BoxError, ServiceExt};

    #[fixture]
    fn profile() -> MemberProfile {
        MemberProfile {
            name: "Asha Rai".to_string(),
            location: "Kathmandu".to_string(),
            phone: "9841000000".to_string(),
            email: "asha@example.com".to_string(),
            gender: "Female".to_string(),
            date_of_birth: "1994-03-12".to_string(),
            membership_start_date: "2024-01-01".to_string(),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn test_downgrade_preserves_identity(profile: MemberProfile) -> Result<(), BoxError> {
        // GIVEN a premium member with attendance and a partial payment
        let policy = LoyaltyPolicy::default();
        let registry = MemoryRegistry::default();
        let mut member = Member::new_premium(2, profile.clone(), "Bikash Gurung");
        for _ in 0..4 {
            member.mark_attendance(&policy);
        }
        member.pay_due(10_000.0).unwrap();
        registry.insert_member(member).await?;
        let mut domain = DomainLogic {
            registry: Arc::new(registry.clone()),
            statement: Arc::new(MockStatementPort::new()),
            policy,
        };

        // WHEN downgrading to regular
        let res = domain
            .ready()
            .await?
            .call(DowngradeToRegularRequest {
                member_id: 2,
                referral_source: "Premium downgrade".to_string(),
            })
            .await;

        // THEN the stored record is a fresh regular member with the same
        // identity and no carried-over progress
        assert_that!(res).is_ok();
        let stored = registry.get_member(2).await?;
        assert_that!(stored.profile).is_equal_to(profile);
        assert_that!(stored.active).is_true();
        assert_that!(stored.attendance_count).is_equal_to(0);
        assert_that!(stored.loyalty_points()).is_equal_to(0.0);
        let MemberKind::Regular(details) = &stored.kind else {
            panic!("expected a regular member");
        };
        assert_that!(details.plan).is_equal_to(Plan::Basic);
        assert_that!(details.referral_source.as_str()).is_equal_to("Premium downgrade");

        Ok(())
    }

    #[rstest]
    #[tokio::test]
    async fn test_downgrade_regular_member_rejected(
        profile: MemberProfile,
    ) -> Result<(), BoxError> {
        // GIVEN a regular member
        let registry = MemoryRegistry::default();
        registry
            .insert_member(Member::new_regular(1, profile, "Walk-in"))
            .await?;
        let mut domain = DomainLogic {
            registry: Arc::new(registry.clone()),
            statement: Arc::new(MockStatementPort::new()),
            policy: Default::default(),
        };

        // WHEN attempting a downgrade
        let res = domain
            .ready()
            .await?
            .call(DowngradeToRegularRequest {
                member_id: 1,
                referral_source: "Premium downgrade".to_string(),
            })
            .await;

        // THEN the tier mismatch is surfaced and the record is untouched
        assert_that!(res)
            .is_err()
            .matches(|err| matches!(err, Error::Tier(TierError::NotPremium(1))));
        let stored = registry.get_member(1).await?;
        assert_that!(stored.active).is_true();

        Ok(())
    }
}
