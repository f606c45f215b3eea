use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{Member, MemberId, MemberProfile},
    ports::registry::RegistryPort,
};
use tower::Service;

use super::{DomainLogic, Error};

pub struct EnrollMemberRequest {
    pub member_id: MemberId,
    pub profile: MemberProfile,
    pub tier: EnrollmentTier,
}

pub enum EnrollmentTier {
    /// Starts on the Basic plan.
    Regular { referral_source: String },
    /// Carries the fixed premium charge and a trainer assignment.
    Premium { personal_trainer: String },
}

#[derive(Debug, PartialEq)]
pub struct EnrollMemberResponse {
    /// The freshly stored record.
    pub member: Member,
}

impl<R, S> Service<EnrollMemberRequest> for DomainLogic<R, S>
where
    R: RegistryPort + 'static,
{
    type Response = EnrollMemberResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: EnrollMemberRequest) -> Self::Future {
        let registry = self.registry.clone();
        Box::pin(async move {
            let member = match req.tier {
                EnrollmentTier::Regular { referral_source } => {
                    Member::new_regular(req.member_id, req.profile, referral_source)
                }
                EnrollmentTier::Premium { personal_trainer } => {
                    Member::new_premium(req.member_id, req.profile, personal_trainer)
                }
            };

            // The registry enforces id uniqueness; a duplicate id surfaces
            // as a registry error.
            registry.insert_member(member.clone()).await?;

            tracing::info!(
                member_id = member.id,
                tier = member.kind.tier_name(),
                "member enrolled"
            );
            Ok(EnrollMemberResponse { member })
        })
    }
}
