use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{MemberId, MemberKind},
    ports::registry::RegistryPort,
};
use tower::Service;

use super::{DomainLogic, Error};

pub struct RevertMemberRequest {
    pub member_id: MemberId,
    /// Required for regular members; ignored for premium members.
    pub removal_reason: Option<String>,
}

#[derive(Debug, PartialEq)]
pub struct RevertMemberResponse {
    pub member_id: MemberId,
}

impl<R, S> Service<RevertMemberRequest> for DomainLogic<R, S>
where
    R: RegistryPort + 'static,
{
    type Response = RevertMemberResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: RevertMemberRequest) -> Self::Future {
        let registry = self.registry.clone();
        Box::pin(async move {
            let mut member = registry.get_member(req.member_id).await?;

            match member.kind {
                MemberKind::Regular(_) => {
                    // The domain does not police the reason; this layer does.
                    let reason = req
                        .removal_reason
                        .as_deref()
                        .map(str::trim)
                        .filter(|reason| !reason.is_empty())
                        .ok_or(Error::InvalidState(
                            "a removal reason is required to revert a regular member".into(),
                        ))?;
                    member.revert_regular(reason)?;
                }
                MemberKind::Premium(_) => member.revert_premium()?,
            }

            registry.update_member(member).await?;
            tracing::info!(member_id = req.member_id, "membership reverted");

            Ok(RevertMemberResponse {
                member_id: req.member_id,
            })
        })
    }
}
