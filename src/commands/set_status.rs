use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{domain::MemberId, ports::registry::RegistryPort};
use tower::Service;

use super::{DomainLogic, Error};

pub struct SetStatusRequest {
    pub member_id: MemberId,
    /// `true` activates the membership, `false` deactivates it.
    pub active: bool,
}

#[derive(Debug, PartialEq)]
pub struct SetStatusResponse {
    pub member_id: MemberId,
    pub active: bool,
    /// `false` when the membership was already in the requested state,
    /// so callers can present an "already active" style notice.
    pub changed: bool,
}

impl<R, S> Service<SetStatusRequest> for DomainLogic<R, S>
where
    R: RegistryPort + 'static,
{
    type Response = SetStatusResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: SetStatusRequest) -> Self::Future {
        let registry = self.registry.clone();
        Box::pin(async move {
            let mut member = registry.get_member(req.member_id).await?;

            let changed = member.active != req.active;
            if changed {
                if req.active {
                    member.activate();
                } else {
                    member.deactivate();
                }
                registry.update_member(member).await?;
                tracing::info!(
                    member_id = req.member_id,
                    active = req.active,
                    "membership status changed"
                );
            }

            Ok(SetStatusResponse {
                member_id: req.member_id,
                active: req.active,
                changed,
            })
        })
    }
}
