use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{AttendanceOutcome, MemberId},
    ports::registry::RegistryPort,
};
use tower::Service;

use super::{DomainLogic, Error};

pub struct MarkAttendanceRequest {
    pub member_id: MemberId,
}

#[derive(Debug, PartialEq)]
pub struct MarkAttendanceResponse {
    pub member_id: MemberId,
    pub outcome: AttendanceOutcome,
}

impl<R, S> Service<MarkAttendanceRequest> for DomainLogic<R, S>
where
    R: RegistryPort + 'static,
{
    type Response = MarkAttendanceResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: MarkAttendanceRequest) -> Self::Future {
        let registry = self.registry.clone();
        let policy = self.policy;
        Box::pin(async move {
            let mut member = registry.get_member(req.member_id).await?;

            let outcome = member.mark_attendance(&policy);

            // Inactive members are left untouched; nothing to persist.
            if let AttendanceOutcome::Marked {
                attendance_count, ..
            } = outcome
            {
                registry.update_member(member).await?;
                tracing::debug!(
                    member_id = req.member_id,
                    attendance_count,
                    "attendance marked"
                );
            }

            Ok(MarkAttendanceResponse {
                member_id: req.member_id,
                outcome,
            })
        })
    }
}
