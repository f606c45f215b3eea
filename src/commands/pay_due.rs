use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::{MemberId, PaymentOutcome},
    ports::registry::RegistryPort,
};
use tower::Service;

use super::{DomainLogic, Error};

pub struct PayDueRequest {
    pub member_id: MemberId,
    pub amount: f64,
}

#[derive(Debug, PartialEq)]
pub struct PayDueResponse {
    pub member_id: MemberId,
    pub outcome: PaymentOutcome,
}

impl<R, S> Service<PayDueRequest> for DomainLogic<R, S>
where
    R: RegistryPort + 'static,
{
    type Response = PayDueResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: PayDueRequest) -> Self::Future {
        let registry = self.registry.clone();
        Box::pin(async move {
            let mut member = registry.get_member(req.member_id).await?;

            let outcome = member.pay_due(req.amount)?;

            // Rejected payments leave the stored record untouched.
            if let PaymentOutcome::Accepted {
                remaining,
                full_payment,
                ..
            } = outcome
            {
                registry.update_member(member).await?;
                tracing::info!(
                    member_id = req.member_id,
                    amount = req.amount,
                    remaining,
                    full_payment,
                    "payment received"
                );
            }

            Ok(PayDueResponse {
                member_id: req.member_id,
                outcome,
            })
        })
    }
}
