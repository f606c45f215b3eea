use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::ports::{registry::RegistryPort, statement::StatementPort};
use tower::Service;

use super::{DomainLogic, Error};

/// Appends every registered member to the statement sink.
pub struct ExportStatementRequest;

#[derive(Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    /// An empty registry writes nothing, not even a header.
    NothingToExport,
    Exported { members_written: usize },
}

#[derive(Debug, PartialEq, Eq)]
pub struct ExportStatementResponse {
    pub outcome: ExportOutcome,
}

impl<R, S> Service<ExportStatementRequest> for DomainLogic<R, S>
where
    R: RegistryPort + 'static,
    S: StatementPort + 'static,
{
    type Response = ExportStatementResponse;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: ExportStatementRequest) -> Self::Future {
        let registry = self.registry.clone();
        let statement = self.statement.clone();
        Box::pin(async move {
            let members = registry.list_members().await?;
            if members.is_empty() {
                return Ok(ExportStatementResponse {
                    outcome: ExportOutcome::NothingToExport,
                });
            }

            let members_written = members.len();
            statement.append_records(members).await?;

            tracing::info!(members_written, "statement exported");
            Ok(ExportStatementResponse {
                outcome: ExportOutcome::Exported { members_written },
            })
        })
    }
}
