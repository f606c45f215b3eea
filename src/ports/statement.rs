use crate::domain::Member;

/// Sink for the fixed-width member statement.
#[mockall::automock]
#[async_trait::async_trait]
pub trait StatementPort {
    /// Appends one record per member, writing the column header first when
    /// the sink holds nothing yet.
    async fn append_records(&self, members: Vec<Member>) -> Result<(), Error>;
    /// Raw statement lines for display. No rehydration into members.
    async fn read_lines(&self) -> Result<Vec<String>, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No statement has been written yet
    #[error("no member statement has been written yet")]
    NoStatement,

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
