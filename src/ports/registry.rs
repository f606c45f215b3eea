use crate::domain::{Member, MemberId};

/// Storage for member records, keyed by id and insertion-ordered.
///
/// Implementations return clones, so callers never hold an aliased
/// reference into the stored record; mutations go through
/// [`update_member`](RegistryPort::update_member) as a whole-record
/// replacement.
#[mockall::automock]
#[async_trait::async_trait]
pub trait RegistryPort {
    /// Adds a new member. The id must not be registered yet.
    async fn insert_member(&self, member: Member) -> Result<(), Error>;
    async fn get_member(&self, member_id: MemberId) -> Result<Member, Error>;
    /// Replaces the stored record with the same id.
    async fn update_member(&self, member: Member) -> Result<(), Error>;
    /// Removes and returns a member record.
    async fn remove_member(&self, member_id: MemberId) -> Result<Member, Error>;
    /// All members in insertion order.
    async fn list_members(&self) -> Result<Vec<Member>, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Domain-level error when an id is already registered
    #[error("member id {0} is already registered")]
    DuplicateId(MemberId),

    /// Domain-level error when a member does not exist
    #[error("member {0} does not exist")]
    MemberNotFound(MemberId),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
