use crate::{
    domain::{Member, MemberId},
    ports::registry::{Error, RegistryPort},
};
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory member registry.
///
/// Members are kept in insertion order, matching the order records appear
/// in an exported statement.
#[derive(Clone, Debug)]
pub struct MemoryRegistry {
    members: Arc<Mutex<Vec<Member>>>,
}

#[async_trait::async_trait]
impl RegistryPort for MemoryRegistry {
    async fn insert_member(&self, member: Member) -> Result<(), Error> {
        let mut members = self.members.lock()?;
        if members.iter().any(|m| m.id == member.id) {
            return Err(Error::DuplicateId(member.id));
        }
        members.push(member);
        Ok(())
    }

    async fn get_member(&self, member_id: MemberId) -> Result<Member, Error> {
        self.members
            .lock()?
            .iter()
            .find(|m| m.id == member_id)
            .cloned()
            .ok_or(Error::MemberNotFound(member_id))
    }

    async fn update_member(&self, member: Member) -> Result<(), Error> {
        let mut members = self.members.lock()?;
        let Some(stored) = members.iter_mut().find(|m| m.id == member.id) else {
            return Err(Error::MemberNotFound(member.id));
        };
        *stored = member;
        Ok(())
    }

    async fn remove_member(&self, member_id: MemberId) -> Result<Member, Error> {
        let mut members = self.members.lock()?;
        let Some(position) = members.iter().position(|m| m.id == member_id) else {
            return Err(Error::MemberNotFound(member_id));
        };
        Ok(members.remove(position))
    }

    async fn list_members(&self) -> Result<Vec<Member>, Error> {
        Ok(self.members.lock()?.clone())
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self {
            members: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

/// We need to create a custom `From` implementation here for an error that's specific to this
/// adapter.
impl<T> From<PoisonError<T>> for Error {
    fn from(err: PoisonError<T>) -> Self {
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
