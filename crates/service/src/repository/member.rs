//! Member directory port and in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::MemberId;
use domain::Member;

use crate::error::Result;

/// Trait for member lookup and storage.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Finds a member by ID. Returns `None` when no such member exists.
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>>;

    /// Saves a member, replacing any existing entry with the same ID.
    async fn save(&self, member: Member) -> Result<()>;
}

/// In-memory member directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemberRepository {
    members: Arc<RwLock<HashMap<MemberId, Member>>>,
}

impl InMemoryMemberRepository {
    /// Creates a new empty member directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored members.
    pub fn member_count(&self) -> usize {
        self.members.read().unwrap().len()
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>> {
        Ok(self.members.read().unwrap().get(&id).cloned())
    }

    async fn save(&self, member: Member) -> Result<()> {
        self.members.write().unwrap().insert(member.id(), member);
        Ok(())
    }
}
