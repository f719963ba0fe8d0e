//! Membership registry.
//!
//! # Invariants
//! - E-mails are unique case-insensitively; adding a duplicate is a no-op.
//! - Member ids are unique. A replacement list repeating an id is rejected.
//! - Removing the last admin is allowed; no lockout guard is applied.

use crate::error::{BoardError, BoardResult, ValidationError};
use crate::model::member::{Member, MemberId, Role};
use std::collections::HashSet;

/// Outcome of adding a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberAddition {
    Added(MemberId),
    /// E-mail already present; carries the existing member id.
    Existing(MemberId),
}

impl MemberAddition {
    pub fn member_id(self) -> MemberId {
        match self {
            Self::Added(id) | Self::Existing(id) => id,
        }
    }

    pub fn is_added(self) -> bool {
        matches!(self, Self::Added(_))
    }
}

/// Ordered list of board members.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipRegistry {
    members: Vec<Member>,
}

impl MembershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from existing records, keeping the first record
    /// per id and per e-mail and dropping blank e-mails.
    pub fn from_members(members: Vec<Member>) -> Self {
        let mut registry = Self::new();
        for member in members {
            if member.email.trim().is_empty()
                || registry.get(member.id).is_some()
                || registry.find_by_email(&member.email).is_some()
            {
                continue;
            }
            registry.members.push(member);
        }
        registry
    }

    /// Adds a member with a fresh id.
    ///
    /// # Errors
    /// - `ValidationError::EmptyEmail` when the trimmed e-mail is empty.
    pub fn add_member(
        &mut self,
        email: &str,
        role: Role,
    ) -> Result<MemberAddition, ValidationError> {
        let trimmed = email.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyEmail);
        }

        if let Some(existing) = self.find_by_email(trimmed) {
            return Ok(MemberAddition::Existing(existing.id));
        }

        let member = Member::new(trimmed, role);
        let id = member.id;
        self.members.push(member);
        Ok(MemberAddition::Added(id))
    }

    /// Overwrites a member's role.
    pub fn set_role(&mut self, id: MemberId, role: Role) -> BoardResult<()> {
        let member = self
            .members
            .iter_mut()
            .find(|member| member.id == id)
            .ok_or(BoardError::MemberNotFound(id))?;
        member.role = role;
        Ok(())
    }

    /// Removes a member and returns the removed record.
    pub fn remove_member(&mut self, id: MemberId) -> BoardResult<Member> {
        let index = self
            .members
            .iter()
            .position(|member| member.id == id)
            .ok_or(BoardError::MemberNotFound(id))?;
        Ok(self.members.remove(index))
    }

    /// Replaces the whole list, as a saved share dialog does.
    ///
    /// Validates every record first; duplicates by e-mail keep the first.
    ///
    /// # Errors
    /// - `ValidationError::EmptyEmail` for a blank e-mail.
    /// - `ValidationError::DuplicateMemberId` when two records share an id.
    pub fn replace_members(&mut self, members: Vec<Member>) -> Result<(), ValidationError> {
        if members.iter().any(|member| member.email.trim().is_empty()) {
            return Err(ValidationError::EmptyEmail);
        }
        let mut ids = HashSet::with_capacity(members.len());
        if let Some(repeated) = members.iter().find(|member| !ids.insert(member.id)) {
            return Err(ValidationError::DuplicateMemberId(repeated.id));
        }
        let trimmed = members
            .into_iter()
            .map(|member| Member {
                email: member.email.trim().to_string(),
                ..member
            })
            .collect();
        *self = Self::from_members(trimmed);
        Ok(())
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    pub fn find_by_email(&self, email: &str) -> Option<&Member> {
        self.members.iter().find(|member| member.has_email(email))
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn admin_count(&self) -> usize {
        self.members
            .iter()
            .filter(|member| member.role == Role::Admin)
            .count()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
