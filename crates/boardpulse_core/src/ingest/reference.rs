//! List and member lookup tables built once per board.
//!
//! # Invariants
//! - List names are stored lower-cased; duplicate list ids keep the last name.
//! - Duplicate member ids keep the last profile at the first id's position.
//! - Profiles are shared (`Arc`) with every task that references them.

use crate::model::raw::{RawBoard, RawMember};
use crate::model::task::{derive_initials, MemberProfile};
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup tables used while normalizing cards.
#[derive(Debug, Clone, Default)]
pub struct ReferenceMaps {
    lists: HashMap<String, String>,
    members: Vec<Arc<MemberProfile>>,
    member_index: HashMap<String, usize>,
}

impl ReferenceMaps {
    /// Builds both maps from a validated board.
    pub fn build(board: &RawBoard) -> Self {
        let lists = board
            .lists
            .iter()
            .map(|list| (list.id.clone(), list.name.to_lowercase()))
            .collect();

        let mut members: Vec<Arc<MemberProfile>> = Vec::with_capacity(board.members.len());
        let mut member_index = HashMap::with_capacity(board.members.len());
        for raw in &board.members {
            let profile = Arc::new(member_profile(raw));
            match member_index.get(&raw.id) {
                Some(&position) => members[position] = profile,
                None => {
                    member_index.insert(raw.id.clone(), members.len());
                    members.push(profile);
                }
            }
        }

        Self {
            lists,
            members,
            member_index,
        }
    }

    /// Lower-cased list name for `list_id`, if the board declares it.
    pub fn list_name(&self, list_id: &str) -> Option<&str> {
        self.lists.get(list_id).map(String::as_str)
    }

    /// Known profile for `member_id`.
    pub fn member(&self, member_id: &str) -> Option<&Arc<MemberProfile>> {
        self.member_index
            .get(member_id)
            .map(|&position| &self.members[position])
    }

    /// Known profile for `member_id`, or a fresh unknown-user placeholder.
    pub fn resolve_member(&self, member_id: &str) -> Arc<MemberProfile> {
        self.member(member_id)
            .cloned()
            .unwrap_or_else(|| Arc::new(MemberProfile::unknown(member_id)))
    }

    /// Board members in board order.
    pub fn members(&self) -> &[Arc<MemberProfile>] {
        &self.members
    }

    /// Consumes the maps, keeping only the ordered member profiles.
    pub fn into_members(self) -> Vec<Arc<MemberProfile>> {
        self.members
    }
}

fn member_profile(raw: &RawMember) -> MemberProfile {
    let full_name = raw
        .full_name
        .clone()
        .unwrap_or_else(|| raw.username.clone());
    let initials = raw
        .initials
        .clone()
        .unwrap_or_else(|| derive_initials(&full_name));

    MemberProfile {
        id: raw.id.clone(),
        full_name,
        username: raw.username.clone(),
        initials,
    }
}
