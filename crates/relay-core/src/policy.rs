use crate::{
    domain::{LanguagePair, OwnerId, UserId},
    messaging::types::{ChatKind, MemberStatus, MembershipChange},
};

/// Process-scoped policy inputs, built once from `Config` at startup.
#[derive(Clone, Debug)]
pub struct Policy {
    pub owner: OwnerId,
    pub languages: LanguagePair,
}

// ============== Message access ==============

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Allowed,
    /// Private chat with someone other than the owner: tell them, once.
    RejectPrivate,
    /// Anything else that is not allowed: no reply at all.
    Ignore,
}

/// Groups and supergroups are open; private chats only for the owner.
pub fn message_access(kind: &ChatKind, sender: Option<UserId>, owner: &OwnerId) -> Access {
    if kind.is_group() {
        return Access::Allowed;
    }
    match kind {
        ChatKind::Private if sender.is_some_and(|id| owner.matches(id)) => Access::Allowed,
        ChatKind::Private => Access::RejectPrivate,
        _ => Access::Ignore,
    }
}

// ============== Membership ==============

/// True when the bot was just added as a plain member by someone other than the owner.
pub fn should_leave(change: &MembershipChange, owner: &OwnerId) -> bool {
    change.new_status == MemberStatus::Member
        && change.subject_is_bot
        && !owner.matches(change.actor)
}
