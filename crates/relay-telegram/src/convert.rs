//! teloxide types -> `relay-core` inbound updates (polling path).

use teloxide::types::{Chat, ChatMemberStatus, ChatMemberUpdated, Message};

use relay_core::{
    domain::{ChatId, MessageId, UserId},
    messaging::types::{ChatKind, InboundUpdate, IncomingMessage, MemberStatus, MembershipChange},
};

pub fn chat_kind(chat: &Chat) -> ChatKind {
    if chat.is_private() {
        ChatKind::Private
    } else if chat.is_supergroup() {
        ChatKind::Supergroup
    } else if chat.is_group() {
        ChatKind::Group
    } else {
        ChatKind::Channel
    }
}

pub fn member_status(status: ChatMemberStatus) -> MemberStatus {
    match status {
        ChatMemberStatus::Owner => MemberStatus::Creator,
        ChatMemberStatus::Administrator => MemberStatus::Administrator,
        ChatMemberStatus::Member => MemberStatus::Member,
        ChatMemberStatus::Restricted => MemberStatus::Restricted,
        ChatMemberStatus::Left => MemberStatus::Left,
        ChatMemberStatus::Banned => MemberStatus::Kicked,
    }
}

pub fn from_message(msg: &Message) -> InboundUpdate {
    InboundUpdate::Message(IncomingMessage {
        chat_id: ChatId(msg.chat.id.0),
        chat_kind: chat_kind(&msg.chat),
        sender: msg.from().map(|u| UserId(u.id.0 as i64)),
        message_id: MessageId(msg.id.0),
        text: msg.text().map(str::to_string),
    })
}

pub fn from_member_update(upd: &ChatMemberUpdated) -> InboundUpdate {
    InboundUpdate::MembershipChange(MembershipChange {
        chat_id: ChatId(upd.chat.id.0),
        actor: UserId(upd.from.id.0 as i64),
        new_status: member_status(upd.new_chat_member.status()),
        subject_is_bot: upd.new_chat_member.user.is_bot,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn message(chat: Value, extra: Value) -> Message {
        let mut raw = json!({"message_id": 77, "date": 1700000000, "chat": chat});
        for (k, v) in extra.as_object().unwrap() {
            raw[k] = v.clone();
        }
        serde_json::from_value(raw).unwrap()
    }

    fn user(id: u64, is_bot: bool) -> Value {
        json!({"id": id, "is_bot": is_bot, "first_name": "A"})
    }

    fn member_update(actor: u64, status: &str, subject_is_bot: bool) -> ChatMemberUpdated {
        serde_json::from_value(json!({
            "chat": {"id": -500, "type": "group", "title": "G"},
            "from": user(actor, false),
            "date": 0,
            "old_chat_member": {"user": user(99, subject_is_bot), "status": "left"},
            "new_chat_member": {"user": user(99, subject_is_bot), "status": status}
        }))
        .unwrap()
    }

    #[test]
    fn supergroup_text_message_is_normalized() {
        let msg = message(
            json!({"id": -1001, "type": "supergroup", "title": "G"}),
            json!({"from": user(7, false), "text": "Hello"}),
        );

        assert_eq!(
            from_message(&msg),
            InboundUpdate::Message(IncomingMessage {
                chat_id: ChatId(-1001),
                chat_kind: ChatKind::Supergroup,
                sender: Some(UserId(7)),
                message_id: MessageId(77),
                text: Some("Hello".to_string()),
            })
        );
    }

    #[test]
    fn private_and_group_chats_are_told_apart() {
        let private = message(
            json!({"id": 5, "type": "private", "first_name": "A"}),
            json!({"from": user(5, false), "text": "hi"}),
        );
        assert_eq!(chat_kind(&private.chat), ChatKind::Private);

        let group = message(
            json!({"id": -5, "type": "group", "title": "G"}),
            json!({"from": user(5, false), "text": "hi"}),
        );
        assert_eq!(chat_kind(&group.chat), ChatKind::Group);
        assert!(chat_kind(&group.chat).is_group());
    }

    #[test]
    fn message_without_sender_has_no_sender() {
        let msg = message(
            json!({"id": -1001, "type": "supergroup", "title": "G"}),
            json!({
                "sender_chat": {"id": -1001, "type": "supergroup", "title": "G"},
                "text": "anonymous admin"
            }),
        );

        let InboundUpdate::Message(incoming) = from_message(&msg) else {
            panic!("expected message");
        };
        assert_eq!(incoming.sender, None);
        assert_eq!(incoming.text(), Some("anonymous admin"));
    }

    #[test]
    fn message_without_text_keeps_text_absent() {
        let msg = message(
            json!({"id": -5, "type": "group", "title": "G"}),
            json!({"from": user(7, false), "location": {"longitude": 1.0, "latitude": 2.0}}),
        );

        let InboundUpdate::Message(incoming) = from_message(&msg) else {
            panic!("expected message");
        };
        assert_eq!(incoming.sender, Some(UserId(7)));
        assert_eq!(incoming.text, None);
    }

    #[test]
    fn member_update_carries_actor_and_bot_flag() {
        assert_eq!(
            from_member_update(&member_update(7, "member", true)),
            InboundUpdate::MembershipChange(MembershipChange {
                chat_id: ChatId(-500),
                actor: UserId(7),
                new_status: MemberStatus::Member,
                subject_is_bot: true,
            })
        );

        let InboundUpdate::MembershipChange(change) =
            from_member_update(&member_update(42, "left", false))
        else {
            panic!("expected membership change");
        };
        assert_eq!(change.actor, UserId(42));
        assert_eq!(change.new_status, MemberStatus::Left);
        assert!(!change.subject_is_bot);
    }

    #[test]
    fn maps_every_member_status() {
        assert_eq!(member_status(ChatMemberStatus::Owner), MemberStatus::Creator);
        assert_eq!(
            member_status(ChatMemberStatus::Administrator),
            MemberStatus::Administrator
        );
        assert_eq!(member_status(ChatMemberStatus::Member), MemberStatus::Member);
        assert_eq!(
            member_status(ChatMemberStatus::Restricted),
            MemberStatus::Restricted
        );
        assert_eq!(member_status(ChatMemberStatus::Left), MemberStatus::Left);
        assert_eq!(member_status(ChatMemberStatus::Banned), MemberStatus::Kicked);
    }
}
