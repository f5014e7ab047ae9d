//! Topic and action registries plus the [`Message`] value.
//!
//! Every topic owns an independent byte namespace for its actions. The
//! numeric codes are the wire contract: changing one is a breaking
//! protocol change. Codes are declared as explicit enum discriminants,
//! so assigning the same byte twice within a namespace fails to compile.
//!
//! Three kinds of wire codes never appear in a decoded [`Message`]:
//! the `*WithWriteAck` mutation variants and the `*Ack` subscription
//! variants are normalized to their base action with `is_write_ack` /
//! `is_ack` set, and the encoder re-derives the variant byte from those
//! flags.

use serde_json::Value;

/// Top-level protocol namespaces.
///
/// Bound to byte values in `[0, 127]`; bit 7 of the first frame byte is
/// the FIN flag, not part of the topic code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Topic {
    Parser = 0x00,
    Connection = 0x01,
    Auth = 0x02,
    Record = 0x03,
    Rpc = 0x04,
    Event = 0x05,
    Presence = 0x06,
}

impl Topic {
    /// Every topic, in registry order.
    pub const ALL: &'static [Topic] = &[
        Topic::Parser,
        Topic::Connection,
        Topic::Auth,
        Topic::Record,
        Topic::Rpc,
        Topic::Event,
        Topic::Presence,
    ];

    /// Wire byte of this topic.
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Resolve a wire byte to a topic.
    pub fn from_code(code: u8) -> Option<Topic> {
        match code {
            0x00 => Some(Topic::Parser),
            0x01 => Some(Topic::Connection),
            0x02 => Some(Topic::Auth),
            0x03 => Some(Topic::Record),
            0x04 => Some(Topic::Rpc),
            0x05 => Some(Topic::Event),
            0x06 => Some(Topic::Presence),
            _ => None,
        }
    }
}

/// Declares one topic's action namespace: the enum, its registry order,
/// code lookup in both directions, and the conversion into [`Action`].
///
/// Using the byte literals as both discriminants and match patterns
/// keeps the two directions in a single table per topic; a duplicate
/// byte is rejected by the compiler.
macro_rules! actions {
    (
        $(#[$outer:meta])*
        $name:ident => $topic:ident {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal,)+
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $code,)+
        }

        impl $name {
            /// Every action in this namespace, in registry order.
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Wire byte of this action.
            #[inline]
            pub const fn code(self) -> u8 {
                self as u8
            }

            /// Resolve a wire byte within this namespace.
            pub fn from_code(code: u8) -> Option<Self> {
                match code {
                    $($code => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl From<$name> for Action {
            #[inline]
            fn from(action: $name) -> Action {
                Action::$topic(action)
            }
        }
    };
}

actions! {
    /// Protocol-level errors produced by the decoder itself.
    ParserAction => Parser {
        UnknownTopic = 0x00,
        UnknownAction = 0x01,
        InvalidMessage = 0x02,
        MessageParseError = 0x03,
        MaximumMessageSizeExceeded = 0x04,
    }
}

actions! {
    /// Connection handshake and keepalive.
    ConnectionAction => Connection {
        Error = 0x00,
        Ping = 0x01,
        Pong = 0x02,
        Challenge = 0x03,
        ChallengeResponse = 0x04,
        Accept = 0x05,
        Reject = 0x06,
        Redirect = 0x07,
        Closing = 0x08,
        Closed = 0x09,
        AuthenticationTimeout = 0x0a,
    }
}

actions! {
    /// Authentication exchange.
    AuthAction => Auth {
        Error = 0x00,
        Request = 0x01,
        AuthSuccessful = 0x02,
        AuthUnsuccessful = 0x03,
        TooManyAuthAttempts = 0x04,
        MessagePermissionError = 0x60,
        MessageDenied = 0x61,
        InvalidMessageData = 0x62,
    }
}

actions! {
    /// Record replication. The `0x10..=0x19` block pairs each mutation
    /// with its write-acknowledgement variant on the adjacent odd byte.
    RecordAction => Record {
        Error = 0x00,
        Read = 0x01,
        ReadResponse = 0x02,
        Head = 0x03,
        HeadResponse = 0x04,
        Delete = 0x05,
        DeleteAck = 0x06,
        Deleted = 0x07,
        WriteAcknowledgement = 0x08,
        Create = 0x09,
        Has = 0x0a,
        HasResponse = 0x0b,
        CreateAndUpdate = 0x10,
        CreateAndUpdateWithWriteAck = 0x11,
        CreateAndPatch = 0x12,
        CreateAndPatchWithWriteAck = 0x13,
        Update = 0x14,
        UpdateWithWriteAck = 0x15,
        Patch = 0x16,
        PatchWithWriteAck = 0x17,
        Erase = 0x18,
        EraseWithWriteAck = 0x19,
        SubscribeAndHead = 0x20,
        SubscribeAndRead = 0x21,
        SubscribeCreateAndRead = 0x22,
        SubscribeCreateAndUpdate = 0x23,
        Subscribe = 0x28,
        SubscribeAck = 0x29,
        Unsubscribe = 0x2a,
        UnsubscribeAck = 0x2b,
        MultipleSubscriptions = 0x2c,
        NotSubscribed = 0x2d,
        Listen = 0x30,
        ListenAck = 0x31,
        Unlisten = 0x32,
        UnlistenAck = 0x33,
        SubscriptionForPatternFound = 0x34,
        SubscriptionForPatternRemoved = 0x35,
        ListenAccept = 0x36,
        ListenReject = 0x37,
        SubscriptionHasProvider = 0x38,
        SubscriptionHasNoProvider = 0x39,
        VersionExists = 0x40,
        CacheRetrievalTimeout = 0x41,
        StorageRetrievalTimeout = 0x42,
        RecordLoadError = 0x50,
        RecordCreateError = 0x51,
        RecordUpdateError = 0x52,
        RecordDeleteError = 0x53,
        RecordReadError = 0x54,
        RecordNotFound = 0x55,
        InvalidVersion = 0x56,
        InvalidPatchOnHotpath = 0x57,
        MessagePermissionError = 0x60,
        MessageDenied = 0x61,
        InvalidMessageData = 0x62,
    }
}

actions! {
    /// Remote procedure calls.
    RpcAction => Rpc {
        Error = 0x00,
        Request = 0x01,
        Accept = 0x02,
        Reject = 0x03,
        Response = 0x04,
        RequestError = 0x05,
        Provide = 0x06,
        ProvideAck = 0x07,
        Unprovide = 0x08,
        UnprovideAck = 0x09,
        MultipleResponse = 0x0a,
        ResponseTimeout = 0x0b,
        InvalidRpcCorrelationId = 0x0c,
        MultipleAccept = 0x0d,
        AcceptTimeout = 0x0e,
        NoRpcProvider = 0x0f,
        MultipleProviders = 0x10,
        NotProvided = 0x11,
        MessagePermissionError = 0x60,
        MessageDenied = 0x61,
        InvalidMessageData = 0x62,
    }
}

actions! {
    /// Event emission.
    EventAction => Event {
        Error = 0x00,
        Emit = 0x01,
        Subscribe = 0x28,
        SubscribeAck = 0x29,
        Unsubscribe = 0x2a,
        UnsubscribeAck = 0x2b,
        MultipleSubscriptions = 0x2c,
        NotSubscribed = 0x2d,
        Listen = 0x30,
        ListenAck = 0x31,
        Unlisten = 0x32,
        UnlistenAck = 0x33,
        SubscriptionForPatternFound = 0x34,
        SubscriptionForPatternRemoved = 0x35,
        ListenAccept = 0x36,
        ListenReject = 0x37,
        MessagePermissionError = 0x60,
        MessageDenied = 0x61,
        InvalidMessageData = 0x62,
    }
}

actions! {
    /// Presence tracking.
    ///
    /// The presence subscription actions are not the shared template:
    /// the request carries a correlation id and a user-list payload
    /// while the ack carries a single name.
    PresenceAction => Presence {
        Error = 0x00,
        QueryAll = 0x01,
        QueryAllResponse = 0x02,
        Query = 0x03,
        QueryResponse = 0x04,
        PresenceJoin = 0x05,
        PresenceLeave = 0x06,
        InvalidPresenceUsers = 0x07,
        Subscribe = 0x28,
        SubscribeAck = 0x29,
        Unsubscribe = 0x2a,
        UnsubscribeAck = 0x2b,
        MultipleSubscriptions = 0x2c,
        NotSubscribed = 0x2d,
        MessagePermissionError = 0x60,
        MessageDenied = 0x61,
        InvalidMessageData = 0x62,
    }
}

/// An action together with its owning topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Parser(ParserAction),
    Connection(ConnectionAction),
    Auth(AuthAction),
    Record(RecordAction),
    Rpc(RpcAction),
    Event(EventAction),
    Presence(PresenceAction),
}

impl Action {
    /// The topic owning this action's namespace.
    #[inline]
    pub const fn topic(self) -> Topic {
        match self {
            Action::Parser(_) => Topic::Parser,
            Action::Connection(_) => Topic::Connection,
            Action::Auth(_) => Topic::Auth,
            Action::Record(_) => Topic::Record,
            Action::Rpc(_) => Topic::Rpc,
            Action::Event(_) => Topic::Event,
            Action::Presence(_) => Topic::Presence,
        }
    }

    /// Wire byte of this action within its topic's namespace.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            Action::Parser(a) => a.code(),
            Action::Connection(a) => a.code(),
            Action::Auth(a) => a.code(),
            Action::Record(a) => a.code(),
            Action::Rpc(a) => a.code(),
            Action::Event(a) => a.code(),
            Action::Presence(a) => a.code(),
        }
    }

    /// Resolve a wire byte within the given topic's namespace.
    pub fn from_code(topic: Topic, code: u8) -> Option<Action> {
        match topic {
            Topic::Parser => ParserAction::from_code(code).map(Action::Parser),
            Topic::Connection => ConnectionAction::from_code(code).map(Action::Connection),
            Topic::Auth => AuthAction::from_code(code).map(Action::Auth),
            Topic::Record => RecordAction::from_code(code).map(Action::Record),
            Topic::Rpc => RpcAction::from_code(code).map(Action::Rpc),
            Topic::Event => EventAction::from_code(code).map(Action::Event),
            Topic::Presence => PresenceAction::from_code(code).map(Action::Presence),
        }
    }

    /// Every action of the given topic, in registry order.
    pub fn all_for(topic: Topic) -> Vec<Action> {
        match topic {
            Topic::Parser => ParserAction::ALL.iter().copied().map(Action::Parser).collect(),
            Topic::Connection => ConnectionAction::ALL
                .iter()
                .copied()
                .map(Action::Connection)
                .collect(),
            Topic::Auth => AuthAction::ALL.iter().copied().map(Action::Auth).collect(),
            Topic::Record => RecordAction::ALL.iter().copied().map(Action::Record).collect(),
            Topic::Rpc => RpcAction::ALL.iter().copied().map(Action::Rpc).collect(),
            Topic::Event => EventAction::ALL.iter().copied().map(Action::Event).collect(),
            Topic::Presence => PresenceAction::ALL
                .iter()
                .copied()
                .map(Action::Presence)
                .collect(),
        }
    }

    /// The write-acknowledgement variant of one of the five record
    /// mutation actions, `None` for everything else.
    pub const fn write_ack_variant(self) -> Option<Action> {
        let variant = match self {
            Action::Record(RecordAction::CreateAndPatch) => RecordAction::CreateAndPatchWithWriteAck,
            Action::Record(RecordAction::CreateAndUpdate) => {
                RecordAction::CreateAndUpdateWithWriteAck
            }
            Action::Record(RecordAction::Patch) => RecordAction::PatchWithWriteAck,
            Action::Record(RecordAction::Update) => RecordAction::UpdateWithWriteAck,
            Action::Record(RecordAction::Erase) => RecordAction::EraseWithWriteAck,
            _ => return None,
        };
        Some(Action::Record(variant))
    }

    /// Inverse of [`Action::write_ack_variant`].
    pub const fn write_ack_base(self) -> Option<Action> {
        let base = match self {
            Action::Record(RecordAction::CreateAndPatchWithWriteAck) => RecordAction::CreateAndPatch,
            Action::Record(RecordAction::CreateAndUpdateWithWriteAck) => {
                RecordAction::CreateAndUpdate
            }
            Action::Record(RecordAction::PatchWithWriteAck) => RecordAction::Patch,
            Action::Record(RecordAction::UpdateWithWriteAck) => RecordAction::Update,
            Action::Record(RecordAction::EraseWithWriteAck) => RecordAction::Erase,
            _ => return None,
        };
        Some(Action::Record(base))
    }

    /// True iff this is one of the five write-acknowledgement variant
    /// codes.
    #[inline]
    pub const fn is_write_ack_variant(self) -> bool {
        self.write_ack_base().is_some()
    }

    /// The `*_ACK` wire code acknowledging this action, if one exists.
    pub fn ack_variant(self) -> Option<Action> {
        match self {
            Action::Record(RecordAction::Subscribe) => Some(RecordAction::SubscribeAck.into()),
            Action::Record(RecordAction::Unsubscribe) => Some(RecordAction::UnsubscribeAck.into()),
            Action::Record(RecordAction::Listen) => Some(RecordAction::ListenAck.into()),
            Action::Record(RecordAction::Unlisten) => Some(RecordAction::UnlistenAck.into()),
            Action::Record(RecordAction::Delete) => Some(RecordAction::DeleteAck.into()),
            Action::Rpc(RpcAction::Provide) => Some(RpcAction::ProvideAck.into()),
            Action::Rpc(RpcAction::Unprovide) => Some(RpcAction::UnprovideAck.into()),
            Action::Event(EventAction::Subscribe) => Some(EventAction::SubscribeAck.into()),
            Action::Event(EventAction::Unsubscribe) => Some(EventAction::UnsubscribeAck.into()),
            Action::Event(EventAction::Listen) => Some(EventAction::ListenAck.into()),
            Action::Event(EventAction::Unlisten) => Some(EventAction::UnlistenAck.into()),
            Action::Presence(PresenceAction::Subscribe) => Some(PresenceAction::SubscribeAck.into()),
            Action::Presence(PresenceAction::Unsubscribe) => {
                Some(PresenceAction::UnsubscribeAck.into())
            }
            _ => None,
        }
    }

    /// Inverse of [`Action::ack_variant`]: the base action this `*_ACK`
    /// code acknowledges.
    pub fn ack_base(self) -> Option<Action> {
        match self {
            Action::Record(RecordAction::SubscribeAck) => Some(RecordAction::Subscribe.into()),
            Action::Record(RecordAction::UnsubscribeAck) => Some(RecordAction::Unsubscribe.into()),
            Action::Record(RecordAction::ListenAck) => Some(RecordAction::Listen.into()),
            Action::Record(RecordAction::UnlistenAck) => Some(RecordAction::Unlisten.into()),
            Action::Record(RecordAction::DeleteAck) => Some(RecordAction::Delete.into()),
            Action::Rpc(RpcAction::ProvideAck) => Some(RpcAction::Provide.into()),
            Action::Rpc(RpcAction::UnprovideAck) => Some(RpcAction::Unprovide.into()),
            Action::Event(EventAction::SubscribeAck) => Some(EventAction::Subscribe.into()),
            Action::Event(EventAction::UnsubscribeAck) => Some(EventAction::Unsubscribe.into()),
            Action::Event(EventAction::ListenAck) => Some(EventAction::Listen.into()),
            Action::Event(EventAction::UnlistenAck) => Some(EventAction::Unlisten.into()),
            Action::Presence(PresenceAction::SubscribeAck) => Some(PresenceAction::Subscribe.into()),
            Action::Presence(PresenceAction::UnsubscribeAck) => {
                Some(PresenceAction::Unsubscribe.into())
            }
            _ => None,
        }
    }

    /// Whether messages carrying this action code are errors. Implied by
    /// the action definition, not encoded on the wire.
    pub fn is_error_action(self) -> bool {
        match self {
            Action::Parser(_) => true,
            Action::Connection(a) => matches!(a, ConnectionAction::Error),
            Action::Auth(a) => matches!(
                a,
                AuthAction::Error
                    | AuthAction::MessagePermissionError
                    | AuthAction::MessageDenied
                    | AuthAction::InvalidMessageData
            ),
            Action::Record(a) => matches!(
                a,
                RecordAction::Error
                    | RecordAction::MultipleSubscriptions
                    | RecordAction::NotSubscribed
                    | RecordAction::RecordLoadError
                    | RecordAction::RecordCreateError
                    | RecordAction::RecordUpdateError
                    | RecordAction::RecordDeleteError
                    | RecordAction::RecordReadError
                    | RecordAction::RecordNotFound
                    | RecordAction::InvalidVersion
                    | RecordAction::InvalidPatchOnHotpath
                    | RecordAction::MessagePermissionError
                    | RecordAction::MessageDenied
                    | RecordAction::InvalidMessageData
            ),
            Action::Rpc(a) => matches!(
                a,
                RpcAction::Error
                    | RpcAction::MultipleProviders
                    | RpcAction::NotProvided
                    | RpcAction::MessagePermissionError
                    | RpcAction::MessageDenied
                    | RpcAction::InvalidMessageData
            ),
            Action::Event(a) => matches!(
                a,
                EventAction::Error
                    | EventAction::MultipleSubscriptions
                    | EventAction::NotSubscribed
                    | EventAction::MessagePermissionError
                    | EventAction::MessageDenied
                    | EventAction::InvalidMessageData
            ),
            Action::Presence(a) => matches!(
                a,
                PresenceAction::Error
                    | PresenceAction::MessagePermissionError
                    | PresenceAction::MessageDenied
                    | PresenceAction::InvalidMessageData
            ),
        }
    }
}

/// One logical protocol message.
///
/// Constructed by a handler immediately before encoding, or by the
/// decoder immediately after parsing a frame. `action` always holds the
/// base action; write-ack and ack wire variants surface as the
/// `is_write_ack` / `is_ack` flags instead.
///
/// # Example
///
/// ```
/// use topicwire::{Message, RecordAction};
/// use serde_json::json;
///
/// let update = Message {
///     name: Some("user/someId".into()),
///     version: Some(1),
///     parsed_data: Some(json!({ "firstname": "Wolfram" })),
///     ..Message::new(RecordAction::Update)
/// };
/// assert!(!update.is_write_ack);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub topic: Topic,
    pub action: Action,
    pub is_ack: bool,
    pub is_error: bool,
    pub is_write_ack: bool,
    pub name: Option<String>,
    pub version: Option<i64>,
    pub path: Option<String>,
    pub correlation_id: Option<String>,
    pub reason: Option<String>,
    pub url: Option<String>,
    pub subscription: Option<String>,
    pub parsed_data: Option<Value>,
}

impl Message {
    /// Create a message for the given action with no optional fields.
    ///
    /// `is_error` is derived from the action definition; combine with
    /// struct update syntax to set fields.
    pub fn new(action: impl Into<Action>) -> Message {
        let action = action.into();
        Message {
            topic: action.topic(),
            action,
            is_ack: false,
            is_error: action.is_error_action(),
            is_write_ack: false,
            name: None,
            version: None,
            path: None,
            correlation_id: None,
            reason: None,
            url: None,
            subscription: None,
            parsed_data: None,
        }
    }

    /// Same as [`Message::new`] with `is_ack` set.
    pub fn ack(action: impl Into<Action>) -> Message {
        Message {
            is_ack: true,
            ..Message::new(action)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_codes_roundtrip() {
        for &topic in Topic::ALL {
            assert_eq!(Topic::from_code(topic.code()), Some(topic));
        }
    }

    #[test]
    fn test_topic_codes_fit_in_seven_bits() {
        for &topic in Topic::ALL {
            assert!(topic.code() <= 0x7f);
        }
    }

    #[test]
    fn test_unknown_topic_byte() {
        assert_eq!(Topic::from_code(0x07), None);
        assert_eq!(Topic::from_code(0x7f), None);
    }

    #[test]
    fn test_action_codes_roundtrip_per_topic() {
        for &topic in Topic::ALL {
            for action in Action::all_for(topic) {
                assert_eq!(Action::from_code(topic, action.code()), Some(action));
                assert_eq!(action.topic(), topic);
            }
        }
    }

    #[test]
    fn test_unknown_action_byte() {
        assert_eq!(Action::from_code(Topic::Parser, 0xff), None);
        assert_eq!(Action::from_code(Topic::Connection, 0x62), None);
    }

    #[test]
    fn test_topics_reuse_action_bytes_independently() {
        // 0x01 means PING on CONNECTION but READ on RECORD.
        assert_eq!(
            Action::from_code(Topic::Connection, 0x01),
            Some(ConnectionAction::Ping.into())
        );
        assert_eq!(
            Action::from_code(Topic::Record, 0x01),
            Some(RecordAction::Read.into())
        );
    }

    #[test]
    fn test_write_ack_mapping_covers_exactly_five_actions() {
        let bases: Vec<Action> = Action::all_for(Topic::Record)
            .into_iter()
            .filter(|a| a.write_ack_variant().is_some())
            .collect();
        assert_eq!(
            bases,
            vec![
                RecordAction::CreateAndUpdate.into(),
                RecordAction::CreateAndPatch.into(),
                RecordAction::Update.into(),
                RecordAction::Patch.into(),
                RecordAction::Erase.into(),
            ]
        );
    }

    #[test]
    fn test_write_ack_bijection() {
        for &topic in Topic::ALL {
            for action in Action::all_for(topic) {
                if let Some(variant) = action.write_ack_variant() {
                    assert!(variant.is_write_ack_variant());
                    assert_eq!(variant.write_ack_base(), Some(action));
                    // A variant code is never itself a base code.
                    assert!(variant.write_ack_variant().is_none());
                } else if !action.is_write_ack_variant() {
                    assert_eq!(action.write_ack_base(), None);
                }
            }
        }
    }

    #[test]
    fn test_ack_mapping_is_inverse() {
        for &topic in Topic::ALL {
            for action in Action::all_for(topic) {
                if let Some(ack) = action.ack_variant() {
                    assert_eq!(ack.ack_base(), Some(action));
                    assert_eq!(ack.topic(), topic);
                }
                if let Some(base) = action.ack_base() {
                    assert_eq!(base.ack_variant(), Some(action));
                }
            }
        }
    }

    #[test]
    fn test_parser_actions_are_errors() {
        for &action in ParserAction::ALL {
            assert!(Action::Parser(action).is_error_action());
        }
    }

    #[test]
    fn test_message_new_derives_error_flag() {
        assert!(!Message::new(ConnectionAction::Ping).is_error);
        assert!(Message::new(RecordAction::MessageDenied).is_error);
        assert!(Message::new(ParserAction::UnknownTopic).is_error);
    }

    #[test]
    fn test_message_ack_constructor() {
        let msg = Message::ack(RecordAction::Subscribe);
        assert!(msg.is_ack);
        assert!(!msg.is_error);
        assert_eq!(msg.topic, Topic::Record);
    }
}
