//! Per-action field contracts.
//!
//! The schema is keyed by the wire action (ack and write-ack variants
//! included, since e.g. a PRESENCE SUBSCRIBE carries a correlation id
//! while its ack carries a name). It is authoritative in both
//! directions: the encoder emits only the declared meta fields, and the
//! decoder rejects frames whose key set differs from the declared one.

use crate::message::{
    Action, AuthAction, ConnectionAction, EventAction, ParserAction, PresenceAction, RecordAction,
    RpcAction,
};

/// Abbreviated meta keys of the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaKey {
    Name,
    Version,
    Path,
    CorrelationId,
    Reason,
    Url,
    Subscription,
}

impl MetaKey {
    /// All keys, in the fixed serialization order.
    pub const ALL: &'static [MetaKey] = &[
        MetaKey::Name,
        MetaKey::Version,
        MetaKey::Path,
        MetaKey::CorrelationId,
        MetaKey::Reason,
        MetaKey::Url,
        MetaKey::Subscription,
    ];

    /// The abbreviated JSON object key.
    pub const fn key(self) -> &'static str {
        match self {
            MetaKey::Name => "n",
            MetaKey::Version => "v",
            MetaKey::Path => "p",
            MetaKey::CorrelationId => "c",
            MetaKey::Reason => "r",
            MetaKey::Url => "u",
            MetaKey::Subscription => "s",
        }
    }
}

/// Which meta keys a frame may carry.
#[derive(Debug, Clone, Copy)]
pub enum MetaFields {
    /// Exactly this set of keys; anything extra or missing is a schema
    /// violation.
    Exact(&'static [MetaKey]),
    /// Any known key. Used for registry-only actions that have no
    /// canonical shape yet.
    Any,
}

/// Whether the action carries a payload section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    /// The payload section must be empty.
    None,
    /// The payload section, when present, is a JSON value (object,
    /// array or scalar depending on the action).
    Data,
}

/// The field contract of one wire action.
#[derive(Debug, Clone, Copy)]
pub struct MessageSchema {
    pub meta: MetaFields,
    pub payload: PayloadKind,
}

impl MessageSchema {
    /// Whether this schema allows the given meta key.
    pub fn declares(&self, key: MetaKey) -> bool {
        match self.meta {
            MetaFields::Exact(keys) => keys.contains(&key),
            MetaFields::Any => true,
        }
    }

    /// Whether this schema requires the given meta key.
    pub fn requires(&self, key: MetaKey) -> bool {
        match self.meta {
            MetaFields::Exact(keys) => keys.contains(&key),
            MetaFields::Any => false,
        }
    }
}

const fn exact(meta: &'static [MetaKey], payload: PayloadKind) -> MessageSchema {
    MessageSchema {
        meta: MetaFields::Exact(meta),
        payload,
    }
}

const EMPTY: MessageSchema = exact(&[], PayloadKind::None);
const DATA_ONLY: MessageSchema = exact(&[], PayloadKind::Data);
const NAME: MessageSchema = exact(&[MetaKey::Name], PayloadKind::None);
const NAME_DATA: MessageSchema = exact(&[MetaKey::Name], PayloadKind::Data);
const NAME_VERSION: MessageSchema = exact(&[MetaKey::Name, MetaKey::Version], PayloadKind::None);
const NAME_VERSION_DATA: MessageSchema =
    exact(&[MetaKey::Name, MetaKey::Version], PayloadKind::Data);
const NAME_VERSION_PATH: MessageSchema = exact(
    &[MetaKey::Name, MetaKey::Version, MetaKey::Path],
    PayloadKind::None,
);
const NAME_VERSION_PATH_DATA: MessageSchema = exact(
    &[MetaKey::Name, MetaKey::Version, MetaKey::Path],
    PayloadKind::Data,
);
const NAME_SUBSCRIPTION: MessageSchema = exact(
    &[MetaKey::Name, MetaKey::Subscription],
    PayloadKind::None,
);
const NAME_CORRELATION: MessageSchema = exact(
    &[MetaKey::Name, MetaKey::CorrelationId],
    PayloadKind::None,
);
const NAME_CORRELATION_DATA: MessageSchema = exact(
    &[MetaKey::Name, MetaKey::CorrelationId],
    PayloadKind::Data,
);
const NAME_CORRELATION_REASON: MessageSchema = exact(
    &[MetaKey::Name, MetaKey::CorrelationId, MetaKey::Reason],
    PayloadKind::None,
);
const CORRELATION_DATA: MessageSchema = exact(&[MetaKey::CorrelationId], PayloadKind::Data);
const REASON: MessageSchema = exact(&[MetaKey::Reason], PayloadKind::None);
const URL: MessageSchema = exact(&[MetaKey::Url], PayloadKind::None);

/// Registry-only actions have no canonical shape; accept any known meta
/// key and an optional payload.
const LENIENT: MessageSchema = MessageSchema {
    meta: MetaFields::Any,
    payload: PayloadKind::Data,
};

/// The field contract for a wire action. Total over the registries.
pub fn schema_of(action: Action) -> MessageSchema {
    match action {
        Action::Parser(a) => match a {
            ParserAction::UnknownTopic
            | ParserAction::UnknownAction
            | ParserAction::InvalidMessage => REASON,
            ParserAction::MessageParseError | ParserAction::MaximumMessageSizeExceeded => EMPTY,
        },
        Action::Connection(a) => match a {
            ConnectionAction::Ping
            | ConnectionAction::Pong
            | ConnectionAction::Challenge
            | ConnectionAction::Accept
            | ConnectionAction::Closing
            | ConnectionAction::Closed
            | ConnectionAction::AuthenticationTimeout => EMPTY,
            ConnectionAction::ChallengeResponse | ConnectionAction::Redirect => URL,
            ConnectionAction::Reject => REASON,
            ConnectionAction::Error => LENIENT,
        },
        Action::Auth(a) => match a {
            AuthAction::Request | AuthAction::AuthSuccessful => DATA_ONLY,
            AuthAction::AuthUnsuccessful | AuthAction::InvalidMessageData => REASON,
            AuthAction::TooManyAuthAttempts => EMPTY,
            AuthAction::MessagePermissionError | AuthAction::MessageDenied => NAME,
            AuthAction::Error => LENIENT,
        },
        Action::Record(a) => match a {
            RecordAction::Read
            | RecordAction::Head
            | RecordAction::Delete
            | RecordAction::DeleteAck
            | RecordAction::Deleted
            | RecordAction::SubscribeCreateAndRead
            | RecordAction::SubscriptionHasProvider
            | RecordAction::SubscriptionHasNoProvider
            | RecordAction::CacheRetrievalTimeout
            | RecordAction::StorageRetrievalTimeout
            | RecordAction::Subscribe
            | RecordAction::SubscribeAck
            | RecordAction::Unsubscribe
            | RecordAction::UnsubscribeAck
            | RecordAction::MultipleSubscriptions
            | RecordAction::NotSubscribed
            | RecordAction::Listen
            | RecordAction::ListenAck
            | RecordAction::Unlisten
            | RecordAction::UnlistenAck
            | RecordAction::MessagePermissionError
            | RecordAction::MessageDenied => NAME,
            RecordAction::HeadResponse => NAME_VERSION,
            RecordAction::ReadResponse
            | RecordAction::Update
            | RecordAction::UpdateWithWriteAck
            | RecordAction::CreateAndUpdate
            | RecordAction::CreateAndUpdateWithWriteAck
            | RecordAction::VersionExists => NAME_VERSION_DATA,
            RecordAction::Patch
            | RecordAction::PatchWithWriteAck
            | RecordAction::CreateAndPatch
            | RecordAction::CreateAndPatchWithWriteAck => NAME_VERSION_PATH_DATA,
            RecordAction::Erase | RecordAction::EraseWithWriteAck => NAME_VERSION_PATH,
            // Known asymmetry: the acknowledged versions and error data
            // ride in the payload section rather than meta.
            RecordAction::WriteAcknowledgement => NAME_DATA,
            RecordAction::SubscriptionForPatternFound
            | RecordAction::SubscriptionForPatternRemoved
            | RecordAction::ListenAccept
            | RecordAction::ListenReject => NAME_SUBSCRIPTION,
            RecordAction::Error
            | RecordAction::Create
            | RecordAction::Has
            | RecordAction::HasResponse
            | RecordAction::SubscribeAndHead
            | RecordAction::SubscribeAndRead
            | RecordAction::SubscribeCreateAndUpdate
            | RecordAction::RecordLoadError
            | RecordAction::RecordCreateError
            | RecordAction::RecordUpdateError
            | RecordAction::RecordDeleteError
            | RecordAction::RecordReadError
            | RecordAction::RecordNotFound
            | RecordAction::InvalidVersion
            | RecordAction::InvalidPatchOnHotpath
            | RecordAction::InvalidMessageData => LENIENT,
        },
        Action::Rpc(a) => match a {
            RpcAction::Request | RpcAction::Response => NAME_CORRELATION_DATA,
            RpcAction::RequestError => NAME_CORRELATION_REASON,
            RpcAction::Accept
            | RpcAction::Reject
            | RpcAction::MultipleResponse
            | RpcAction::ResponseTimeout
            | RpcAction::InvalidRpcCorrelationId
            | RpcAction::MultipleAccept
            | RpcAction::AcceptTimeout
            | RpcAction::NoRpcProvider => NAME_CORRELATION,
            RpcAction::Provide
            | RpcAction::ProvideAck
            | RpcAction::Unprovide
            | RpcAction::UnprovideAck
            | RpcAction::MessagePermissionError
            | RpcAction::MessageDenied => NAME,
            RpcAction::Error
            | RpcAction::MultipleProviders
            | RpcAction::NotProvided
            | RpcAction::InvalidMessageData => LENIENT,
        },
        Action::Event(a) => match a {
            EventAction::Emit => NAME_DATA,
            EventAction::Subscribe
            | EventAction::SubscribeAck
            | EventAction::Unsubscribe
            | EventAction::UnsubscribeAck
            | EventAction::MultipleSubscriptions
            | EventAction::NotSubscribed
            | EventAction::Listen
            | EventAction::ListenAck
            | EventAction::Unlisten
            | EventAction::UnlistenAck
            | EventAction::MessagePermissionError
            | EventAction::MessageDenied => NAME,
            EventAction::SubscriptionForPatternFound
            | EventAction::SubscriptionForPatternRemoved
            | EventAction::ListenAccept
            | EventAction::ListenReject => NAME_SUBSCRIPTION,
            EventAction::Error | EventAction::InvalidMessageData => LENIENT,
        },
        Action::Presence(a) => match a {
            PresenceAction::Subscribe
            | PresenceAction::Unsubscribe
            | PresenceAction::Query
            | PresenceAction::QueryResponse => CORRELATION_DATA,
            PresenceAction::SubscribeAck
            | PresenceAction::UnsubscribeAck
            | PresenceAction::PresenceJoin
            | PresenceAction::PresenceLeave
            | PresenceAction::MultipleSubscriptions
            | PresenceAction::NotSubscribed
            | PresenceAction::MessagePermissionError
            | PresenceAction::MessageDenied => NAME,
            PresenceAction::QueryAll => EMPTY,
            PresenceAction::QueryAllResponse => DATA_ONLY,
            PresenceAction::InvalidPresenceUsers => REASON,
            PresenceAction::Error | PresenceAction::InvalidMessageData => LENIENT,
        },
    }
}
