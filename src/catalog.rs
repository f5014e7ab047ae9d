//! Canonical message catalog.
//!
//! One fixture per supported action/variant: the logical [`Message`]
//! and its exact wire frame. Frames are assembled by hand from literal
//! JSON text, independently of the encoder, so the catalog doubles as
//! living documentation of the protocol and as the oracle for the
//! round-trip tests. Actions that exist in the numeric registry but
//! have no canonical example carry an explicit [`CatalogSlot::RegistryOnly`]
//! slot, so "no example" is a typed state rather than a gap.
//!
//! The subscription, listen, permission-error and generic-error
//! families share one argument shape across topics; they are emitted by
//! parameterized builders invoked once per owning topic, which keeps
//! the shared shape from drifting.
//!
//! The catalog is immutable once built and is not consulted by the
//! encoder or decoder at runtime.

use serde_json::json;

use crate::message::{
    Action, AuthAction, ConnectionAction, EventAction, Message, ParserAction, PresenceAction,
    RecordAction, RpcAction, Topic,
};

/// A canonical (message, frame) pair.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub message: Message,
    pub frame: Vec<u8>,
}

/// State of one registry slot.
#[derive(Debug, Clone)]
pub enum CatalogSlot {
    /// The action has a canonical example.
    Fixture(CatalogEntry),
    /// The action is registered but has no canonical example (generic
    /// cross-cutting errors, or actions awaiting a defined shape).
    RegistryOnly,
}

/// The full catalog, keyed by wire action (ack and write-ack variants
/// have their own slots).
#[derive(Debug)]
pub struct Catalog {
    slots: Vec<(Action, CatalogSlot)>,
}

impl Catalog {
    /// Build the catalog. Cheap enough to call per test; callers that
    /// want a shared instance can hold it in a `OnceLock`.
    pub fn build() -> Catalog {
        let mut slots = TopicSlots::default();
        parser_fixtures(&mut slots);
        connection_fixtures(&mut slots);
        auth_fixtures(&mut slots);
        record_fixtures(&mut slots);
        rpc_fixtures(&mut slots);
        event_fixtures(&mut slots);
        presence_fixtures(&mut slots);
        Catalog { slots: slots.slots }
    }

    /// Look up the slot for a wire action.
    pub fn get(&self, action: Action) -> Option<&CatalogSlot> {
        self.slots
            .iter()
            .find(|(slot_action, _)| *slot_action == action)
            .map(|(_, slot)| slot)
    }

    /// All slots in registry order.
    pub fn slots(&self) -> impl Iterator<Item = &(Action, CatalogSlot)> {
        self.slots.iter()
    }

    /// All fixtures with their wire action.
    pub fn fixtures(&self) -> impl Iterator<Item = (Action, &CatalogEntry)> {
        self.slots.iter().filter_map(|(action, slot)| match slot {
            CatalogSlot::Fixture(entry) => Some((*action, entry)),
            CatalogSlot::RegistryOnly => None,
        })
    }

    /// Registry actions without a catalog slot. Empty on a complete
    /// catalog; checked by the build-invariant tests.
    pub fn missing(&self) -> Vec<Action> {
        let mut missing = Vec::new();
        for &topic in Topic::ALL {
            for action in Action::all_for(topic) {
                if self.get(action).is_none() {
                    missing.push(action);
                }
            }
        }
        missing
    }
}

/// Assemble a frame by hand, mirroring the wire layout byte for byte.
fn frame_bytes(wire_action: Action, meta: &str, payload: &str) -> Vec<u8> {
    let mut bytes = vec![
        0x80 | wire_action.topic().code(),
        wire_action.code(),
        (meta.len() >> 16) as u8,
        (meta.len() >> 8) as u8,
        meta.len() as u8,
        (payload.len() >> 16) as u8,
        (payload.len() >> 8) as u8,
        payload.len() as u8,
    ];
    bytes.extend_from_slice(meta.as_bytes());
    bytes.extend_from_slice(payload.as_bytes());
    bytes
}

#[derive(Default)]
struct TopicSlots {
    slots: Vec<(Action, CatalogSlot)>,
}

impl TopicSlots {
    fn fixture(
        &mut self,
        wire_action: impl Into<Action>,
        message: Message,
        meta: &str,
        payload: &str,
    ) {
        let wire_action = wire_action.into();
        let frame = frame_bytes(wire_action, meta, payload);
        self.slots
            .push((wire_action, CatalogSlot::Fixture(CatalogEntry { message, frame })));
    }

    fn registry_only(&mut self, wire_action: impl Into<Action>) {
        self.slots.push((wire_action.into(), CatalogSlot::RegistryOnly));
    }
}

fn some(text: &str) -> Option<String> {
    Some(text.to_owned())
}

/// The generic cross-cutting error actions every topic registers but
/// never exemplifies.
fn generic_registry_only(slots: &mut TopicSlots, error: Action, invalid_message_data: Action) {
    slots.registry_only(error);
    slots.registry_only(invalid_message_data);
}

/// MESSAGE_PERMISSION_ERROR / MESSAGE_DENIED, shared shape across
/// topics.
struct PermissionActions {
    permission_error: Action,
    denied: Action,
}

fn permission_error_fixtures(slots: &mut TopicSlots, actions: PermissionActions) {
    slots.fixture(
        actions.permission_error,
        Message {
            name: some("username"),
            ..Message::new(actions.permission_error)
        },
        r#"{"n":"username"}"#,
        "",
    );
    slots.fixture(
        actions.denied,
        Message {
            name: some("username"),
            ..Message::new(actions.denied)
        },
        r#"{"n":"username"}"#,
        "",
    );
}

/// SUBSCRIBE/UNSUBSCRIBE family, shared shape across RECORD and EVENT.
struct SubscriptionActions {
    subscribe: Action,
    subscribe_ack: Action,
    unsubscribe: Action,
    unsubscribe_ack: Action,
    multiple_subscriptions: Action,
    not_subscribed: Action,
}

fn subscription_fixtures(slots: &mut TopicSlots, actions: SubscriptionActions) {
    slots.fixture(
        actions.subscribe,
        Message {
            name: some("subscription"),
            ..Message::new(actions.subscribe)
        },
        r#"{"n":"subscription"}"#,
        "",
    );
    slots.fixture(
        actions.subscribe_ack,
        Message {
            name: some("subscription"),
            ..Message::ack(actions.subscribe)
        },
        r#"{"n":"subscription"}"#,
        "",
    );
    slots.fixture(
        actions.unsubscribe,
        Message {
            name: some("subscription"),
            ..Message::new(actions.unsubscribe)
        },
        r#"{"n":"subscription"}"#,
        "",
    );
    slots.fixture(
        actions.unsubscribe_ack,
        Message {
            name: some("subscription"),
            ..Message::ack(actions.unsubscribe)
        },
        r#"{"n":"subscription"}"#,
        "",
    );
    slots.fixture(
        actions.multiple_subscriptions,
        Message {
            name: some("username"),
            ..Message::new(actions.multiple_subscriptions)
        },
        r#"{"n":"username"}"#,
        "",
    );
    slots.fixture(
        actions.not_subscribed,
        Message {
            name: some("username"),
            ..Message::new(actions.not_subscribed)
        },
        r#"{"n":"username"}"#,
        "",
    );
}

/// LISTEN family, shared shape across RECORD and EVENT.
struct ListenActions {
    listen: Action,
    listen_ack: Action,
    unlisten: Action,
    unlisten_ack: Action,
    pattern_found: Action,
    pattern_removed: Action,
    accept: Action,
    reject: Action,
}

fn listen_fixtures(slots: &mut TopicSlots, actions: ListenActions) {
    slots.fixture(
        actions.listen,
        Message {
            name: some(".*"),
            ..Message::new(actions.listen)
        },
        r#"{"n":".*"}"#,
        "",
    );
    slots.fixture(
        actions.listen_ack,
        Message {
            name: some(".*"),
            ..Message::ack(actions.listen)
        },
        r#"{"n":".*"}"#,
        "",
    );
    slots.fixture(
        actions.unlisten,
        Message {
            name: some(".*"),
            ..Message::new(actions.unlisten)
        },
        r#"{"n":".*"}"#,
        "",
    );
    slots.fixture(
        actions.unlisten_ack,
        Message {
            name: some(".*"),
            ..Message::ack(actions.unlisten)
        },
        r#"{"n":".*"}"#,
        "",
    );
    for action in [
        actions.pattern_found,
        actions.pattern_removed,
        actions.accept,
        actions.reject,
    ] {
        slots.fixture(
            action,
            Message {
                name: some(".*"),
                subscription: some("someSubscription"),
                ..Message::new(action)
            },
            r#"{"n":".*","s":"someSubscription"}"#,
            "",
        );
    }
}

fn parser_fixtures(slots: &mut TopicSlots) {
    slots.fixture(
        ParserAction::UnknownTopic,
        Message {
            reason: some("topic"),
            ..Message::new(ParserAction::UnknownTopic)
        },
        r#"{"r":"topic"}"#,
        "",
    );
    slots.fixture(
        ParserAction::UnknownAction,
        Message {
            reason: some("action"),
            ..Message::new(ParserAction::UnknownAction)
        },
        r#"{"r":"action"}"#,
        "",
    );
    slots.fixture(
        ParserAction::InvalidMessage,
        Message {
            reason: some("too long"),
            ..Message::new(ParserAction::InvalidMessage)
        },
        r#"{"r":"too long"}"#,
        "",
    );
    slots.fixture(
        ParserAction::MessageParseError,
        Message::new(ParserAction::MessageParseError),
        "",
        "",
    );
    slots.fixture(
        ParserAction::MaximumMessageSizeExceeded,
        Message::new(ParserAction::MaximumMessageSizeExceeded),
        "",
        "",
    );
}

fn connection_fixtures(slots: &mut TopicSlots) {
    slots.registry_only(ConnectionAction::Error);
    for action in [
        ConnectionAction::Ping,
        ConnectionAction::Pong,
        ConnectionAction::Challenge,
        ConnectionAction::Accept,
        ConnectionAction::Closing,
        ConnectionAction::Closed,
        ConnectionAction::AuthenticationTimeout,
    ] {
        slots.fixture(action, Message::new(action), "", "");
    }
    slots.fixture(
        ConnectionAction::ChallengeResponse,
        Message {
            url: some("ws://url.io"),
            ..Message::new(ConnectionAction::ChallengeResponse)
        },
        r#"{"u":"ws://url.io"}"#,
        "",
    );
    slots.fixture(
        ConnectionAction::Reject,
        Message {
            reason: some("reason"),
            ..Message::new(ConnectionAction::Reject)
        },
        r#"{"r":"reason"}"#,
        "",
    );
    slots.fixture(
        ConnectionAction::Redirect,
        Message {
            url: some("ws://url.io"),
            ..Message::new(ConnectionAction::Redirect)
        },
        r#"{"u":"ws://url.io"}"#,
        "",
    );
}

fn auth_fixtures(slots: &mut TopicSlots) {
    slots.registry_only(AuthAction::Error);
    slots.fixture(
        AuthAction::Request,
        Message {
            parsed_data: Some(json!({ "username": "ricardo" })),
            ..Message::new(AuthAction::Request)
        },
        "",
        r#"{"username":"ricardo"}"#,
    );
    slots.fixture(
        AuthAction::AuthSuccessful,
        Message {
            parsed_data: Some(json!({ "id": "foobar" })),
            ..Message::new(AuthAction::AuthSuccessful)
        },
        "",
        r#"{"id":"foobar"}"#,
    );
    slots.fixture(
        AuthAction::AuthUnsuccessful,
        Message {
            reason: some("errorMessage"),
            ..Message::new(AuthAction::AuthUnsuccessful)
        },
        r#"{"r":"errorMessage"}"#,
        "",
    );
    slots.fixture(
        AuthAction::TooManyAuthAttempts,
        Message::new(AuthAction::TooManyAuthAttempts),
        "",
        "",
    );
    slots.registry_only(AuthAction::MessagePermissionError);
    slots.registry_only(AuthAction::MessageDenied);
    slots.fixture(
        AuthAction::InvalidMessageData,
        Message {
            reason: some("[invalid"),
            ..Message::new(AuthAction::InvalidMessageData)
        },
        r#"{"r":"[invalid"}"#,
        "",
    );
}

fn record_fixtures(slots: &mut TopicSlots) {
    slots.fixture(
        RecordAction::Head,
        Message {
            name: some("user/someId"),
            ..Message::new(RecordAction::Head)
        },
        r#"{"n":"user/someId"}"#,
        "",
    );
    slots.fixture(
        RecordAction::HeadResponse,
        Message {
            name: some("user/someId"),
            version: Some(12),
            ..Message::new(RecordAction::HeadResponse)
        },
        r#"{"n":"user/someId","v":12}"#,
        "",
    );
    slots.fixture(
        RecordAction::Read,
        Message {
            name: some("user/someId"),
            ..Message::new(RecordAction::Read)
        },
        r#"{"n":"user/someId"}"#,
        "",
    );
    slots.fixture(
        RecordAction::ReadResponse,
        Message {
            name: some("user/someId"),
            version: Some(1),
            parsed_data: Some(json!({ "firstname": "Wolfram" })),
            ..Message::new(RecordAction::ReadResponse)
        },
        r#"{"n":"user/someId","v":1}"#,
        r#"{"firstname":"Wolfram"}"#,
    );
    slots.fixture(
        RecordAction::Update,
        Message {
            name: some("user/someId"),
            version: Some(1),
            parsed_data: Some(json!({ "firstname": "Wolfram" })),
            ..Message::new(RecordAction::Update)
        },
        r#"{"n":"user/someId","v":1}"#,
        r#"{"firstname":"Wolfram"}"#,
    );
    slots.fixture(
        RecordAction::UpdateWithWriteAck,
        Message {
            name: some("user/someId"),
            version: Some(1),
            parsed_data: Some(json!({ "firstname": "Wolfram" })),
            is_write_ack: true,
            ..Message::new(RecordAction::Update)
        },
        r#"{"n":"user/someId","v":1}"#,
        r#"{"firstname":"Wolfram"}"#,
    );
    slots.fixture(
        RecordAction::Patch,
        Message {
            name: some("user/someId"),
            version: Some(1),
            path: some("path"),
            parsed_data: Some(json!("data")),
            ..Message::new(RecordAction::Patch)
        },
        r#"{"n":"user/someId","v":1,"p":"path"}"#,
        r#""data""#,
    );
    slots.fixture(
        RecordAction::PatchWithWriteAck,
        Message {
            name: some("user/someId"),
            version: Some(1),
            path: some("path"),
            parsed_data: Some(json!("data")),
            is_write_ack: true,
            ..Message::new(RecordAction::Patch)
        },
        r#"{"n":"user/someId","v":1,"p":"path"}"#,
        r#""data""#,
    );
    slots.fixture(
        RecordAction::Erase,
        Message {
            name: some("user/someId"),
            version: Some(1),
            path: some("path"),
            ..Message::new(RecordAction::Erase)
        },
        r#"{"n":"user/someId","v":1,"p":"path"}"#,
        "",
    );
    slots.fixture(
        RecordAction::EraseWithWriteAck,
        Message {
            name: some("user/someId"),
            version: Some(1),
            path: some("path"),
            is_write_ack: true,
            ..Message::new(RecordAction::Erase)
        },
        r#"{"n":"user/someId","v":1,"p":"path"}"#,
        "",
    );
    slots.fixture(
        RecordAction::CreateAndUpdate,
        Message {
            name: some("user/someId"),
            version: Some(1),
            parsed_data: Some(json!({ "name": "bob" })),
            ..Message::new(RecordAction::CreateAndUpdate)
        },
        r#"{"n":"user/someId","v":1}"#,
        r#"{"name":"bob"}"#,
    );
    slots.fixture(
        RecordAction::CreateAndUpdateWithWriteAck,
        Message {
            name: some("user/someId"),
            version: Some(1),
            parsed_data: Some(json!({ "name": "bob" })),
            is_write_ack: true,
            ..Message::new(RecordAction::CreateAndUpdate)
        },
        r#"{"n":"user/someId","v":1}"#,
        r#"{"name":"bob"}"#,
    );
    slots.fixture(
        RecordAction::CreateAndPatch,
        Message {
            name: some("user/someId"),
            version: Some(1),
            path: some("path"),
            parsed_data: Some(json!("data")),
            ..Message::new(RecordAction::CreateAndPatch)
        },
        r#"{"n":"user/someId","v":1,"p":"path"}"#,
        r#""data""#,
    );
    slots.fixture(
        RecordAction::CreateAndPatchWithWriteAck,
        Message {
            name: some("user/someId"),
            version: Some(1),
            path: some("path"),
            parsed_data: Some(json!("data")),
            is_write_ack: true,
            ..Message::new(RecordAction::CreateAndPatch)
        },
        r#"{"n":"user/someId","v":1,"p":"path"}"#,
        r#""data""#,
    );
    slots.fixture(
        RecordAction::Delete,
        Message {
            name: some("user/someId"),
            ..Message::new(RecordAction::Delete)
        },
        r#"{"n":"user/someId"}"#,
        "",
    );
    slots.fixture(
        RecordAction::DeleteAck,
        Message {
            name: some("user/someId"),
            ..Message::ack(RecordAction::Delete)
        },
        r#"{"n":"user/someId"}"#,
        "",
    );
    slots.fixture(
        RecordAction::Deleted,
        Message {
            name: some("user/someId"),
            ..Message::new(RecordAction::Deleted)
        },
        r#"{"n":"user/someId"}"#,
        "",
    );
    slots.fixture(
        RecordAction::SubscribeCreateAndRead,
        Message {
            name: some("user/someId"),
            ..Message::new(RecordAction::SubscribeCreateAndRead)
        },
        r#"{"n":"user/someId"}"#,
        "",
    );
    slots.fixture(
        RecordAction::SubscriptionHasProvider,
        Message {
            name: some("someSubscription"),
            ..Message::new(RecordAction::SubscriptionHasProvider)
        },
        r#"{"n":"someSubscription"}"#,
        "",
    );
    slots.fixture(
        RecordAction::SubscriptionHasNoProvider,
        Message {
            name: some("someSubscription"),
            ..Message::new(RecordAction::SubscriptionHasNoProvider)
        },
        r#"{"n":"someSubscription"}"#,
        "",
    );
    // Known asymmetry: the acknowledged versions and error data ride in
    // the payload section rather than meta. Kept for wire
    // compatibility.
    slots.fixture(
        RecordAction::WriteAcknowledgement,
        Message {
            name: some("someSubscription"),
            parsed_data: Some(json!([[-1], null])),
            ..Message::new(RecordAction::WriteAcknowledgement)
        },
        r#"{"n":"someSubscription"}"#,
        r#"[[-1],null]"#,
    );
    slots.fixture(
        RecordAction::VersionExists,
        Message {
            name: some("recordName"),
            version: Some(1),
            parsed_data: Some(json!({})),
            ..Message::new(RecordAction::VersionExists)
        },
        r#"{"n":"recordName","v":1}"#,
        r#"{}"#,
    );
    slots.fixture(
        RecordAction::CacheRetrievalTimeout,
        Message {
            name: some("recordName"),
            ..Message::new(RecordAction::CacheRetrievalTimeout)
        },
        r#"{"n":"recordName"}"#,
        "",
    );
    slots.fixture(
        RecordAction::StorageRetrievalTimeout,
        Message {
            name: some("recordName"),
            ..Message::new(RecordAction::StorageRetrievalTimeout)
        },
        r#"{"n":"recordName"}"#,
        "",
    );
    for action in [
        RecordAction::Create,
        RecordAction::Has,
        RecordAction::HasResponse,
        RecordAction::SubscribeAndHead,
        RecordAction::SubscribeAndRead,
        RecordAction::SubscribeCreateAndUpdate,
        RecordAction::RecordLoadError,
        RecordAction::RecordCreateError,
        RecordAction::RecordUpdateError,
        RecordAction::RecordDeleteError,
        RecordAction::RecordReadError,
        RecordAction::RecordNotFound,
        RecordAction::InvalidVersion,
        RecordAction::InvalidPatchOnHotpath,
    ] {
        slots.registry_only(action);
    }
    generic_registry_only(
        slots,
        RecordAction::Error.into(),
        RecordAction::InvalidMessageData.into(),
    );
    permission_error_fixtures(
        slots,
        PermissionActions {
            permission_error: RecordAction::MessagePermissionError.into(),
            denied: RecordAction::MessageDenied.into(),
        },
    );
    subscription_fixtures(
        slots,
        SubscriptionActions {
            subscribe: RecordAction::Subscribe.into(),
            subscribe_ack: RecordAction::SubscribeAck.into(),
            unsubscribe: RecordAction::Unsubscribe.into(),
            unsubscribe_ack: RecordAction::UnsubscribeAck.into(),
            multiple_subscriptions: RecordAction::MultipleSubscriptions.into(),
            not_subscribed: RecordAction::NotSubscribed.into(),
        },
    );
    listen_fixtures(
        slots,
        ListenActions {
            listen: RecordAction::Listen.into(),
            listen_ack: RecordAction::ListenAck.into(),
            unlisten: RecordAction::Unlisten.into(),
            unlisten_ack: RecordAction::UnlistenAck.into(),
            pattern_found: RecordAction::SubscriptionForPatternFound.into(),
            pattern_removed: RecordAction::SubscriptionForPatternRemoved.into(),
            accept: RecordAction::ListenAccept.into(),
            reject: RecordAction::ListenReject.into(),
        },
    );
}

fn rpc_fixtures(slots: &mut TopicSlots) {
    slots.fixture(
        RpcAction::RequestError,
        Message {
            name: some("addValues"),
            correlation_id: some("1234"),
            reason: some("ERROR_MESSAGE"),
            ..Message::new(RpcAction::RequestError)
        },
        r#"{"n":"addValues","c":"1234","r":"ERROR_MESSAGE"}"#,
        "",
    );
    slots.fixture(
        RpcAction::Request,
        Message {
            name: some("addValues"),
            correlation_id: some("1234"),
            parsed_data: Some(json!({ "val1": 1, "val2": 2 })),
            ..Message::new(RpcAction::Request)
        },
        r#"{"n":"addValues","c":"1234"}"#,
        r#"{"val1":1,"val2":2}"#,
    );
    slots.fixture(
        RpcAction::Response,
        Message {
            name: some("addValues"),
            correlation_id: some("1234"),
            parsed_data: Some(json!({ "val1": 1, "val2": 2 })),
            ..Message::new(RpcAction::Response)
        },
        r#"{"n":"addValues","c":"1234"}"#,
        r#"{"val1":1,"val2":2}"#,
    );
    for action in [
        RpcAction::Accept,
        RpcAction::Reject,
        RpcAction::MultipleResponse,
        RpcAction::ResponseTimeout,
        RpcAction::MultipleAccept,
        RpcAction::AcceptTimeout,
        RpcAction::NoRpcProvider,
    ] {
        slots.fixture(
            action,
            Message {
                name: some("addValues"),
                correlation_id: some("1234"),
                ..Message::new(action)
            },
            r#"{"n":"addValues","c":"1234"}"#,
            "",
        );
    }
    slots.fixture(
        RpcAction::InvalidRpcCorrelationId,
        Message {
            name: some("addValues"),
            correlation_id: some("/=/=/=/"),
            ..Message::new(RpcAction::InvalidRpcCorrelationId)
        },
        r#"{"n":"addValues","c":"/=/=/=/"}"#,
        "",
    );
    slots.fixture(
        RpcAction::Provide,
        Message {
            name: some("addValues"),
            ..Message::new(RpcAction::Provide)
        },
        r#"{"n":"addValues"}"#,
        "",
    );
    slots.fixture(
        RpcAction::ProvideAck,
        Message {
            name: some("addValues"),
            ..Message::ack(RpcAction::Provide)
        },
        r#"{"n":"addValues"}"#,
        "",
    );
    slots.fixture(
        RpcAction::Unprovide,
        Message {
            name: some("addValues"),
            ..Message::new(RpcAction::Unprovide)
        },
        r#"{"n":"addValues"}"#,
        "",
    );
    slots.fixture(
        RpcAction::UnprovideAck,
        Message {
            name: some("addValues"),
            ..Message::ack(RpcAction::Unprovide)
        },
        r#"{"n":"addValues"}"#,
        "",
    );
    slots.registry_only(RpcAction::MultipleProviders);
    slots.registry_only(RpcAction::NotProvided);
    generic_registry_only(
        slots,
        RpcAction::Error.into(),
        RpcAction::InvalidMessageData.into(),
    );
    permission_error_fixtures(
        slots,
        PermissionActions {
            permission_error: RpcAction::MessagePermissionError.into(),
            denied: RpcAction::MessageDenied.into(),
        },
    );
}

fn event_fixtures(slots: &mut TopicSlots) {
    slots.fixture(
        EventAction::Emit,
        Message {
            name: some("someEvent"),
            parsed_data: Some(json!("data")),
            ..Message::new(EventAction::Emit)
        },
        r#"{"n":"someEvent"}"#,
        r#""data""#,
    );
    generic_registry_only(
        slots,
        EventAction::Error.into(),
        EventAction::InvalidMessageData.into(),
    );
    permission_error_fixtures(
        slots,
        PermissionActions {
            permission_error: EventAction::MessagePermissionError.into(),
            denied: EventAction::MessageDenied.into(),
        },
    );
    subscription_fixtures(
        slots,
        SubscriptionActions {
            subscribe: EventAction::Subscribe.into(),
            subscribe_ack: EventAction::SubscribeAck.into(),
            unsubscribe: EventAction::Unsubscribe.into(),
            unsubscribe_ack: EventAction::UnsubscribeAck.into(),
            multiple_subscriptions: EventAction::MultipleSubscriptions.into(),
            not_subscribed: EventAction::NotSubscribed.into(),
        },
    );
    listen_fixtures(
        slots,
        ListenActions {
            listen: EventAction::Listen.into(),
            listen_ack: EventAction::ListenAck.into(),
            unlisten: EventAction::Unlisten.into(),
            unlisten_ack: EventAction::UnlistenAck.into(),
            pattern_found: EventAction::SubscriptionForPatternFound.into(),
            pattern_removed: EventAction::SubscriptionForPatternRemoved.into(),
            accept: EventAction::ListenAccept.into(),
            reject: EventAction::ListenReject.into(),
        },
    );
}

fn presence_fixtures(slots: &mut TopicSlots) {
    // Presence subscriptions are not the shared template: the request
    // carries a correlation id plus a user list, its ack a single name.
    slots.fixture(
        PresenceAction::Subscribe,
        Message {
            correlation_id: some("1234"),
            parsed_data: Some(json!(["alan", "john"])),
            ..Message::new(PresenceAction::Subscribe)
        },
        r#"{"c":"1234"}"#,
        r#"["alan","john"]"#,
    );
    slots.fixture(
        PresenceAction::SubscribeAck,
        Message {
            name: some("alan"),
            ..Message::ack(PresenceAction::Subscribe)
        },
        r#"{"n":"alan"}"#,
        "",
    );
    slots.fixture(
        PresenceAction::Unsubscribe,
        Message {
            correlation_id: some("1234"),
            parsed_data: Some(json!(["alan", "john"])),
            ..Message::new(PresenceAction::Unsubscribe)
        },
        r#"{"c":"1234"}"#,
        r#"["alan","john"]"#,
    );
    slots.fixture(
        PresenceAction::UnsubscribeAck,
        Message {
            name: some("alan"),
            ..Message::ack(PresenceAction::Unsubscribe)
        },
        r#"{"n":"alan"}"#,
        "",
    );
    slots.fixture(
        PresenceAction::QueryAll,
        Message::new(PresenceAction::QueryAll),
        "",
        "",
    );
    slots.fixture(
        PresenceAction::QueryAllResponse,
        Message {
            parsed_data: Some(json!(["alan", "sarah"])),
            ..Message::new(PresenceAction::QueryAllResponse)
        },
        "",
        r#"["alan","sarah"]"#,
    );
    slots.fixture(
        PresenceAction::Query,
        Message {
            correlation_id: some("1234"),
            parsed_data: Some(json!(["alan"])),
            ..Message::new(PresenceAction::Query)
        },
        r#"{"c":"1234"}"#,
        r#"["alan"]"#,
    );
    slots.fixture(
        PresenceAction::QueryResponse,
        Message {
            correlation_id: some("1234"),
            parsed_data: Some(json!({ "alan": true })),
            ..Message::new(PresenceAction::QueryResponse)
        },
        r#"{"c":"1234"}"#,
        r#"{"alan":true}"#,
    );
    slots.fixture(
        PresenceAction::PresenceJoin,
        Message {
            name: some("username"),
            ..Message::new(PresenceAction::PresenceJoin)
        },
        r#"{"n":"username"}"#,
        "",
    );
    slots.fixture(
        PresenceAction::PresenceLeave,
        Message {
            name: some("username"),
            ..Message::new(PresenceAction::PresenceLeave)
        },
        r#"{"n":"username"}"#,
        "",
    );
    slots.fixture(
        PresenceAction::InvalidPresenceUsers,
        Message {
            reason: some("reason"),
            ..Message::new(PresenceAction::InvalidPresenceUsers)
        },
        r#"{"r":"reason"}"#,
        "",
    );
    slots.registry_only(PresenceAction::MultipleSubscriptions);
    slots.registry_only(PresenceAction::NotSubscribed);
    generic_registry_only(
        slots,
        PresenceAction::Error.into(),
        PresenceAction::InvalidMessageData.into(),
    );
    permission_error_fixtures(
        slots,
        PermissionActions {
            permission_error: PresenceAction::MessagePermissionError.into(),
            denied: PresenceAction::MessageDenied.into(),
        },
    );
}
