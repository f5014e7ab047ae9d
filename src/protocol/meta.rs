//! The abbreviated-key meta section.
//!
//! Field declaration order is the fixed wire serialization order
//! (n, v, p, c, r, u, s); `serde_json` emits struct fields in that
//! order, which keeps the byte output reproducible.

use serde::{Deserialize, Serialize};

use crate::message::Message;
use crate::schema::{MessageSchema, MetaKey};

/// Serialized form of the meta section.
///
/// `deny_unknown_fields` makes any key outside the seven abbreviated
/// ones a deserialization error, which the decoder reports as a schema
/// violation.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct MetaSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub p: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub s: Option<String>,
}

impl MetaSection {
    /// Build the meta section from a message, including only the fields
    /// the schema declares.
    pub fn from_message(message: &Message, schema: &MessageSchema) -> MetaSection {
        let mut meta = MetaSection::default();
        if schema.declares(MetaKey::Name) {
            meta.n = message.name.clone();
        }
        if schema.declares(MetaKey::Version) {
            meta.v = message.version;
        }
        if schema.declares(MetaKey::Path) {
            meta.p = message.path.clone();
        }
        if schema.declares(MetaKey::CorrelationId) {
            meta.c = message.correlation_id.clone();
        }
        if schema.declares(MetaKey::Reason) {
            meta.r = message.reason.clone();
        }
        if schema.declares(MetaKey::Url) {
            meta.u = message.url.clone();
        }
        if schema.declares(MetaKey::Subscription) {
            meta.s = message.subscription.clone();
        }
        meta
    }

    /// Whether the given key is present.
    pub fn has(&self, key: MetaKey) -> bool {
        match key {
            MetaKey::Name => self.n.is_some(),
            MetaKey::Version => self.v.is_some(),
            MetaKey::Path => self.p.is_some(),
            MetaKey::CorrelationId => self.c.is_some(),
            MetaKey::Reason => self.r.is_some(),
            MetaKey::Url => self.u.is_some(),
            MetaKey::Subscription => self.s.is_some(),
        }
    }

    /// True if no field is set; an empty meta section is encoded as
    /// zero bytes, not as `{}`.
    pub fn is_empty(&self) -> bool {
        *self == MetaSection::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::RecordAction;
    use crate::schema::schema_of;

    #[test]
    fn test_serialization_order_is_fixed() {
        let meta = MetaSection {
            n: Some("user/someId".into()),
            v: Some(1),
            p: Some("path".into()),
            ..MetaSection::default()
        };
        let text = serde_json::to_string(&meta).unwrap();
        assert_eq!(text, r#"{"n":"user/someId","v":1,"p":"path"}"#);
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let meta = MetaSection {
            r: Some("topic".into()),
            ..MetaSection::default()
        };
        assert_eq!(serde_json::to_string(&meta).unwrap(), r#"{"r":"topic"}"#);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result: Result<MetaSection, _> = serde_json::from_str(r#"{"n":"a","x":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_message_filters_undeclared_fields() {
        let message = Message {
            name: Some("user/someId".into()),
            version: Some(1),
            // Not declared by HEAD's schema, must not leak onto the wire.
            reason: Some("stray".into()),
            ..Message::new(RecordAction::Head)
        };
        let schema = schema_of(message.action);
        let meta = MetaSection::from_message(&message, &schema);
        assert_eq!(meta.n.as_deref(), Some("user/someId"));
        assert_eq!(meta.v, None);
        assert_eq!(meta.r, None);
    }

    #[test]
    fn test_is_empty() {
        assert!(MetaSection::default().is_empty());
        let meta = MetaSection {
            v: Some(0),
            ..MetaSection::default()
        };
        assert!(!meta.is_empty());
    }
}
