//! Message and Speaker — the input contract from a conversation store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PropertyMap, Value};

/// A conversation participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub id: String,
    #[serde(default)]
    pub meta: PropertyMap,
}

impl Speaker {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), meta: PropertyMap::new() }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}

/// A single message (utterance) in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub speaker: Speaker,
    /// Seconds since the epoch, or any other monotone integer clock.
    pub timestamp: i64,
    #[serde(default)]
    pub reply_to: Option<String>,
    /// Id of the conversation root. A root message is its own root.
    pub root: String,
    #[serde(default)]
    pub meta: PropertyMap,
}

impl Message {
    /// A root message: it starts its own conversation.
    pub fn new(id: impl Into<String>, speaker: Speaker, timestamp: i64) -> Self {
        let id = id.into();
        Self {
            root: id.clone(),
            id,
            speaker,
            timestamp,
            reply_to: None,
            meta: PropertyMap::new(),
        }
    }

    pub fn with_reply_to(mut self, target: impl Into<String>) -> Self {
        self.reply_to = Some(target.into());
        self
    }

    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Timestamp as a UTC datetime, when it fits chrono's range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// The full attribute set copied onto the message's graph node.
    pub fn attributes(&self) -> PropertyMap {
        let mut attrs = PropertyMap::new();
        attrs.insert("id".into(), Value::from(self.id.as_str()));
        attrs.insert("speaker".into(), Value::from(self.speaker.id.as_str()));
        attrs.insert("timestamp".into(), Value::Int(self.timestamp));
        attrs.insert("reply_to".into(), Value::from(self.reply_to.clone()));
        attrs.insert("root".into(), Value::from(self.root.as_str()));
        attrs.insert("meta".into(), Value::Map(self.meta.clone()));
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_defaults_to_self() {
        let m = Message::new("p1", Speaker::new("ada"), 100);
        assert_eq!(m.root, "p1");
        assert!(m.reply_to.is_none());
    }

    #[test]
    fn test_attributes_carry_everything() {
        let m = Message::new("c1", Speaker::new("bob"), 5)
            .with_reply_to("p1")
            .with_root("p1")
            .with_meta("score", 12);
        let attrs = m.attributes();
        assert_eq!(attrs.get("speaker"), Some(&Value::from("bob")));
        assert_eq!(attrs.get("timestamp"), Some(&Value::Int(5)));
        assert_eq!(attrs.get("reply_to"), Some(&Value::from("p1")));
        let meta = attrs.get("meta").and_then(Value::as_map).unwrap();
        assert_eq!(meta.get("score"), Some(&Value::Int(12)));
    }

    #[test]
    fn test_datetime() {
        let m = Message::new("p1", Speaker::new("ada"), 0);
        assert_eq!(m.datetime().map(|d| d.timestamp()), Some(0));
    }
}
