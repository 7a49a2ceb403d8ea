//! # Corpus — in-memory conversation store
//!
//! Holds messages, groups them into conversations by their `root` id, and
//! cuts conversations into threads for feature extraction.
//!
//! | `include_root` | Thread key | Thread contents |
//! |----------------|------------|-----------------|
//! | `true` | conversation root | every message of the conversation |
//! | `false` | top-level reply | that reply and its reply subtree |
//!
//! Thread messages are sorted by timestamp (stable) and truncated to the
//! first `prefix_len`.

use hashbrown::{HashMap, HashSet};

use crate::model::*;
use crate::{Error, Result};

/// Conversation record; `meta` is where extracted features are written back.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub id: String,
    pub meta: PropertyMap,
}

impl Conversation {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), meta: PropertyMap::new() }
    }

    pub fn add_meta(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.meta.insert(key.into(), value.into());
    }
}

/// A thread cut out of a conversation.
#[derive(Debug, Clone, PartialEq)]
pub struct Thread {
    /// Id of the message the thread starts at.
    pub root: String,
    /// Id of the conversation the thread belongs to.
    pub conversation: String,
    /// Sorted by timestamp, truncated to the prefix length.
    pub messages: Vec<Message>,
}

impl Thread {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Corpus {
    messages: Vec<Message>,
    by_id: HashMap<String, usize>,
    conversations: Vec<Conversation>,
    conversation_index: HashMap<String, usize>,
}

impl Corpus {
    /// Index `messages`. Conversations appear in the order their first
    /// message does. Fails on a repeated message id.
    pub fn new(messages: Vec<Message>) -> Result<Self> {
        let mut corpus = Self::default();
        for msg in messages {
            corpus.add_message(msg)?;
        }
        Ok(corpus)
    }

    pub fn add_message(&mut self, msg: Message) -> Result<()> {
        if self.by_id.contains_key(&msg.id) {
            return Err(Error::DuplicateVertex(format!("message {}", msg.id)));
        }
        if !self.conversation_index.contains_key(&msg.root) {
            self.conversation_index.insert(msg.root.clone(), self.conversations.len());
            self.conversations.push(Conversation::new(msg.root.clone()));
        }
        self.by_id.insert(msg.id.clone(), self.messages.len());
        self.messages.push(msg);
        Ok(())
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn get_message(&self, id: &str) -> Option<&Message> {
        self.by_id.get(id).map(|&i| &self.messages[i])
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get_conversation(&self, id: &str) -> Option<&Conversation> {
        self.conversation_index.get(id).map(|&i| &self.conversations[i])
    }

    pub fn get_conversation_mut(&mut self, id: &str) -> Option<&mut Conversation> {
        self.conversation_index.get(id).map(|&i| &mut self.conversations[i])
    }

    /// Messages grouped per conversation, each group sorted by timestamp.
    fn conversation_messages(&self) -> Vec<(&str, Vec<&Message>)> {
        let mut grouped: Vec<(&str, Vec<&Message>)> = self.conversations.iter()
            .map(|c| (c.id.as_str(), Vec::new()))
            .collect();
        for msg in &self.messages {
            if let Some(&i) = self.conversation_index.get(&msg.root) {
                grouped[i].1.push(msg);
            }
        }
        for (_, msgs) in &mut grouped {
            msgs.sort_by_key(|m| m.timestamp);
        }
        grouped
    }

    /// Cut every conversation into threads. `prefix_len = None` keeps whole
    /// threads.
    pub fn utterance_threads(&self, prefix_len: Option<usize>, include_root: bool) -> Vec<Thread> {
        let truncate = |msgs: Vec<&Message>| -> Vec<Message> {
            let keep = prefix_len.unwrap_or(msgs.len());
            msgs.into_iter().take(keep).cloned().collect()
        };

        let mut threads = Vec::new();
        for (root, msgs) in self.conversation_messages() {
            if include_root {
                threads.push(Thread {
                    root: root.to_string(),
                    conversation: root.to_string(),
                    messages: truncate(msgs),
                });
                continue;
            }

            let mut children: HashMap<&str, Vec<&Message>> = HashMap::new();
            for &msg in &msgs {
                if let Some(parent) = msg.reply_to.as_deref() {
                    children.entry(parent).or_default().push(msg);
                }
            }
            let top_level = children.get(root).cloned().unwrap_or_default();
            for tlc in top_level {
                let mut subtree = vec![tlc];
                let mut seen: HashSet<&str> = HashSet::from([tlc.id.as_str()]);
                let mut stack = vec![tlc.id.as_str()];
                while let Some(id) = stack.pop() {
                    for &child in children.get(id).into_iter().flatten() {
                        // Malformed reply cycles must not loop forever.
                        if seen.insert(child.id.as_str()) {
                            subtree.push(child);
                            stack.push(child.id.as_str());
                        }
                    }
                }
                subtree.sort_by_key(|m| m.timestamp);
                threads.push(Thread {
                    root: tlc.id.clone(),
                    conversation: root.to_string(),
                    messages: truncate(subtree),
                });
            }
        }
        threads
    }
}
