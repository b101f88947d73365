/// Who wrote a feed line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    System,
    Commentary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedMessage {
    pub id: u64,
    pub text: String,
    pub kind: MessageKind,
}

/// Ordered match feed shown next to the table
#[derive(Debug, Clone)]
pub struct CommentaryFeed {
    messages: Vec<FeedMessage>,
    next_id: u64,
}

impl CommentaryFeed {
    pub const WELCOME: &'static str = "System initialized. Waiting for match start.";

    pub fn new() -> Self {
        let mut feed = Self {
            messages: Vec::new(),
            next_id: 1,
        };
        feed.push(Self::WELCOME, MessageKind::System);
        feed
    }

    /// Append a line, returning its id. Ids keep increasing across resets.
    pub fn push(&mut self, text: impl Into<String>, kind: MessageKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(FeedMessage {
            id,
            text: text.into(),
            kind,
        });
        id
    }

    /// Replace the feed with a single system line
    pub fn reset(&mut self, text: impl Into<String>) {
        self.messages.clear();
        self.push(text, MessageKind::System);
    }

    pub fn messages(&self) -> &[FeedMessage] {
        &self.messages
    }

    /// Lines newer than `id`
    pub fn since(&self, id: u64) -> impl Iterator<Item = &FeedMessage> {
        self.messages.iter().filter(move |m| m.id > id)
    }

    pub fn last(&self) -> Option<&FeedMessage> {
        self.messages.last()
    }
}

impl Default for CommentaryFeed {
    fn default() -> Self {
        Self::new()
    }
}
