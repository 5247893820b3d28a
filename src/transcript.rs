use crate::types::{ChatMessage, Role};

/// Prefix that marks the reference-data message at index 1.
pub const REFERENCE_DATA_MARKER: &str = "Rentals data:";

const REFERENCE_DATA_INDEX: usize = 1;

pub const SYSTEM_PROMPT: &str = r#"You are Offbeat Assistant, a friendly vacation rental expert.

Your job is to help users find their perfect offbeat retreat using the rentals data provided.
First, ask the user 2 or 3 simple questions (one at a time) to learn about their preferences, such as location, type of experience, or favorite theme.
After you have enough information, recommend the top 1-2 rentals from the list, explaining why they are a good match.
Format your recommendations with line breaks or bullet points for clarity.
If you use bullet points, use dashes (-) for each item.
If you use line breaks, use double newlines (\n\n) between paragraphs.
Be friendly and conversational!
You will be given the full rentals data in the next message."#;

/// Ordered conversation sent to the model.
///
/// Index 0 is always the system prompt. Index 1 is reserved for the rentals
/// snapshot once the first turn has run; it is overwritten on every turn and
/// never duplicated. Everything after that is append-only.
#[derive(Clone, Debug, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(SYSTEM_PROMPT)
    }
}

impl Transcript {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::system(system_prompt)],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true for a transcript built through `new`; kept for slice parity.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }

    pub fn reference_data(&self) -> Option<&ChatMessage> {
        self.messages
            .get(REFERENCE_DATA_INDEX)
            .filter(|msg| is_reference_data(msg))
    }

    /// Installs `body` into the reference-data slot, inserting the slot if it
    /// is not there yet.
    pub fn install_reference_data(&mut self, body: &str) {
        let content = format!("{REFERENCE_DATA_MARKER} {body}");
        if let Some(slot) = self
            .messages
            .get_mut(REFERENCE_DATA_INDEX)
            .filter(|msg| is_reference_data(msg))
        {
            slot.content = content;
        } else {
            let at = REFERENCE_DATA_INDEX.min(self.messages.len());
            self.messages.insert(at, ChatMessage::user(content));
        }
    }
}

fn is_reference_data(msg: &ChatMessage) -> bool {
    msg.role == Role::User && msg.content.starts_with(REFERENCE_DATA_MARKER)
}
