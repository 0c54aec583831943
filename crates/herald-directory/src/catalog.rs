/// Ordered list of message templates, referenced positionally by jobs.
///
/// Append-only: indices are stable for the process lifetime because job
/// declarations reference messages by zero-based position in file order.
#[derive(Debug, Default)]
pub struct MessageCatalog {
    messages: Vec<String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a template and return its index.
    pub fn ingest(&mut self, text: impl Into<String>) -> usize {
        self.messages.push(text.into());
        self.messages.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.messages.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
