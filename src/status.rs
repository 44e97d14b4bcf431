use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MessageType {
    Error,
    Warning,
    Info,
    Status,
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message_type_str = match self {
            MessageType::Error => "Error",
            MessageType::Warning => "Warning",
            MessageType::Info => "Info",
            MessageType::Status => "Status",
        };
        write!(f, "{}", message_type_str)
    }
}

#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub timestamp: DateTime<Utc>,
    pub message_type: MessageType,
    pub content: String,
}

impl StatusMessage {
    pub fn new(message_type: MessageType, content: String) -> Self {
        StatusMessage {
            timestamp: Utc::now(),
            message_type,
            content,
        }
    }
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {:^8} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.message_type.to_string(),
            self.content,
        )
    }
}

/// Bounded run log. When headless every message is echoed to stdout.
pub struct MessageLog {
    messages: Vec<StatusMessage>,
    headless: bool,
    max_size: usize,
}

impl MessageLog {
    pub fn new(headless: bool, max_size: Option<usize>) -> Self {
        MessageLog {
            messages: Vec::new(),
            headless,
            max_size: max_size.unwrap_or(500).max(1),
        }
    }

    pub fn add_message(&mut self, message: StatusMessage) {
        if self.messages.len() == self.max_size {
            self.messages.remove(0);
        }

        if self.headless {
            let color = match message.message_type {
                MessageType::Error => "\x1b[31m",
                MessageType::Warning => "\x1b[33m",
                MessageType::Info => "\x1b[0m",
                MessageType::Status => "\x1b[36m",
            };
            let white = "\x1b[0m";
            println!("{}{}{}", color, message, white);
        }

        self.messages.push(message);
    }

    pub fn info(&mut self, content: impl Into<String>) {
        self.add_message(StatusMessage::new(MessageType::Info, content.into()));
    }

    pub fn status(&mut self, content: impl Into<String>) {
        self.add_message(StatusMessage::new(MessageType::Status, content.into()));
    }

    pub fn error(&mut self, content: impl Into<String>) {
        self.add_message(StatusMessage::new(MessageType::Error, content.into()));
    }

    pub fn get_all_messages(&self) -> Vec<StatusMessage> {
        self.messages.clone()
    }

    pub fn size(&self) -> usize {
        self.messages.len()
    }
}
