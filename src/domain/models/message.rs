#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::Local;
use chrono::SecondsFormat;
use serde_derive::Deserialize;
use serde_derive::Serialize;
use uuid::Uuid;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

impl ToString for Role {
    fn to_string(&self) -> String {
        match self {
            Role::User => return Config::get(ConfigKey::Username),
            Role::Assistant => return String::from("Groundwork"),
        }
    }
}

/// One committed turn in a conversation. Immutable once appended to
/// history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.to_string().replace('\t', "  "),
            created_at: Local::now().to_rfc3339_opts(SecondsFormat::Secs, false),
        };
    }
}
