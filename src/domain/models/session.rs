use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;

#[derive(Serialize, Deserialize)]
pub struct SessionRecord {
    pub transport_name: String,
    pub classifier_name: String,
    pub messages: Vec<Message>,
}

/// The on-disk shape of a persisted interview session.
#[derive(Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub version: String,
    pub timestamp: String,
    pub state: SessionRecord,
}
