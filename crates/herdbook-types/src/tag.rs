use serde::{Deserialize, Serialize};

use crate::key::EntityKind;
use crate::record::Record;

/// An RFID ear tag attached to an animal, stored under the tag key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagAttachment {
    /// Key of the tagged cow.
    #[serde(rename = "Id_no")]
    pub cow_key: String,
    #[serde(rename = "Rfid_no")]
    pub tag_id: String,
}

impl Record for TagAttachment {
    const KIND: EntityKind = EntityKind::Rfid;
}
