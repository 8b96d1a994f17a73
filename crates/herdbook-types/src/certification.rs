use serde::{Deserialize, Serialize};

use crate::key::EntityKind;
use crate::record::Record;

/// A HACCP facility certification.
///
/// Stored on its own; the certified owner learns about it only through
/// remarks appended to its trail at registration time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Haccp {
    #[serde(rename = "Farm_id")]
    pub facility_id: String,
    #[serde(rename = "Farm_nm")]
    pub facility_name: String,
    #[serde(rename = "Farm_addr")]
    pub address: String,
    #[serde(rename = "Apply_item")]
    pub apply_item: String,
    #[serde(rename = "Validity_date")]
    pub validity_date: String,
}

impl Record for Haccp {
    const KIND: EntityKind = EntityKind::Haccp;
}
