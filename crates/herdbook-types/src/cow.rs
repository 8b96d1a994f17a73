//! Animal records.

use serde::{Deserialize, Serialize};

use crate::key::EntityKind;
use crate::owner::Owner;
use crate::record::Record;
use crate::remark::RemarkTrail;

/// An animal and its traceability trail.
///
/// `owner` is a denormalized snapshot of the current custodian, captured when
/// the cow is registered and overwritten wholesale on every ownership
/// transfer. It is a materialized view, not a reference: later edits to the
/// owner's own record (for example a new `addAut` certification) are not
/// reflected here until the next transfer re-captures the owner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cow {
    /// Official animal identity number.
    #[serde(rename = "Id_no")]
    pub id_no: String,
    #[serde(rename = "Birth_date")]
    pub birth_date: String,
    #[serde(rename = "Sex")]
    pub sex: String,
    #[serde(rename = "Father_id")]
    pub father_id: String,
    #[serde(rename = "Mother_id")]
    pub mother_id: String,
    #[serde(rename = "Origin")]
    pub origin: String,
    /// Snapshot of the current custodian.
    #[serde(rename = "Owner")]
    pub owner: Owner,
    /// The cow's own audit trail, independent of the owner snapshot's.
    #[serde(rename = "Remarks", default)]
    pub remarks: RemarkTrail,
}

impl Cow {
    /// Replace the owner snapshot with a copy of `owner`.
    ///
    /// Base fields and the owner's remark trail are all taken from `owner`;
    /// nothing of the previous snapshot survives. The cow's own remarks are
    /// left alone.
    pub fn transfer_to(&mut self, owner: &Owner) {
        self.owner = owner.clone();
    }
}

impl Record for Cow {
    const KIND: EntityKind = EntityKind::Cow;
}
