//! Packaging lots registered by processors and retailers.

use serde::{Deserialize, Serialize};

use crate::key::EntityKind;
use crate::record::Record;
use crate::remark::Remark;

/// Where along the chain a bundle was registered.
///
/// The stage only selects the remark namespace used when the bundle is
/// flattened onto its cow; the stored bundle is the same either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BundleStage {
    Processing,
    Sales,
}

impl BundleStage {
    pub const fn namespace(self) -> &'static str {
        match self {
            Self::Processing => "registerInProcessesBundleNum",
            Self::Sales => "registerInSalesBundleNum",
        }
    }
}

/// A package lot cut from one animal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Key of the source cow.
    #[serde(rename = "Id_no")]
    pub cow_key: String,
    #[serde(rename = "Barcode_id")]
    pub barcode_id: String,
    #[serde(rename = "Package_date")]
    pub package_date: String,
    #[serde(rename = "Part")]
    pub part: String,
    #[serde(rename = "Weight")]
    pub weight: String,
    /// Counterparty trade name.
    #[serde(rename = "Purchase_nm")]
    pub purchase_name: String,
    /// Counterparty business registration number.
    #[serde(rename = "Purchase_biz_no")]
    pub purchase_biz_no: String,
}

impl Bundle {
    /// Remark field names, in the order [`Bundle::to_remarks`] emits them.
    pub const FIELDS: [&'static str; 7] = [
        "id_no",
        "barcode_id",
        "package_date",
        "part",
        "weight",
        "purchase_nm",
        "purchase_biz_no",
    ];

    /// Flatten every field onto remarks namespaced by `stage`.
    pub fn to_remarks(&self, stage: BundleStage) -> Vec<Remark> {
        let values = [
            &self.cow_key,
            &self.barcode_id,
            &self.package_date,
            &self.part,
            &self.weight,
            &self.purchase_name,
            &self.purchase_biz_no,
        ];
        Self::FIELDS
            .iter()
            .zip(values)
            .map(|(field, value)| Remark::namespaced(stage.namespace(), field, value.as_str()))
            .collect()
    }
}

impl Record for Bundle {
    const KIND: EntityKind = EntityKind::Bundle;
}
