//! Append-only event transactions.
//!
//! Most domain transactions do the same thing: load a cow or owner, turn each
//! positional argument into a namespaced remark, append, and save. Each one
//! is described by a [`RemarkSchema`] and run through
//! [`Herdbook::record_event`].

use herdbook_store::KeyValueStore;
use herdbook_types::{Cow, EntityKind, Owner, Remark};
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{Annotated, Herdbook};

/// Shape of one remark-append transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemarkSchema {
    /// Transaction name; also the remark key namespace.
    pub transaction: &'static str,
    /// Record type the remarks are appended to.
    pub target: EntityKind,
    /// Remark field names, one per value argument, in argument order.
    pub fields: &'static [&'static str],
}

impl RemarkSchema {
    /// Positional argument count, including the leading target key.
    pub const fn arity(&self) -> usize {
        self.fields.len() + 1
    }

    /// Pair each value with its field, keyed `<transaction>.<field>`.
    pub fn remarks(&self, values: &[String]) -> LedgerResult<Vec<Remark>> {
        if values.len() != self.fields.len() {
            return Err(LedgerError::Arity {
                transaction: self.transaction,
                expected: self.arity(),
                actual: values.len() + 1,
            });
        }
        Ok(self
            .fields
            .iter()
            .zip(values)
            .map(|(field, value)| Remark::namespaced(self.transaction, field, value.as_str()))
            .collect())
    }
}

/// Tuberculosis / brucellosis inspection.
pub const BT_VACCINE: RemarkSchema = RemarkSchema {
    transaction: "addBTVaccine",
    target: EntityKind::Cow,
    fields: &[
        "farm_id",
        "farm_nm",
        "farm_addr",
        "farm_user_nm",
        "farm_user_birth",
        "farm_user_addr",
        "inspection_date",
        "inspection_head",
        "inspection_method",
        "livestock",
        "kind",
        "sex",
        "age",
        "id_no",
        "inspection_result",
        "inspection_part",
        "inspection_user_nm",
    ],
};

/// Foot-and-mouth disease vaccination.
pub const FAMD_VACCINE: RemarkSchema = RemarkSchema {
    transaction: "addFAMDVaccine",
    target: EntityKind::Cow,
    fields: &[
        "farm_id",
        "farm_addr",
        "farm_tel",
        "breed_head",
        "item",
        "sex",
        "age",
        "id_no",
        "vaccination_date",
    ],
};

pub const INFO_DEAD: RemarkSchema = RemarkSchema {
    transaction: "addInfoDead",
    target: EntityKind::Cow,
    fields: &["farm_id", "id_no", "det_date", "det_reason", "det_method"],
};

/// Shipment to slaughter.
pub const INFO_DELIVER: RemarkSchema = RemarkSchema {
    transaction: "addInfoDeliver",
    target: EntityKind::Cow,
    fields: &["id_no", "rfid_no"],
};

/// Slaughter inspection.
pub const INFO_INSPECT: RemarkSchema = RemarkSchema {
    transaction: "addInfoInspect",
    target: EntityKind::Cow,
    fields: &[
        "livestock",
        "id_no",
        "weight",
        "slaughter_nm",
        "seal_no",
        "slaughter_date",
        "farm_id",
        "farm_addr",
        "haccp_yn",
        "fale_method",
        "inspection_date",
        "inspection_part",
        "inspection_user_nm",
        "veterinarian_no",
    ],
};

/// Carcass grading.
pub const INFO_GRADE_RESULT: RemarkSchema = RemarkSchema {
    transaction: "addInfoGradeResult",
    target: EntityKind::Cow,
    fields: &[
        "grade_date",
        "quality_part",
        "quality_nm",
        "subscriber_nm",
        "subscriber_birth",
        "subscriber_company",
        "subscriber_addr",
        "slaughter_nm",
        "slaughter_addr",
        "id_no",
        "weight",
        "meat_quality_grade",
        "meat_weight_grade",
        "grade_head",
    ],
};

const PURCHASE_FIELDS: &[&str] = &[
    "barcode_id",
    "deal_date",
    "origin",
    "part",
    "weight",
    "purchase_nm",
    "purchase_biz_no",
];

pub const PROCESSES_REPORT_PURCHASE: RemarkSchema = RemarkSchema {
    transaction: "addInfoInProcessesReportPurchase",
    target: EntityKind::Cow,
    fields: PURCHASE_FIELDS,
};

pub const SALES_REPORT_PURCHASE: RemarkSchema = RemarkSchema {
    transaction: "addInfoInSalesReportPurchase",
    target: EntityKind::Cow,
    fields: PURCHASE_FIELDS,
};

pub const REPORT_PACKING: RemarkSchema = RemarkSchema {
    transaction: "addInfoReportPacking",
    target: EntityKind::Cow,
    fields: &[
        "id_no",
        "barcode_id",
        "package_date",
        "part",
        "weight",
        "purchase_nm",
        "purchase_biz_no",
    ],
};

pub const REPORT_SALE: RemarkSchema = RemarkSchema {
    transaction: "addInfoReportSale",
    target: EntityKind::Cow,
    fields: &[
        "id_no",
        "barcode_id",
        "sale_date",
        "part",
        "weight",
        "sale_nm",
        "sale_biz_no",
    ],
};

/// Eco-friendly product certification held by an owner.
pub const AUTHENTICATION: RemarkSchema = RemarkSchema {
    transaction: "addAut",
    target: EntityKind::Owner,
    fields: &[
        "aut_falg",
        "validity_date",
        "farm_nm",
        "farm_birth_date",
        "farm_addr",
        "biz_addr",
        "aut_item",
        "breed_head",
        "aut_com",
        "aut_id",
        "aut_date",
    ],
};

/// Remarks written onto an owner when a HACCP certificate is registered.
pub const HACCP_LINK: RemarkSchema = RemarkSchema {
    transaction: "registerHACCP",
    target: EntityKind::Owner,
    fields: &["haccp_key", "validity_date"],
};

/// Remarks written onto a cow when an RFID tag is attached.
pub const RFID_LINK: RemarkSchema = RemarkSchema {
    transaction: "registerRFID",
    target: EntityKind::Cow,
    fields: &["id_no", "rfid_no"],
};

/// Every schema run through [`Herdbook::record_event`].
pub const EVENT_SCHEMAS: [RemarkSchema; 11] = [
    BT_VACCINE,
    FAMD_VACCINE,
    INFO_DEAD,
    INFO_DELIVER,
    INFO_INSPECT,
    INFO_GRADE_RESULT,
    PROCESSES_REPORT_PURCHASE,
    REPORT_PACKING,
    REPORT_SALE,
    SALES_REPORT_PURCHASE,
    AUTHENTICATION,
];

impl<S: KeyValueStore> Herdbook<S> {
    /// Append `remarks` to the record at `key` and save it.
    ///
    /// Earlier remarks, including ones with the same key, are kept.
    pub fn append_remarks<R: Annotated>(
        &self,
        key: &str,
        remarks: Vec<Remark>,
    ) -> LedgerResult<R> {
        self.update(key, |record: &mut R| {
            record.remarks_mut().append(remarks);
            Ok(())
        })
    }

    /// Run a schema-described event against the record at `key`.
    pub fn record_event(
        &self,
        schema: &RemarkSchema,
        key: &str,
        values: &[String],
    ) -> LedgerResult<()> {
        let remarks = schema.remarks(values)?;
        let count = remarks.len();
        match schema.target {
            EntityKind::Cow => {
                self.append_remarks::<Cow>(key, remarks)?;
            }
            EntityKind::Owner => {
                self.append_remarks::<Owner>(key, remarks)?;
            }
            other => return Err(LedgerError::UnknownType(other.to_string())),
        }
        info!(
            transaction = schema.transaction,
            key,
            remarks = count,
            "event recorded"
        );
        Ok(())
    }

    /// Append one free-form remark to a cow.
    pub fn add_remark(&self, cow_key: &str, key: &str, value: &str) -> LedgerResult<Cow> {
        let cow = self.append_remarks::<Cow>(cow_key, vec![Remark::new(key, value)])?;
        info!(cow = cow_key, remark = key, "remark added");
        Ok(cow)
    }
}
