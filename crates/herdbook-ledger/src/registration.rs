//! Register-style transactions.
//!
//! Registration is an unconditional upsert under the caller-chosen key.
//! Transactions that also write a side record (HACCP, RFID, bundle) load and
//! patch their target first, then write both records in one batch.

use herdbook_store::KeyValueStore;
use herdbook_types::{
    Bundle, BundleStage, Cow, Haccp, Owner, OwnerKind, OwnerProfile, RemarkTrail, TagAttachment,
    TypeError,
};
use tracing::info;

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::{Annotated, Herdbook};
use crate::remarks::{HACCP_LINK, RFID_LINK};

/// Identity fields of a cow being registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CowRegistration {
    pub id_no: String,
    pub birth_date: String,
    pub sex: String,
    pub father_id: String,
    pub mother_id: String,
    pub origin: String,
}

impl CowRegistration {
    /// Build the cow record around a snapshot of `owner`.
    pub fn into_cow(self, owner: Owner) -> Cow {
        Cow {
            id_no: self.id_no,
            birth_date: self.birth_date,
            sex: self.sex,
            father_id: self.father_id,
            mother_id: self.mother_id,
            origin: self.origin,
            owner,
            remarks: RemarkTrail::new(),
        }
    }
}

impl<S: KeyValueStore> Herdbook<S> {
    /// Register a cow under `key`, held by the owner stored at `owner_key`.
    ///
    /// The owner must already exist; nothing is written otherwise. The cow
    /// embeds a full copy of the owner, remark trail included.
    pub fn register_cow(
        &self,
        key: &str,
        registration: CowRegistration,
        owner_key: &str,
    ) -> LedgerResult<Cow> {
        let owner: Owner = self.load(owner_key)?;
        let cow = registration.into_cow(owner);
        self.save(key, &cow)?;
        info!(key, owner = owner_key, id_no = %cow.id_no, "cow registered");
        Ok(cow)
    }

    /// Register an owner under `key` with its subtype profile.
    ///
    /// The profile's subtype must be the one selected by the owner
    /// identifier's prefix.
    pub fn register_owner(
        &self,
        key: &str,
        owner: Owner,
        profile: &OwnerProfile,
    ) -> LedgerResult<Owner> {
        let kind = owner_kind(&owner.id)?;
        if kind != profile.kind() {
            return Err(LedgerError::UnknownDiscriminator(owner.id));
        }
        let owner = owner.with_profile(profile);
        self.save(key, &owner)?;
        info!(key, owner_id = %owner.id, kind = %kind, "owner registered");
        Ok(owner)
    }

    /// Store a HACCP certificate and note it on the certified owner.
    pub fn register_haccp(
        &self,
        haccp_key: &str,
        owner_key: &str,
        haccp: Haccp,
    ) -> LedgerResult<Owner> {
        let mut owner: Owner = self.load(owner_key)?;
        let link = HACCP_LINK.remarks(&[haccp_key.to_string(), haccp.validity_date.clone()])?;
        owner.remarks_mut().append(link);
        self.save_linked(haccp_key, &haccp, owner_key, &owner)?;
        info!(haccp = haccp_key, owner = owner_key, "haccp registered");
        Ok(owner)
    }

    /// Attach the RFID tag `tag_key` to the cow at `cow_key`.
    pub fn register_rfid(&self, cow_key: &str, tag_key: &str) -> LedgerResult<Cow> {
        let mut cow: Cow = self.load(cow_key)?;
        let tag = TagAttachment {
            cow_key: cow_key.to_string(),
            tag_id: tag_key.to_string(),
        };
        let link = RFID_LINK.remarks(&[tag.cow_key.clone(), tag.tag_id.clone()])?;
        cow.remarks_mut().append(link);
        self.save_linked(tag_key, &tag, cow_key, &cow)?;
        info!(cow = cow_key, tag = tag_key, "rfid registered");
        Ok(cow)
    }

    /// Store a package lot and flatten it onto its source cow.
    pub fn register_bundle(
        &self,
        stage: BundleStage,
        bundle_key: &str,
        bundle: Bundle,
    ) -> LedgerResult<Cow> {
        let cow_key = bundle.cow_key.clone();
        let mut cow: Cow = self.load(&cow_key)?;
        cow.remarks_mut().append(bundle.to_remarks(stage));
        self.save_linked(bundle_key, &bundle, &cow_key, &cow)?;
        info!(
            bundle = bundle_key,
            cow = %cow_key,
            stage = stage.namespace(),
            "bundle registered"
        );
        Ok(cow)
    }
}

/// Owner subtype selected by an identifier, as a ledger error.
pub(crate) fn owner_kind(id: &str) -> LedgerResult<OwnerKind> {
    OwnerKind::from_discriminator(id).map_err(|_| LedgerError::UnknownDiscriminator(id.to_string()))
}

/// Typed profile from positional extra fields, as a ledger error.
pub(crate) fn owner_profile(
    kind: OwnerKind,
    values: &[String],
    transaction: &'static str,
) -> LedgerResult<OwnerProfile> {
    OwnerProfile::from_fields(kind, values).map_err(|e| match e {
        TypeError::ProfileFields {
            expected, actual, ..
        } => LedgerError::Arity {
            transaction,
            expected: expected + 7,
            actual: actual + 7,
        },
        other => LedgerError::UnknownDiscriminator(other.to_string()),
    })
}
