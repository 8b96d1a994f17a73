//! Ownership transfer and deletion.

use herdbook_store::KeyValueStore;
use herdbook_types::{Cow, EntityKind, Owner};
use tracing::{info, warn};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Herdbook;

impl<S: KeyValueStore> Herdbook<S> {
    /// Move the cow at `cow_key` to the owner stored at `to_key`.
    ///
    /// The cow's owner snapshot is replaced whole by the destination owner's
    /// current record; the cow's own remarks are untouched.
    ///
    /// `from_hint` names the owner the caller believes holds the cow. With
    /// the default configuration a hint that is missing or names someone else
    /// is logged and the transfer goes ahead. With `enforce_transfer_hint`
    /// set, the hinted owner must exist and its identifier must match the
    /// cow's current snapshot, or the transfer is rejected before any write.
    pub fn transfer_owner(&self, cow_key: &str, from_hint: &str, to_key: &str) -> LedgerResult<Cow> {
        let mut cow: Cow = self.load(cow_key)?;
        let destination: Owner = self.load(to_key)?;

        if self.config().enforce_transfer_hint {
            let claimed: Owner = self.load(from_hint)?;
            if claimed.id != cow.owner.id {
                warn!(
                    cow = cow_key,
                    current = %cow.owner.id,
                    claimed = %claimed.id,
                    "transfer rejected"
                );
                return Err(LedgerError::OwnerMismatch {
                    cow_key: cow_key.to_string(),
                    current: cow.owner.id,
                    claimed: claimed.id,
                });
            }
        } else {
            match self.load::<Owner>(from_hint) {
                Ok(claimed) if claimed.id != cow.owner.id => warn!(
                    cow = cow_key,
                    current = %cow.owner.id,
                    claimed = %claimed.id,
                    "transfer hint does not match current owner"
                ),
                Ok(_) => {}
                Err(LedgerError::Store(e)) => return Err(e.into()),
                Err(e) => warn!(cow = cow_key, hint = from_hint, error = %e, "transfer hint unresolved"),
            }
        }

        let previous = std::mem::take(&mut cow.owner.id);
        cow.transfer_to(&destination);
        self.save(cow_key, &cow)?;
        info!(
            cow = cow_key,
            from = %previous,
            hint = from_hint,
            to = %destination.id,
            "ownership transferred"
        );
        Ok(cow)
    }

    /// Remove the cow at `cow_key`.
    ///
    /// The stored bytes must decode as a cow. Tags, bundles and other records
    /// that mention the cow are left in place.
    pub fn delete_cow(&self, cow_key: &str) -> LedgerResult<()> {
        let cow: Cow = self.load(cow_key)?;
        if !self.store().delete(cow_key)? {
            return Err(LedgerError::not_found(EntityKind::Cow, cow_key));
        }
        info!(cow = cow_key, id_no = %cow.id_no, "cow deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use herdbook_store::InMemoryKvStore;
    use herdbook_types::{OwnerProfile, Remark};

    use crate::config::LedgerConfig;
    use crate::error::ErrorClass;
    use crate::registration::CowRegistration;

    fn populated(config: LedgerConfig) -> Herdbook<InMemoryKvStore> {
        let ledger = Herdbook::with_config(InMemoryKvStore::new(), config);
        ledger
            .register_owner(
                "OWNER0",
                Owner::new("FARM0", "ChukLim1", "Iksan", "C", "Kim Duck Bae", "530118"),
                &OwnerProfile::Farm,
            )
            .unwrap();
        ledger
            .register_owner(
                "OWNER1",
                Owner::new("SLAUGHTER1", "Iksan Abattoir", "Iksan", "Empty", "Park", "700101"),
                &OwnerProfile::Slaughterhouse {
                    tel: "063-850-0000".into(),
                    reg_no: "SL-77".into(),
                },
            )
            .unwrap();
        ledger
            .register_cow(
                "COW0",
                CowRegistration {
                    id_no: "180501-2".into(),
                    birth_date: "180501".into(),
                    sex: "F".into(),
                    father_id: "901027".into(),
                    mother_id: "910101".into(),
                    origin: "Korea Jeonbuk".into(),
                },
                "OWNER0",
            )
            .unwrap();
        ledger.add_remark("COW0", "addRemark", "healthy").unwrap();
        ledger
    }

    // -----------------------------------------------------------------------
    // Transfer
    // -----------------------------------------------------------------------

    #[test]
    fn transfer_replaces_snapshot_and_keeps_cow_remarks() {
        let ledger = populated(LedgerConfig::permissive());
        let before: Cow = ledger.load("COW0").unwrap();

        let cow = ledger.transfer_owner("COW0", "OWNER0", "OWNER1").unwrap();
        let new_owner: Owner = ledger.load("OWNER1").unwrap();

        assert_eq!(cow.owner, new_owner);
        assert_eq!(cow.remarks, before.remarks);
        let stored: Cow = ledger.load("COW0").unwrap();
        assert_eq!(stored, cow);
    }

    #[test]
    fn transfer_drops_previous_snapshot_remarks() {
        let ledger = populated(LedgerConfig::permissive());
        ledger
            .update::<Cow, _>("COW0", |c| {
                c.owner.remarks.push(Remark::new("stale", "x"));
                Ok(())
            })
            .unwrap();
        let cow = ledger.transfer_owner("COW0", "OWNER0", "OWNER1").unwrap();
        assert!(cow.owner.remarks.first("stale").is_none());
        assert_eq!(cow.owner.remarks.len(), 2);
    }

    #[test]
    fn permissive_transfer_ignores_bogus_hint() {
        let ledger = populated(LedgerConfig::permissive());
        let cow = ledger.transfer_owner("COW0", "OWNER42", "OWNER1").unwrap();
        assert_eq!(cow.owner.id, "SLAUGHTER1");
    }

    #[test]
    fn strict_transfer_rejects_wrong_hint() {
        let ledger = populated(LedgerConfig::strict());
        let before = ledger.store().get("COW0").unwrap();
        let err = ledger.transfer_owner("COW0", "OWNER1", "OWNER1").unwrap_err();
        assert!(matches!(
            err,
            LedgerError::OwnerMismatch { ref current, ref claimed, .. }
                if current == "FARM0" && claimed == "SLAUGHTER1"
        ));
        assert_eq!(err.class(), ErrorClass::Validation);
        assert_eq!(ledger.store().get("COW0").unwrap(), before);
    }

    #[test]
    fn strict_transfer_accepts_matching_hint() {
        let ledger = populated(LedgerConfig::strict());
        let cow = ledger.transfer_owner("COW0", "OWNER0", "OWNER1").unwrap();
        assert_eq!(cow.owner.id, "SLAUGHTER1");
    }

    #[test]
    fn transfer_to_missing_owner_is_not_found() {
        let ledger = populated(LedgerConfig::permissive());
        let err = ledger.transfer_owner("COW0", "OWNER0", "OWNER9").unwrap_err();
        assert_eq!(err.class(), ErrorClass::NotFound);
        let cow: Cow = ledger.load("COW0").unwrap();
        assert_eq!(cow.owner.id, "FARM0");
    }

    // -----------------------------------------------------------------------
    // Delete
    // -----------------------------------------------------------------------

    #[test]
    fn delete_removes_cow() {
        let ledger = populated(LedgerConfig::default());
        ledger.delete_cow("COW0").unwrap();
        assert!(ledger.store().get("COW0").unwrap().is_none());
    }

    #[test]
    fn delete_missing_is_not_found() {
        let ledger = populated(LedgerConfig::default());
        let err = ledger.delete_cow("COW7").unwrap_err();
        assert_eq!(err.class(), ErrorClass::NotFound);
    }

    #[test]
    fn delete_corrupt_is_refused() {
        let ledger = populated(LedgerConfig::default());
        ledger.store().put("COW5", b"{oops").unwrap();
        let err = ledger.delete_cow("COW5").unwrap_err();
        assert_eq!(err.class(), ErrorClass::CorruptRecord);
        assert!(ledger.store().exists("COW5").unwrap());
    }
}
