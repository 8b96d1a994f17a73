//! Sample data for a fresh ledger.

use herdbook_store::KeyValueStore;
use herdbook_types::{Cow, EntityKind, Owner, RecordKey, RemarkTrail};
use tracing::info;

use crate::error::LedgerResult;
use crate::ledger::{encode_at, Herdbook};

const OWNERS: [(&str, &str, &str, &str); 3] = [
    ("ChukLim1", "Iksan", "Kim Duck Bae", "530118"),
    ("ChukLim2", "Jeonju", "Kim Sam Sun", "520202"),
    ("ChukLim3", "Daejeon", "Kim Young Mi", "610118"),
];

const COWS: [(&str, &str, &str); 3] = [
    ("180501-2", "180501", "F"),
    ("180502-1", "180502", "M"),
    ("180503-1", "180503", "M"),
];

/// Three farm owners and one cow held by each.
pub fn sample_records() -> Vec<(RecordKey, Owner, RecordKey, Cow)> {
    OWNERS
        .iter()
        .zip(COWS.iter())
        .enumerate()
        .map(|(i, (&(name, addr, manager, birth), &(id_no, born, sex)))| {
            let owner = Owner::new(format!("FARM{i}"), name, addr, "C", manager, birth);
            let cow = Cow {
                id_no: id_no.to_string(),
                birth_date: born.to_string(),
                sex: sex.to_string(),
                father_id: "901027".to_string(),
                mother_id: "910101".to_string(),
                origin: "Korea Jeonbuk".to_string(),
                owner: owner.clone(),
                remarks: RemarkTrail::new(),
            };
            (
                RecordKey::seeded(EntityKind::Owner, i),
                owner,
                RecordKey::seeded(EntityKind::Cow, i),
                cow,
            )
        })
        .collect()
}

impl<S: KeyValueStore> Herdbook<S> {
    /// Write the sample owners and cows under `OWNER0..` and `COW0..`.
    ///
    /// Existing records at those keys are overwritten.
    pub fn seed(&self) -> LedgerResult<()> {
        let records = sample_records();
        let mut batch = Vec::with_capacity(records.len() * 2);
        for (owner_key, owner, _, _) in &records {
            batch.push((owner_key.to_string(), encode_at(owner_key.as_str(), owner)?));
        }
        for (_, _, cow_key, cow) in &records {
            batch.push((cow_key.to_string(), encode_at(cow_key.as_str(), cow)?));
        }
        self.store().put_batch(&batch)?;
        info!(owners = records.len(), cows = records.len(), "ledger seeded");
        Ok(())
    }
}
