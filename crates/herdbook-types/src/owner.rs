//! Owner records and their subtype profiles.
//!
//! An owner is one of four custodians along the supply chain. All of them
//! share the same six base fields; the subtype-specific fields live in the
//! owner's [`RemarkTrail`] under the `registerOwner.` namespace, so the stored
//! shape is identical for every subtype. [`OwnerProfile`] is the typed view
//! over those extra fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::key::EntityKind;
use crate::record::Record;
use crate::remark::{Remark, RemarkTrail};

/// Namespace under which profile fields are written to the remark trail.
pub const PROFILE_NAMESPACE: &str = "registerOwner";

/// The four owner subtypes, selected by the owner identifier's prefix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OwnerKind {
    Farm,
    Slaughterhouse,
    Processor,
    Retailer,
}

impl OwnerKind {
    pub const ALL: [OwnerKind; 4] = [
        OwnerKind::Farm,
        OwnerKind::Slaughterhouse,
        OwnerKind::Processor,
        OwnerKind::Retailer,
    ];

    /// Identifier prefix for this subtype (`FARM0`, `SLAUGHTER3`, ...).
    pub const fn token(self) -> &'static str {
        match self {
            Self::Farm => "FARM",
            Self::Slaughterhouse => "SLAUGHTER",
            Self::Processor => "PROCESS",
            Self::Retailer => "SALE",
        }
    }

    /// Names of the subtype-specific fields, in argument order.
    pub const fn profile_fields(self) -> &'static [&'static str] {
        match self {
            Self::Farm => &[],
            Self::Slaughterhouse => &["slaughter_tel", "slaughter_reg_no"],
            Self::Processor => &["process_biz_no"],
            Self::Retailer => &["sale_biz_no"],
        }
    }

    /// Select the subtype from an owner identifier by strict prefix match.
    pub fn from_discriminator(id: &str) -> Result<Self, TypeError> {
        Self::ALL
            .into_iter()
            .find(|kind| id.starts_with(kind.token()))
            .ok_or_else(|| TypeError::UnknownOwnerKind(id.to_string()))
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Typed subtype-specific owner fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OwnerProfile {
    Farm,
    Slaughterhouse { tel: String, reg_no: String },
    Processor { biz_no: String },
    Retailer { biz_no: String },
}

impl OwnerProfile {
    pub fn kind(&self) -> OwnerKind {
        match self {
            Self::Farm => OwnerKind::Farm,
            Self::Slaughterhouse { .. } => OwnerKind::Slaughterhouse,
            Self::Processor { .. } => OwnerKind::Processor,
            Self::Retailer { .. } => OwnerKind::Retailer,
        }
    }

    /// Build a profile from positional values in [`OwnerKind::profile_fields`] order.
    pub fn from_fields(kind: OwnerKind, values: &[String]) -> Result<Self, TypeError> {
        let expected = kind.profile_fields().len();
        if values.len() != expected {
            return Err(TypeError::ProfileFields {
                kind: kind.token(),
                expected,
                actual: values.len(),
            });
        }
        Ok(match kind {
            OwnerKind::Farm => Self::Farm,
            OwnerKind::Slaughterhouse => Self::Slaughterhouse {
                tel: values[0].clone(),
                reg_no: values[1].clone(),
            },
            OwnerKind::Processor => Self::Processor {
                biz_no: values[0].clone(),
            },
            OwnerKind::Retailer => Self::Retailer {
                biz_no: values[0].clone(),
            },
        })
    }

    /// Field values in [`OwnerKind::profile_fields`] order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Farm => vec![],
            Self::Slaughterhouse { tel, reg_no } => vec![tel.as_str(), reg_no.as_str()],
            Self::Processor { biz_no } | Self::Retailer { biz_no } => vec![biz_no.as_str()],
        }
    }

    /// Flatten into namespaced remarks for storage.
    pub fn to_remarks(&self) -> Vec<Remark> {
        self.kind()
            .profile_fields()
            .iter()
            .zip(self.values())
            .map(|(field, value)| Remark::namespaced(PROFILE_NAMESPACE, field, value))
            .collect()
    }
}

/// A custodian record: farm, slaughterhouse, processor or retailer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    /// Subtype-prefixed identifier, e.g. `FARM0`.
    #[serde(rename = "Owner_id")]
    pub id: String,
    #[serde(rename = "Owner_nm")]
    pub name: String,
    #[serde(rename = "Owner_addr")]
    pub address: String,
    /// Livestock type, or `"Empty"` for subtypes that do not record one.
    #[serde(rename = "Livestock")]
    pub livestock: String,
    #[serde(rename = "Owner_user_nm")]
    pub manager_name: String,
    #[serde(rename = "Owner_user_birth")]
    pub manager_birth: String,
    #[serde(rename = "Remarks", default)]
    pub remarks: RemarkTrail,
}

impl Owner {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        livestock: impl Into<String>,
        manager_name: impl Into<String>,
        manager_birth: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            livestock: livestock.into(),
            manager_name: manager_name.into(),
            manager_birth: manager_birth.into(),
            remarks: RemarkTrail::new(),
        }
    }

    /// Append the profile's fields to the remark trail.
    pub fn with_profile(mut self, profile: &OwnerProfile) -> Self {
        self.remarks.append(profile.to_remarks());
        self
    }

    /// Subtype implied by the identifier prefix.
    pub fn kind(&self) -> Result<OwnerKind, TypeError> {
        OwnerKind::from_discriminator(&self.id)
    }

    /// Recover the typed profile from the remark trail.
    ///
    /// Returns `None` when the identifier has no known subtype prefix or a
    /// profile field is missing. When a field was written more than once the
    /// earliest value wins.
    pub fn profile(&self) -> Option<OwnerProfile> {
        let kind = self.kind().ok()?;
        let values = kind
            .profile_fields()
            .iter()
            .map(|field| {
                self.remarks
                    .first(&format!("{PROFILE_NAMESPACE}.{field}"))
                    .map(str::to_string)
            })
            .collect::<Option<Vec<_>>>()?;
        OwnerProfile::from_fields(kind, &values).ok()
    }
}

impl Record for Owner {
    const KIND: EntityKind = EntityKind::Owner;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slaughterhouse() -> Owner {
        Owner::new("SLAUGHTER0", "DoChuk1", "Jeonju", "C", "Lee Do Chuk", "500118").with_profile(
            &OwnerProfile::Slaughterhouse {
                tel: "063-111-2222".into(),
                reg_no: "1-7474-8700".into(),
            },
        )
    }

    #[test]
    fn kind_from_discriminator_prefix() {
        assert_eq!(OwnerKind::from_discriminator("FARM0").unwrap(), OwnerKind::Farm);
        assert_eq!(
            OwnerKind::from_discriminator("SLAUGHTER1").unwrap(),
            OwnerKind::Slaughterhouse
        );
        assert_eq!(OwnerKind::from_discriminator("PROCESS2").unwrap(), OwnerKind::Processor);
        assert_eq!(OwnerKind::from_discriminator("SALE3").unwrap(), OwnerKind::Retailer);
    }

    #[test]
    fn kind_rejects_embedded_tokens() {
        assert!(OwnerKind::from_discriminator("WHOLESALE1").is_err());
        assert!(OwnerKind::from_discriminator("farm0").is_err());
        assert!(OwnerKind::from_discriminator("").is_err());
    }

    #[test]
    fn profile_remarks_are_namespaced_in_field_order() {
        let owner = slaughterhouse();
        let keys: Vec<_> = owner.remarks.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["registerOwner.slaughter_tel", "registerOwner.slaughter_reg_no"]
        );
    }

    #[test]
    fn profile_round_trips_through_remarks() {
        let owner = slaughterhouse();
        assert_eq!(
            owner.profile(),
            Some(OwnerProfile::Slaughterhouse {
                tel: "063-111-2222".into(),
                reg_no: "1-7474-8700".into(),
            })
        );

        let farm = Owner::new("FARM0", "ChukLim1", "Iksan", "C", "Kim Duck Bae", "530118");
        assert_eq!(farm.profile(), Some(OwnerProfile::Farm));
        assert!(farm.remarks.is_empty());
    }

    #[test]
    fn profile_missing_field_is_none() {
        let owner = Owner::new("PROCESS0", "Gagong1", "PyeongTak", "Empty", "Park", "Empty");
        assert_eq!(owner.profile(), None);
    }

    #[test]
    fn from_fields_checks_count() {
        let err = OwnerProfile::from_fields(OwnerKind::Retailer, &[]).unwrap_err();
        assert!(matches!(err, TypeError::ProfileFields { expected: 1, actual: 0, .. }));
    }

    #[test]
    fn wire_names_are_preserved() {
        let owner = Owner::new("FARM0", "n", "a", "C", "m", "b");
        let json = String::from_utf8(owner.encode().unwrap()).unwrap();
        assert!(json.contains(r#""Owner_id":"FARM0""#));
        assert!(json.contains(r#""Owner_user_birth":"b""#));
        assert!(json.contains(r#""Remarks":[]"#));
    }

    #[test]
    fn decode_accepts_null_remarks() {
        let json = r#"{"Owner_id":"01","Owner_nm":"ChukLim1","Owner_addr":"Iksan","Livestock":"C","Owner_user_nm":"Kim","Owner_user_birth":"530118","Remarks":null}"#;
        let owner = Owner::decode(json.as_bytes()).unwrap();
        assert!(owner.remarks.is_empty());
    }

    #[test]
    fn decode_rejects_foreign_shape() {
        let json = r#"{"Id_no":"COW3","Rfid_no":"RFID0"}"#;
        assert!(matches!(
            Owner::decode(json.as_bytes()),
            Err(TypeError::Decode { kind: EntityKind::Owner, .. })
        ));
    }
}
