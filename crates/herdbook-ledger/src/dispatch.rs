//! Name-based transaction routing.
//!
//! [`Herdbook::invoke`] is the caller-facing surface: a transaction name plus
//! positional string arguments in, an [`Outcome`] or a [`LedgerError`] out.
//! Argument counts are checked here before any handler runs.

use std::fmt;
use std::str::FromStr;

use herdbook_store::KeyValueStore;
use herdbook_types::{Bundle, BundleStage, Haccp, Owner};
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::ledger::Herdbook;
use crate::registration::{owner_kind, owner_profile, CowRegistration};
use crate::remarks::{self, RemarkSchema};

/// Every transaction the ledger accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transaction {
    InitLedger,
    RegisterCow,
    RegisterOwner,
    RegisterHaccp,
    RegisterRfid,
    RegisterInProcessesBundleNum,
    RegisterInSalesBundleNum,
    ChangeCowOwner,
    AddRemark,
    AddBtVaccine,
    AddFamdVaccine,
    AddInfoDead,
    AddInfoDeliver,
    AddInfoInspect,
    AddInfoGradeResult,
    AddInfoInProcessesReportPurchase,
    AddInfoReportPacking,
    AddInfoReportSale,
    AddInfoInSalesReportPurchase,
    AddAut,
    DeleteCow,
    Query,
    QueryAllCows,
    QueryAllOwners,
}

impl Transaction {
    pub const ALL: [Transaction; 24] = [
        Transaction::InitLedger,
        Transaction::RegisterCow,
        Transaction::RegisterOwner,
        Transaction::RegisterHaccp,
        Transaction::RegisterRfid,
        Transaction::RegisterInProcessesBundleNum,
        Transaction::RegisterInSalesBundleNum,
        Transaction::ChangeCowOwner,
        Transaction::AddRemark,
        Transaction::AddBtVaccine,
        Transaction::AddFamdVaccine,
        Transaction::AddInfoDead,
        Transaction::AddInfoDeliver,
        Transaction::AddInfoInspect,
        Transaction::AddInfoGradeResult,
        Transaction::AddInfoInProcessesReportPurchase,
        Transaction::AddInfoReportPacking,
        Transaction::AddInfoReportSale,
        Transaction::AddInfoInSalesReportPurchase,
        Transaction::AddAut,
        Transaction::DeleteCow,
        Transaction::Query,
        Transaction::QueryAllCows,
        Transaction::QueryAllOwners,
    ];

    /// Wire name, as sent by callers.
    pub const fn name(self) -> &'static str {
        match self {
            Self::InitLedger => "initLedger",
            Self::RegisterCow => "registerCow",
            Self::RegisterOwner => "registerOwner",
            Self::RegisterHaccp => "registerHACCP",
            Self::RegisterRfid => "registerRFID",
            Self::RegisterInProcessesBundleNum => "registerInProcessesBundleNum",
            Self::RegisterInSalesBundleNum => "registerInSalesBundleNum",
            Self::ChangeCowOwner => "changeCowOwner",
            Self::AddRemark => "addRemark",
            Self::AddBtVaccine => "addBTVaccine",
            Self::AddFamdVaccine => "addFAMDVaccine",
            Self::AddInfoDead => "addInfoDead",
            Self::AddInfoDeliver => "addInfoDeliver",
            Self::AddInfoInspect => "addInfoInspect",
            Self::AddInfoGradeResult => "addInfoGradeResult",
            Self::AddInfoInProcessesReportPurchase => "addInfoInProcessesReportPurchase",
            Self::AddInfoReportPacking => "addInfoReportPacking",
            Self::AddInfoReportSale => "addInfoReportSale",
            Self::AddInfoInSalesReportPurchase => "addInfoInSalesReportPurchase",
            Self::AddAut => "addAut",
            Self::DeleteCow => "deleteCow",
            Self::Query => "query",
            Self::QueryAllCows => "queryAllCows",
            Self::QueryAllOwners => "queryAllOwners",
        }
    }

    /// Schema for transactions that only append remarks.
    pub fn event_schema(self) -> Option<&'static RemarkSchema> {
        match self {
            Self::AddBtVaccine => Some(&remarks::BT_VACCINE),
            Self::AddFamdVaccine => Some(&remarks::FAMD_VACCINE),
            Self::AddInfoDead => Some(&remarks::INFO_DEAD),
            Self::AddInfoDeliver => Some(&remarks::INFO_DELIVER),
            Self::AddInfoInspect => Some(&remarks::INFO_INSPECT),
            Self::AddInfoGradeResult => Some(&remarks::INFO_GRADE_RESULT),
            Self::AddInfoInProcessesReportPurchase => Some(&remarks::PROCESSES_REPORT_PURCHASE),
            Self::AddInfoReportPacking => Some(&remarks::REPORT_PACKING),
            Self::AddInfoReportSale => Some(&remarks::REPORT_SALE),
            Self::AddInfoInSalesReportPurchase => Some(&remarks::SALES_REPORT_PURCHASE),
            Self::AddAut => Some(&remarks::AUTHENTICATION),
            Self::InitLedger
            | Self::RegisterCow
            | Self::RegisterOwner
            | Self::RegisterHaccp
            | Self::RegisterRfid
            | Self::RegisterInProcessesBundleNum
            | Self::RegisterInSalesBundleNum
            | Self::ChangeCowOwner
            | Self::AddRemark
            | Self::DeleteCow
            | Self::Query
            | Self::QueryAllCows
            | Self::QueryAllOwners => None,
        }
    }

    /// Required argument count, or `None` when it depends on the arguments.
    pub fn arity(self) -> Option<usize> {
        match self {
            Self::RegisterOwner => None,
            Self::InitLedger | Self::QueryAllCows | Self::QueryAllOwners => Some(0),
            Self::DeleteCow => Some(1),
            Self::RegisterRfid | Self::Query => Some(2),
            Self::ChangeCowOwner | Self::AddRemark => Some(3),
            Self::RegisterHaccp => Some(7),
            Self::RegisterCow
            | Self::RegisterInProcessesBundleNum
            | Self::RegisterInSalesBundleNum => Some(8),
            Self::AddBtVaccine
            | Self::AddFamdVaccine
            | Self::AddInfoDead
            | Self::AddInfoDeliver
            | Self::AddInfoInspect
            | Self::AddInfoGradeResult
            | Self::AddInfoInProcessesReportPurchase
            | Self::AddInfoReportPacking
            | Self::AddInfoReportSale
            | Self::AddInfoInSalesReportPurchase
            | Self::AddAut => self.event_schema().map(RemarkSchema::arity),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Transaction {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| LedgerError::UnknownTransaction(s.to_string()))
    }
}

/// Successful result of an invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The transaction applied; nothing to return.
    Done,
    /// Query result bytes.
    Payload(Vec<u8>),
    /// A point query found nothing at the key.
    Absent,
}

impl Outcome {
    /// Bytes handed back to the caller. `Done` and `Absent` are empty.
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Payload(bytes) => bytes,
            Self::Done | Self::Absent => Vec::new(),
        }
    }
}

fn expect_arity(transaction: Transaction, expected: usize, args: &[String]) -> LedgerResult<()> {
    if args.len() != expected {
        return Err(LedgerError::Arity {
            transaction: transaction.name(),
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

impl<S: KeyValueStore> Herdbook<S> {
    /// Run the transaction called `name` with positional `args`.
    pub fn invoke(&self, name: &str, args: &[String]) -> LedgerResult<Outcome> {
        let transaction: Transaction = name.parse()?;
        debug!(%transaction, args = args.len(), "invoke");
        if let Some(expected) = transaction.arity() {
            expect_arity(transaction, expected, args)?;
        }

        let outcome = match transaction {
            Transaction::InitLedger => {
                self.seed()?;
                Outcome::Done
            }
            Transaction::RegisterCow => {
                let registration = CowRegistration {
                    id_no: args[1].clone(),
                    birth_date: args[2].clone(),
                    sex: args[3].clone(),
                    father_id: args[4].clone(),
                    mother_id: args[5].clone(),
                    origin: args[6].clone(),
                };
                self.register_cow(&args[0], registration, &args[7])?;
                Outcome::Done
            }
            Transaction::RegisterOwner => {
                let id = args.get(1).ok_or(LedgerError::Arity {
                    transaction: transaction.name(),
                    expected: 7,
                    actual: args.len(),
                })?;
                let kind = owner_kind(id)?;
                let expected = 7 + kind.profile_fields().len();
                expect_arity(transaction, expected, args)?;
                let profile = owner_profile(kind, &args[7..], transaction.name())?;
                let owner = Owner::new(
                    id.as_str(),
                    args[2].as_str(),
                    args[3].as_str(),
                    args[4].as_str(),
                    args[5].as_str(),
                    args[6].as_str(),
                );
                self.register_owner(&args[0], owner, &profile)?;
                Outcome::Done
            }
            Transaction::RegisterHaccp => {
                let haccp = Haccp {
                    facility_id: args[2].clone(),
                    facility_name: args[3].clone(),
                    address: args[4].clone(),
                    apply_item: args[5].clone(),
                    validity_date: args[6].clone(),
                };
                self.register_haccp(&args[0], &args[1], haccp)?;
                Outcome::Done
            }
            Transaction::RegisterRfid => {
                self.register_rfid(&args[0], &args[1])?;
                Outcome::Done
            }
            Transaction::RegisterInProcessesBundleNum | Transaction::RegisterInSalesBundleNum => {
                let stage = if transaction == Transaction::RegisterInSalesBundleNum {
                    BundleStage::Sales
                } else {
                    BundleStage::Processing
                };
                let bundle = Bundle {
                    cow_key: args[1].clone(),
                    barcode_id: args[2].clone(),
                    package_date: args[3].clone(),
                    part: args[4].clone(),
                    weight: args[5].clone(),
                    purchase_name: args[6].clone(),
                    purchase_biz_no: args[7].clone(),
                };
                self.register_bundle(stage, &args[0], bundle)?;
                Outcome::Done
            }
            Transaction::ChangeCowOwner => {
                self.transfer_owner(&args[0], &args[1], &args[2])?;
                Outcome::Done
            }
            Transaction::AddRemark => {
                self.add_remark(&args[0], &args[1], &args[2])?;
                Outcome::Done
            }
            Transaction::DeleteCow => {
                self.delete_cow(&args[0])?;
                Outcome::Done
            }
            Transaction::Query => match self.query(&args[0], &args[1])? {
                Some(bytes) => Outcome::Payload(bytes),
                None => Outcome::Absent,
            },
            Transaction::QueryAllCows => Outcome::Payload(self.query_all_cows()?),
            Transaction::QueryAllOwners => Outcome::Payload(self.query_all_owners()?),
            Transaction::AddBtVaccine => self.event(&remarks::BT_VACCINE, args)?,
            Transaction::AddFamdVaccine => self.event(&remarks::FAMD_VACCINE, args)?,
            Transaction::AddInfoDead => self.event(&remarks::INFO_DEAD, args)?,
            Transaction::AddInfoDeliver => self.event(&remarks::INFO_DELIVER, args)?,
            Transaction::AddInfoInspect => self.event(&remarks::INFO_INSPECT, args)?,
            Transaction::AddInfoGradeResult => self.event(&remarks::INFO_GRADE_RESULT, args)?,
            Transaction::AddInfoInProcessesReportPurchase => {
                self.event(&remarks::PROCESSES_REPORT_PURCHASE, args)?
            }
            Transaction::AddInfoReportPacking => self.event(&remarks::REPORT_PACKING, args)?,
            Transaction::AddInfoReportSale => self.event(&remarks::REPORT_SALE, args)?,
            Transaction::AddInfoInSalesReportPurchase => {
                self.event(&remarks::SALES_REPORT_PURCHASE, args)?
            }
            Transaction::AddAut => self.event(&remarks::AUTHENTICATION, args)?,
        };
        info!(%transaction, "transaction applied");
        Ok(outcome)
    }

    /// Append the remarks of one event; `args[0]` is the target key.
    fn event(&self, schema: &RemarkSchema, args: &[String]) -> LedgerResult<Outcome> {
        self.record_event(schema, &args[0], &args[1..])?;
        Ok(Outcome::Done)
    }
}
