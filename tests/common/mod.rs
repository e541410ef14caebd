#![allow(dead_code)]

use std::{
    path::PathBuf,
    str::FromStr,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Local, TimeZone, Utc};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;
use trackr_core::{
    core::{Clock, FixedClock, Session},
    domain::{Category, Transaction, TransactionKind, Username},
    storage::{JsonStorage, RecordStore},
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Fresh directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// JSON store rooted in an isolated directory.
pub fn setup_store() -> (Arc<JsonStorage>, PathBuf) {
    let base = temp_base();
    let store = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    (Arc::new(store), base)
}

pub fn dec(raw: &str) -> Decimal {
    Decimal::from_str(raw).expect("decimal literal")
}

/// Noon on the given local calendar day.
pub fn local_noon(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Local
        .with_ymd_and_hms(year, month, day, 12, 0, 0)
        .single()
        .expect("unambiguous local time")
        .with_timezone(&Utc)
}

pub fn fixed_clock(year: i32, month: u32, day: u32) -> Arc<dyn Clock> {
    Arc::new(FixedClock(local_noon(year, month, day)))
}

pub fn txn(
    kind: TransactionKind,
    amount: &str,
    category: Category,
    at: DateTime<Utc>,
) -> Transaction {
    Transaction::new(kind, dec(amount), category, "", at).expect("valid transaction")
}

pub fn open_session(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>, name: &str) -> Session {
    Session::open(store, clock, Username::parse(name).expect("username")).expect("open session")
}
