pub mod category;
pub mod common;
pub mod limits;
pub mod period;
pub mod summary;
pub mod transaction;
pub mod user;

pub use category::Category;
pub use common::{format_money, format_money_with, round_currency, Displayable};
pub use limits::LimitsMap;
pub use period::MonthKey;
pub use summary::{
    LeaderboardEntry, MonthlyComparison, PeriodSummary, Tip, TipMode, TipSeverity,
};
pub use transaction::{Transaction, TransactionEdit, TransactionKind};
pub use user::{UserProfile, Username};
