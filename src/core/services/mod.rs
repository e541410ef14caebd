pub mod budget_service;
pub mod import_service;
pub mod leaderboard_service;
pub mod summary_service;
pub mod tip_service;
pub mod transaction_service;

pub use budget_service::{BudgetReport, BudgetService};
pub use import_service::{ImportReport, ImportService};
pub use leaderboard_service::{Leaderboard, LeaderboardService};
pub use summary_service::{SummaryService, DEFAULT_COMPARISON_MONTHS, MAX_COMPARISON_MONTHS};
pub use tip_service::{TipService, TipThresholds};
pub use transaction_service::TransactionService;
