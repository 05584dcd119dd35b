pub mod earnings;
pub mod fundamentals;

pub use earnings::EarningsRecord;
pub use fundamentals::{IncomeStatementRecord, MarketCap, MarketCapRecord, Period};
