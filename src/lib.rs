pub use self::{
    analyzer::SalesAnalyzer,
    record::{Money, Sale, SaleError},
    report::{ItemSummary, MonthSummary, PopularityStat, Report},
};

mod analyzer;
mod record;
mod report;
