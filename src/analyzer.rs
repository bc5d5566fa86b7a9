use std::collections::{BTreeMap, HashMap};

use crate::record::{Money, Sale, SaleError};
use crate::report::{ItemSummary, MonthSummary, PopularityStat, Report};

/// The central analyzer used for aggregating all sales
///
/// This will automatically create month and item accumulators on the fly as
/// sales for new months or SKUs come in. Feed it every sale once via
/// [`SalesAnalyzer::handle_sale`], then turn it into the final [`Report`]
/// with [`SalesAnalyzer::into_report`].
#[derive(Debug, Default)]
pub struct SalesAnalyzer {
    /// The running grand total over all months
    total_revenue: Money,
    /// A map of all months seen so far, keyed by their `YYYY-MM` key
    months: HashMap<String, MonthAccumulator>,
}

/// The running aggregates of one month
#[derive(Debug, Default)]
struct MonthAccumulator {
    revenue: Money,
    total_quantity: u64,
    items: HashMap<String, ItemAccumulator>,
    /// The SKU currently leading by cumulative quantity
    max_popular_item: Option<String>,
    /// The SKU currently leading by cumulative revenue
    max_revenue_item: Option<String>,
}

/// The running aggregates of one SKU within one month
#[derive(Debug, Default)]
struct ItemAccumulator {
    quantity: u64,
    revenue: Money,
    /// The individual order quantities in arrival order
    /// Kept until finalization to compute the popularity statistics
    orders: Vec<u32>,
}

impl SalesAnalyzer {
    /// Creates a new, empty sales analyzer
    pub fn new() -> Self {
        Self {
            total_revenue: Money::from_num(0),
            months: HashMap::new(),
        }
    }

    /// Processes one sale and updates all running aggregates
    ///
    /// A sale whose date does not carry a valid `YYYY-MM` month prefix is
    /// rejected without touching any aggregate.
    pub fn handle_sale(&mut self, sale: Sale) -> Result<(), SaleError> {
        let month = sale.month()?.to_owned();

        self.total_revenue += sale.total_price();

        let acc = self.months.entry(month).or_default();
        acc.revenue += sale.total_price();
        acc.total_quantity += u64::from(sale.quantity());

        let item = acc.items.entry(sale.sku().to_owned()).or_default();
        item.quantity += u64::from(sale.quantity());
        item.revenue += sale.total_price();
        item.orders.push(sale.quantity());
        let (quantity, revenue) = (item.quantity, item.revenue);

        // Running maxima. Only a strictly greater cumulative value unseats
        // the incumbent, so on a tie the SKU that reached the value first
        // keeps the lead.
        let leader = acc
            .max_popular_item
            .as_ref()
            .and_then(|sku| acc.items.get(sku));
        if leader.map_or(true, |best| quantity > best.quantity) {
            acc.max_popular_item = Some(sale.sku().to_owned());
        }

        let leader = acc
            .max_revenue_item
            .as_ref()
            .and_then(|sku| acc.items.get(sku));
        if leader.map_or(true, |best| revenue > best.revenue) {
            acc.max_revenue_item = Some(sale.sku().to_owned());
        }

        Ok(())
    }

    /// Finalizes the accumulated state into the report
    ///
    /// Computes the per-month popularity statistics and collapses the
    /// per-order quantity lists into their sums.
    pub fn into_report(self) -> Report {
        let mut monthly = BTreeMap::new();
        let mut popularity = BTreeMap::new();

        for (month, acc) in self.months {
            // a month accumulator only exists after at least one sale,
            // which also sets both incumbents
            let (Some(max_popular_item), Some(max_revenue_item)) =
                (acc.max_popular_item, acc.max_revenue_item)
            else {
                continue;
            };

            if let Some(item) = acc.items.get(&max_popular_item) {
                popularity.insert(
                    month.clone(),
                    PopularityStat::from_orders(max_popular_item.clone(), &item.orders),
                );
            }

            let items = acc
                .items
                .into_iter()
                .map(|(sku, item)| {
                    let summary = ItemSummary {
                        quantity: item.quantity,
                        revenue: item.revenue,
                        orders: item.orders.into_iter().map(u64::from).sum(),
                    };
                    (sku, summary)
                })
                .collect();

            monthly.insert(
                month,
                MonthSummary {
                    revenue: acc.revenue,
                    total_quantity: acc.total_quantity,
                    items,
                    max_popular_item,
                    max_revenue_item,
                },
            );
        }

        Report {
            total_revenue: self.total_revenue,
            monthly,
            popularity,
        }
    }
}
