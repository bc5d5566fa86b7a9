use std::collections::BTreeMap;

use crate::record::Money;

/// The aggregated outcome of one analysis run
///
/// Maps are ordered by key so that two runs over the same input produce
/// identical reports, including their serialized form.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Report {
    /// The grand total revenue across all months
    pub total_revenue: Money,
    /// Month key (`YYYY-MM`) to the month's aggregates
    pub monthly: BTreeMap<String, MonthSummary>,
    /// Month key to order-size statistics of the month's most popular item
    pub popularity: BTreeMap<String, PopularityStat>,
}

impl Report {
    /// The grand total revenue with grouped thousands, e.g. `1,234,567.5`
    pub fn formatted_revenue(&self) -> String {
        format_grouped(self.total_revenue)
    }

    /// Month key to the SKU with the highest cumulative quantity
    pub fn popular_items(&self) -> BTreeMap<&str, &str> {
        self.monthly
            .iter()
            .map(|(month, summary)| (month.as_str(), summary.max_popular_item.as_str()))
            .collect()
    }

    /// Month key to the SKU with the highest cumulative revenue
    pub fn revenue_items(&self) -> BTreeMap<&str, &str> {
        self.monthly
            .iter()
            .map(|(month, summary)| (month.as_str(), summary.max_revenue_item.as_str()))
            .collect()
    }
}

/// The aggregates of a single month
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct MonthSummary {
    /// Sum of all sale totals in the month
    pub revenue: Money,
    /// Sum of all sold quantities in the month
    pub total_quantity: u64,
    /// Per-SKU aggregates within the month
    pub items: BTreeMap<String, ItemSummary>,
    /// The SKU with the highest cumulative quantity
    /// Ties are kept by whichever SKU reached the quantity first
    pub max_popular_item: String,
    /// The SKU with the highest cumulative revenue
    /// Same tie rule as [`MonthSummary::max_popular_item`]
    pub max_revenue_item: String,
}

/// The aggregates of a single SKU within a single month
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ItemSummary {
    /// Sum of the quantities of all this SKU's sales in the month
    pub quantity: u64,
    /// Sum of the totals of all this SKU's sales in the month
    pub revenue: Money,
    /// The individual order quantities, collapsed to their sum
    pub orders: u64,
}

/// Order-size statistics of a month's most popular item
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PopularityStat {
    /// The month's most popular SKU
    pub item: String,
    /// The smallest single-order quantity of that SKU
    pub min_orders: u32,
    /// The largest single-order quantity of that SKU
    pub max_orders: u32,
    /// The arithmetic mean over the SKU's order quantities
    pub avg_orders: f64,
}

impl PopularityStat {
    /// Computes the statistics over a month's individual order quantities
    ///
    /// `orders` is never empty for a month that exists: its most popular item
    /// was set by at least one recorded sale.
    pub(crate) fn from_orders(item: String, orders: &[u32]) -> Self {
        debug_assert!(!orders.is_empty());
        let sum: u64 = orders.iter().copied().map(u64::from).sum();
        let avg_orders = match orders.len() {
            0 => 0.0,
            len => sum as f64 / len as f64,
        };

        Self {
            item,
            min_orders: orders.iter().copied().min().unwrap_or_default(),
            max_orders: orders.iter().copied().max().unwrap_or_default(),
            avg_orders,
        }
    }
}

/// Formats a monetary amount with thousands separators for display
fn format_grouped(amount: Money) -> String {
    let text = amount.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping_inserts_thousands_separators() {
        assert_eq!(format_grouped(Money::from_num(0)), "0");
        assert_eq!(format_grouped(Money::from_num(130)), "130");
        assert_eq!(format_grouped(Money::from_num(1000)), "1,000");
        assert_eq!(format_grouped(Money::from_num(987654)), "987,654");
        assert_eq!(format_grouped(Money::from_num(1234567)), "1,234,567");
    }

    #[test]
    fn grouping_keeps_the_fraction_untouched() {
        assert_eq!(format_grouped(Money::from_num(1234567.5)), "1,234,567.5");
        assert_eq!(format_grouped(Money::from_num(12.25)), "12.25");
    }

    #[test]
    fn popularity_stat_over_orders() {
        let stat = PopularityStat::from_orders("X".into(), &[2, 7, 3]);
        assert_eq!(stat.min_orders, 2);
        assert_eq!(stat.max_orders, 7);
        assert_eq!(stat.avg_orders, 4.0);
    }
}
