use fixed::types::U51F13;

/// The monetary amount of a sale
///
/// Amounts are unsigned fixed-point numbers and are parsed from / rendered as
/// plain decimal strings (`serde-str`).
pub type Money = U51F13;

/// Possible errors to occur while interpreting a sale record
#[derive(Debug, thiserror::Error)]
pub enum SaleError {
    #[error("the date {0:?} does not start with a valid YYYY-MM month")]
    InvalidMonth(String),
}

/// A single sale
///
/// Sales are parsed from one CSV row each. The `total_price` is the monetary
/// total of the whole transaction, not a unit price.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct Sale {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "SKU")]
    sku: String,
    #[serde(rename = "Quantity")]
    quantity: u32,
    #[serde(rename = "Total Price")]
    total_price: Money,
}

impl Sale {
    /// Creates a sale from already-parsed values
    pub fn new(
        date: impl Into<String>,
        sku: impl Into<String>,
        quantity: u32,
        total_price: Money,
    ) -> Self {
        Self {
            date: date.into(),
            sku: sku.into(),
            quantity,
            total_price,
        }
    }

    /// The calendar date of the sale, `YYYY-MM-DD`
    pub fn date(&self) -> &str {
        &self.date
    }

    /// The identifier of the sold item
    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// The number of units sold in this transaction
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// The monetary total of this transaction
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// The `YYYY-MM` month this sale belongs to
    ///
    /// Only the first seven bytes of the date are used. They must be four
    /// digits, a dash, and a two digit month between 01 and 12.
    pub fn month(&self) -> Result<&str, SaleError> {
        let bytes = self.date.as_bytes();
        if bytes.len() < 7
            || !bytes[..4].iter().all(u8::is_ascii_digit)
            || bytes[4] != b'-'
            || !bytes[5..7].iter().all(u8::is_ascii_digit)
        {
            return Err(SaleError::InvalidMonth(self.date.clone()));
        }

        match (bytes[5] - b'0') * 10 + (bytes[6] - b'0') {
            // the checked prefix is pure ASCII, so slicing cannot split a char
            1..=12 => Ok(&self.date[..7]),
            _ => Err(SaleError::InvalidMonth(self.date.clone())),
        }
    }
}
