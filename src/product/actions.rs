/// Custom actions for Product entities.
///
/// These are the only ways stock moves. Each is checked against the current
/// level so stock never drops below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductAction {
    /// Reports the current stock level without modifying it.
    CheckStock,
    /// Removes the given quantity from stock.
    ///
    /// # Errors
    /// Fails if the amount is zero or exceeds available stock.
    ReduceStock(u32),
    /// Adds the given quantity to stock.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction.
/// Each carries the stock level after the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductActionResult {
    StockLevel(u32),
    Reduced(u32),
    Restocked(u32),
}

impl ProductActionResult {
    pub fn stock(self) -> u32 {
        match self {
            ProductActionResult::StockLevel(stock)
            | ProductActionResult::Reduced(stock)
            | ProductActionResult::Restocked(stock) => stock,
        }
    }
}
