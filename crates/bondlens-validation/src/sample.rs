//! Built-in demonstration portfolio.

use crate::record::{BondRecord, BondTable};

/// Eight bonds across three funds, all $1,000 face and semi-annual.
#[must_use]
pub fn sample_table() -> BondTable {
    let rows = [
        ("Fund_A", "Treasury 5Y", 5.0, 5.0, 1044.52, 10.0),
        ("Fund_A", "Corporate 10Y", 6.0, 10.0, 1035.66, 5.0),
        ("Fund_B", "Treasury 3Y", 3.0, 3.0, 986.50, 15.0),
        ("Fund_B", "Municipal 7Y", 4.5, 7.0, 1018.25, 8.0),
        ("Fund_C", "Corporate 5Y", 5.5, 5.0, 1052.30, 12.0),
        ("Fund_C", "Treasury 10Y", 4.0, 10.0, 1000.00, 6.0),
        ("Fund_A", "Municipal 5Y", 4.2, 5.0, 1028.45, 8.0),
        ("Fund_B", "Corporate 3Y", 3.5, 3.0, 995.20, 10.0),
    ];

    BondTable::from_records(
        rows.into_iter()
            .map(|(fund, name, coupon, years, price, quantity)| {
                BondRecord::new(Some(fund), name, 1000.0, coupon, years, price, quantity, 2.0)
            })
            .collect(),
    )
}
