//! Pre-built Xetra report data.

use crate::error::Result;
use crate::table::Table;
use serde::{Deserialize, Serialize};

/// One row of a Xetra trading report (one instrument, one minute).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct XetraRecord {
    #[serde(rename = "ISIN")]
    pub isin: String,
    pub mnemonic: String,
    pub date: String,
    pub time: String,
    pub start_price: f64,
    pub max_price: f64,
    pub min_price: f64,
    pub end_price: f64,
    pub traded_volume: i64,
    pub number_of_trades: i64,
}

/// A report file as it appears in the source bucket.
///
/// # Example
///
/// ```
/// use xetra::testing::sample_report_csv;
///
/// assert!(sample_report_csv().starts_with("ISIN,Mnemonic"));
/// ```
#[must_use]
pub fn sample_report_csv() -> &'static str {
    "ISIN,Mnemonic,Date,Time,StartPrice,MaxPrice,MinPrice,EndPrice,TradedVolume,NumberOfTrades\n\
     AT0000A0E9W5,SANT,2022-12-31,08:00,14.76,14.76,14.76,14.76,4414,2\n\
     DE000A0DJ6J9,S92,2022-12-31,08:00,18.18,18.2,18.1,18.1,2233,8\n\
     DE000A0D6554,NDX1,2022-12-31,08:01,15.22,15.3,15.22,15.3,725,3\n"
}

/// The rows of [`sample_report_csv`], typed.
#[must_use]
pub fn sample_report_records() -> Vec<XetraRecord> {
    vec![
        XetraRecord {
            isin: "AT0000A0E9W5".to_string(),
            mnemonic: "SANT".to_string(),
            date: "2022-12-31".to_string(),
            time: "08:00".to_string(),
            start_price: 14.76,
            max_price: 14.76,
            min_price: 14.76,
            end_price: 14.76,
            traded_volume: 4414,
            number_of_trades: 2,
        },
        XetraRecord {
            isin: "DE000A0DJ6J9".to_string(),
            mnemonic: "S92".to_string(),
            date: "2022-12-31".to_string(),
            time: "08:00".to_string(),
            start_price: 18.18,
            max_price: 18.2,
            min_price: 18.1,
            end_price: 18.1,
            traded_volume: 2233,
            number_of_trades: 8,
        },
        XetraRecord {
            isin: "DE000A0D6554".to_string(),
            mnemonic: "NDX1".to_string(),
            date: "2022-12-31".to_string(),
            time: "08:01".to_string(),
            start_price: 15.22,
            max_price: 15.3,
            min_price: 15.22,
            end_price: 15.3,
            traded_volume: 725,
            number_of_trades: 3,
        },
    ]
}

/// [`sample_report_records`] as a typed table.
///
/// # Errors
/// Returns an error if the records cannot be mapped to Arrow.
pub fn sample_report_table() -> Result<Table> {
    Table::from_records(&sample_report_records())
}
