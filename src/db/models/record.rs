use serde::Deserialize;
use serde_json::{Map, Value};

pub const COMPANY_NAME: &str = "Company Name";
pub const INDUSTRY: &str = "Industry";
pub const LOCATION: &str = "Location";
pub const MARKET_CAPITALIZATION: &str = "Market Capitalization";

/// Descriptive columns, compared as strings
pub const TEXT_FIELDS: [&str; 3] = [COMPANY_NAME, INDUSTRY, LOCATION];

/// Financial metric columns, compared numerically
pub const METRIC_FIELDS: [&str; 15] = [
    MARKET_CAPITALIZATION,
    "Revenue (in millions)",
    "EBITDA (in millions)",
    "Net Income (in millions)",
    "Debt (in millions)",
    "Equity (in millions)",
    "Enterprise Value (in millions)",
    "P/E Ratio",
    "Revenue Growth Rate (%)",
    "EBITDA Margin (%)",
    "Net Income Margin (%)",
    "ROE (Return on Equity) (%)",
    "ROA (Return on Assets) (%)",
    "Current Ratio",
    "Debt to Equity Ratio",
];

/// A company's financial record as stored in the CSV database.
/// Field names map one-to-one onto the CSV header row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    #[serde(rename = "Company Name")]
    pub company_name: String,
    #[serde(rename = "Industry")]
    pub industry: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Market Capitalization")]
    pub market_capitalization: i64,
    #[serde(rename = "Revenue (in millions)")]
    pub revenue: f64,
    #[serde(rename = "EBITDA (in millions)")]
    pub ebitda: f64,
    #[serde(rename = "Net Income (in millions)")]
    pub net_income: f64,
    #[serde(rename = "Debt (in millions)")]
    pub debt: f64,
    #[serde(rename = "Equity (in millions)")]
    pub equity: f64,
    #[serde(rename = "Enterprise Value (in millions)")]
    pub enterprise_value: f64,
    #[serde(rename = "P/E Ratio")]
    pub pe_ratio: f64,
    #[serde(rename = "Revenue Growth Rate (%)")]
    pub revenue_growth_rate: f64,
    #[serde(rename = "EBITDA Margin (%)")]
    pub ebitda_margin: f64,
    #[serde(rename = "Net Income Margin (%)")]
    pub net_income_margin: f64,
    #[serde(rename = "ROE (Return on Equity) (%)")]
    pub return_on_equity: f64,
    #[serde(rename = "ROA (Return on Assets) (%)")]
    pub return_on_assets: f64,
    /// Optional column, zero when absent
    #[serde(rename = "Current Ratio", default)]
    pub current_ratio: f64,
    #[serde(rename = "Debt to Equity Ratio")]
    pub debt_to_equity: f64,
}

impl Record {
    /// Flattens the record into the JSON object returned as `stored_data`
    pub fn to_map(&self) -> Map<String, Value> {
        let fields: [(&str, Value); 18] = [
            (COMPANY_NAME, Value::from(self.company_name.as_str())),
            (INDUSTRY, Value::from(self.industry.as_str())),
            (LOCATION, Value::from(self.location.as_str())),
            (MARKET_CAPITALIZATION, Value::from(self.market_capitalization)),
            ("Revenue (in millions)", Value::from(self.revenue)),
            ("EBITDA (in millions)", Value::from(self.ebitda)),
            ("Net Income (in millions)", Value::from(self.net_income)),
            ("Debt (in millions)", Value::from(self.debt)),
            ("Equity (in millions)", Value::from(self.equity)),
            ("Enterprise Value (in millions)", Value::from(self.enterprise_value)),
            ("P/E Ratio", Value::from(self.pe_ratio)),
            ("Revenue Growth Rate (%)", Value::from(self.revenue_growth_rate)),
            ("EBITDA Margin (%)", Value::from(self.ebitda_margin)),
            ("Net Income Margin (%)", Value::from(self.net_income_margin)),
            ("ROE (Return on Equity) (%)", Value::from(self.return_on_equity)),
            ("ROA (Return on Assets) (%)", Value::from(self.return_on_assets)),
            ("Current Ratio", Value::from(self.current_ratio)),
            ("Debt to Equity Ratio", Value::from(self.debt_to_equity)),
        ];

        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}
