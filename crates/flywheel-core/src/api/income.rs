//! Daily output for the calendar

use super::user_filter;
use crate::http::{ApiError, HttpClient};
use crate::income::{parse_income, IncomeMap, YearMonth};

pub const DAILY_OUTPUT_PATH: &str = "/tacticTask/getDailyOutput";

pub async fn fetch_daily_output(
    client: &HttpClient,
    month: YearMonth,
    user_id: Option<i64>,
) -> Result<IncomeMap, ApiError> {
    let path = format!("{}/{}", DAILY_OUTPUT_PATH, month.key());
    let data: serde_json::Value = client.get(&path, user_filter(user_id)).await?;
    Ok(parse_income(&data))
}
