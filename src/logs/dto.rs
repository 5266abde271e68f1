use serde::Deserialize;
use time::Date;

#[derive(Debug, Deserialize)]
pub struct AddConsumptionRequest {
    pub device_id: String,
    pub code: String,
    pub amount: f32,
    pub date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAmountRequest {
    pub device_id: String,
    pub amount: f32,
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub device_id: String,
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    pub date: Option<Date>,
}
