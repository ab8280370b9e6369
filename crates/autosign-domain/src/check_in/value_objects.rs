use serde::{Deserialize, Serialize};

/// Quota figures for one account, scaled to display units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    pub quota: f64,
    pub used_quota: f64,
}

/// Classified outcome of one check-in request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInOutcome {
    pub success: bool,
    pub message: String,
}
