//! Commonly used constants

/// The only status code the gateway uses for success.
pub const SUCCESS_CODE: i64 = 200;

/// Status codes the gateway returns for failed card validation.
pub const VALIDATION_FAILURE_CODES: [&str; 2] = ["408", "409"];

/// Marker in the status text identifying a card verification number failure.
pub const CVN_FAILURE_MARKER: &str = "CVN";

/// Lowest risk score the gateway reports; means "transient error, retry the call".
pub const RISK_SCORE_ERROR: i64 = -2;

/// Risk score meaning the gateway has no opinion about the transaction.
pub const RISK_SCORE_NO_OPINION: i64 = -1;

/// Highest (worst) risk score.
pub const RISK_SCORE_MAX: i64 = 100;

/// SOAP API version requested by default.
pub const API_VERSION: &str = "18.0";

pub const SANDBOX_ENDPOINT: &str = "https://soap.prodtest.sj.vindicia.com";

pub const PRODUCTION_ENDPOINT: &str = "https://soap.vindicia.com";

pub const APPLE_PAY_GATEWAY_NAME: &str = "Vindicia Apple Pay";
