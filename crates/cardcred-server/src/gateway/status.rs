pub const CARDCRED_STATUS_HEADER: &str = "x-cardcred-status";
pub const CARDCRED_STATUS_HEALTHY: &str = "healthy";
pub const CARDCRED_STATUS_READY: &str = "ready";
pub const CARDCRED_STATUS_NOT_READY: &str = "not_ready";
pub const CARDCRED_STATUS_ERROR: &str = "error";

/// Outcome reported in the status header of a successful pipeline call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardcredStatus {
    Scored,
    Ranked,
    NoResults,
}

impl CardcredStatus {
    #[inline]
    pub fn as_header_value(&self) -> &'static str {
        match self {
            CardcredStatus::Scored => "SCORED",
            CardcredStatus::Ranked => "RANKED",
            CardcredStatus::NoResults => "NO_RESULTS",
        }
    }
}

impl std::fmt::Display for CardcredStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_header_value())
    }
}
