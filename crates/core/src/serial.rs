use serde::{Deserialize, Serialize};

/// One entry of the serial registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialRecord {
    pub id: i64,
    pub serial_number: String,
    pub used: bool,
}

/// A registry row as read from the seed source, already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedRow {
    pub serial_number: String,
    pub used: bool,
}

impl SeedRow {
    /// Builds a row, normalizing the serial.
    #[must_use]
    pub fn new(serial_number: &str, used: bool) -> Self {
        Self { serial_number: normalize_serial(serial_number), used }
    }
}

/// Trim surrounding whitespace and uppercase.
///
/// Every lookup and every insert goes through this, so `" abc1 "` and `"ABC1"`
/// address the same record.
#[must_use]
pub fn normalize_serial(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Result of a single verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyOutcome {
    /// Input was empty after normalization; the store was not consulted.
    EmptySerial,
    /// No such serial in the registry.
    Unknown,
    /// Serial exists but was consumed by an earlier scan.
    AlreadyUsed,
    /// Serial existed unused and this call consumed it.
    FirstScan,
    /// The store failed; nothing was changed.
    ServerError,
}

impl VerifyOutcome {
    #[must_use]
    pub const fn is_valid(self) -> bool {
        matches!(self, Self::FirstScan)
    }

    /// Human-readable status reported to the scanning client.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::EmptySerial => "Empty serial",
            Self::Unknown => "Fake or Unknown Product",
            Self::AlreadyUsed => "Serial already used",
            Self::FirstScan => "Original Product (first scan — marked as used)",
            Self::ServerError => "Verification failed (server error)",
        }
    }
}

impl std::fmt::Display for VerifyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Aggregate counts over the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryStats {
    pub total: u64,
    pub used: u64,
    pub unused: u64,
}

impl RegistryStats {
    #[must_use]
    pub const fn new(total: u64, used: u64) -> Self {
        Self { total, used, unused: total.saturating_sub(used) }
    }
}
