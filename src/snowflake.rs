use num_bigint::BigUint;
use time::OffsetDateTime;

use crate::error::Error;

/// Milliseconds between the Unix epoch and the first second of 2015 (UTC).
pub const DISCORD_EPOCH_MS: u64 = 1_420_070_400_000;

/// Width of the worker, process and increment fields below the timestamp.
const TIMESTAMP_SHIFT: usize = 22;

/// Provider-assigned identifier that embeds its creation time.
///
/// Parsed as an arbitrary-precision integer so no digits are lost,
/// whatever the magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Snowflake(BigUint);

impl Snowflake {
    /// Creation time as milliseconds since the Unix epoch.
    #[must_use]
    pub fn timestamp_millis(&self) -> BigUint {
        (&self.0 >> TIMESTAMP_SHIFT) + DISCORD_EPOCH_MS
    }

    /// Creation time as a calendar timestamp (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the embedded time lies outside
    /// the range `OffsetDateTime` can represent.
    pub fn created_at(&self) -> Result<OffsetDateTime, Error> {
        let out_of_range = || Error::InvalidIdentifier(format!("{} is out of range", self.0));
        let nanos = i128::try_from(&self.timestamp_millis())
            .ok()
            .and_then(|millis| millis.checked_mul(1_000_000))
            .ok_or_else(out_of_range)?;
        OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|_| out_of_range())
    }
}

impl std::fmt::Display for Snowflake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl std::str::FromStr for Snowflake {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // BigUint's own parser tolerates `+` and `_`; identifiers never contain them.
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidIdentifier(s.to_owned()));
        }
        BigUint::parse_bytes(s.as_bytes(), 10)
            .map(Self)
            .ok_or_else(|| Error::InvalidIdentifier(s.to_owned()))
    }
}

/// Decodes the account creation time embedded in a snowflake identifier.
///
/// # Errors
///
/// Returns [`Error::InvalidIdentifier`] if `id` is not a non-negative decimal
/// integer, or if the embedded time cannot be represented.
pub fn decode_creation_time(id: &str) -> Result<OffsetDateTime, Error> {
    id.parse::<Snowflake>()?.created_at()
}
