/// Database primary keys are PostgreSQL BIGSERIAL values.
pub type DbId = i64;

/// Timestamps are always UTC; conversion to local time is a client concern.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
