use chrono::{DateTime, Utc};

// Mocking out time so that it is possible to run tests that depend on time.
pub trait ISys: Send + Sync {
    /// The current timestamp in millis
    fn get_timestamp_millis(&self) -> i64;

    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.get_timestamp_millis()).unwrap_or_else(Utc::now)
    }
}

/// System that gets the real time and is used when not testing
pub struct RealSys {}
impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// System frozen at a given timestamp
pub struct StaticTimeSys(pub i64);
impl ISys for StaticTimeSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0
    }
}
