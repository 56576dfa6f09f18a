pub trait ClockPort: Send + Sync {
    /// Unix epoch milliseconds (UTC)
    fn now_ms(&self) -> i64;
}
