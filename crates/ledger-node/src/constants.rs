pub(crate) const DEFAULT_RECORDS_LIMIT: usize = 25;
pub(crate) const MAX_RECORDS_LIMIT: usize = DEFAULT_RECORDS_LIMIT * 10;
/// Miner credited when a mine request names nobody.
pub(crate) const DEFAULT_MINER: &str = "Anonymous";
