pub(crate) const DEFAULT_LISTEN: &str = "0.0.0.0:5000";
/// Random bytes behind a generated node id (hex encoded, so twice as many characters).
pub(crate) const NODE_ID_BYTES: usize = 16;
