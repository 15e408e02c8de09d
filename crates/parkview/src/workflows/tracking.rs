use chrono::Utc;
use rand::Rng;

/// Prefix identifying the record family a tracking code belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingPrefix {
    RentalApplication,
    FeeRequest,
}

impl TrackingPrefix {
    pub const fn label(self) -> &'static str {
        match self {
            TrackingPrefix::RentalApplication => "PA",
            TrackingPrefix::FeeRequest => "PF",
        }
    }
}

const SUFFIX_LEN: usize = 4;
const TIMESTAMP_DIGITS: usize = 8;
const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Mint a human-readable tracking code: `<PREFIX>-<8 trailing epoch-ms
/// digits>-<4 uppercase base36 characters>`.
///
/// Unique enough for support lookups, not guaranteed collision-free.
pub fn new_tracking_code(prefix: TrackingPrefix) -> String {
    compose(
        prefix,
        Utc::now().timestamp_millis(),
        &random_suffix(&mut rand::thread_rng()),
    )
}

fn compose(prefix: TrackingPrefix, epoch_ms: i64, suffix: &str) -> String {
    let digits = format!("{:08}", epoch_ms.max(0));
    let trailing = &digits[digits.len() - TIMESTAMP_DIGITS..];
    format!("{}-{}-{}", prefix.label(), trailing, suffix)
}

fn random_suffix<R: Rng>(rng: &mut R) -> String {
    (0..SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect()
}
