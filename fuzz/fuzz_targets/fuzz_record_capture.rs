#![no_main]

use libfuzzer_sys::fuzz_target;

use icefarm_farm::{AccountRecord, YieldRate};
use icefarm_types::Timestamp;

// Capturing a period into a record must preserve the principal and never
// lose already-captured yield, for any start/now ordering.
fuzz_target!(|data: &[u8]| {
    if data.len() < 40 {
        return;
    }

    let word = |i: usize| {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(&data[i..i + 8]);
        u64::from_le_bytes(buf)
    };

    let record = AccountRecord {
        staked_amount: u128::from(word(0)),
        accrual_start: Timestamp::new(word(8)),
        unclaimed_yield: u128::from(word(16)),
    };
    let now = Timestamp::new(word(24));
    let rate = YieldRate::from_fraction(u128::from(word(32) % 1_000_000), 86_400)
        .unwrap_or_default();

    if let Some(captured) = record.captured(&rate, now) {
        assert_eq!(captured.staked_amount, record.staked_amount);
        assert_eq!(captured.accrual_start, now);
        assert!(captured.unclaimed_yield >= record.unclaimed_yield);
    }
});
