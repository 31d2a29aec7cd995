#![no_main]

use libfuzzer_sys::fuzz_target;

use icefarm_farm::YieldRate;
use icefarm_types::{AssetDecimals, FarmParams};

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[..8]);
    u64::from_le_bytes(buf)
}

// Arbitrary rates, precisions, stakes and periods. Building the rate may
// fail and the yield may overflow, but neither may panic.
fuzz_target!(|data: &[u8]| {
    if data.len() < 35 {
        return;
    }

    let params = FarmParams {
        reward_per_token_per_day: u128::from(read_u64(&data[0..8])),
        stake_decimals: AssetDecimals::new(data[8]),
        reward_decimals: AssetDecimals::new(data[9]),
    };
    let staked = u128::from(read_u64(&data[10..18])) << (data[18] % 64);
    let elapsed = read_u64(&data[19..27]);

    let Ok(rate) = YieldRate::new(&params) else {
        return;
    };

    let full = rate.yield_for_period(staked, elapsed);
    let shorter = rate.yield_for_period(staked, elapsed / 2);

    // Yield never decreases with elapsed time.
    if let (Some(full), Some(shorter)) = (full, shorter) {
        assert!(shorter <= full);
    }

    let _ = YieldRate::from_fraction(u128::from(read_u64(&data[26..34])), u128::from(data[34]));
});
