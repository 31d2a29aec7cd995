use std::sync::Arc;

use proptest::prelude::*;

use icefarm_farm::{FarmError, StakingEngine, YieldRate};
use icefarm_nullables::NullClock;
use icefarm_token::{FungibleLedger, MintableLedger, TokenLedger};
use icefarm_types::{AccountId, AssetDecimals, FarmParams};

const FUNDING: u128 = 1_000_000_000;

fn setup() -> (StakingEngine, Arc<TokenLedger>, Arc<TokenLedger>, Arc<NullClock>) {
    let owner = AccountId::new("owner");
    let farm = AccountId::new("farm");
    let stake = Arc::new(TokenLedger::new("mDAI", AssetDecimals::STANDARD, owner.clone()));
    let reward = Arc::new(TokenLedger::new("ICE", AssetDecimals::STANDARD, owner.clone()));
    reward.transfer_ownership(&owner, &farm).unwrap();
    for who in ["alice", "bob"] {
        let who = AccountId::new(who);
        stake.mint(&owner, &who, FUNDING).unwrap();
        stake.approve(&who, &farm, u128::MAX).unwrap();
    }
    let clock = Arc::new(NullClock::new(0));
    let engine = StakingEngine::new(
        FarmParams::default(),
        farm,
        stake.clone(),
        reward.clone(),
        clock.clone(),
    )
    .unwrap();
    (engine, stake, reward, clock)
}

#[derive(Clone, Debug)]
enum Op {
    Stake(bool, u128),
    Unstake(bool, u128),
    Withdraw(bool),
    Advance(u64),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (any::<bool>(), 1u128..10_000_000).prop_map(|(a, n)| Op::Stake(a, n)),
        (any::<bool>(), 1u128..10_000_000).prop_map(|(a, n)| Op::Unstake(a, n)),
        any::<bool>().prop_map(Op::Withdraw),
        (0u64..200_000).prop_map(Op::Advance),
    ]
}

fn who(alice: bool) -> AccountId {
    AccountId::new(if alice { "alice" } else { "bob" })
}

proptest! {
    /// Principal is conserved: wallet + staked equals the initial funding and
    /// custody always equals the engine's total.
    #[test]
    fn principal_is_conserved(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let (mut engine, stake, reward, clock) = setup();
        for op in ops {
            match op {
                Op::Stake(a, n) => { let _ = engine.stake(&who(a), n); }
                Op::Unstake(a, n) => { let _ = engine.unstake(&who(a), n); }
                Op::Withdraw(a) => { let _ = engine.withdraw_yield(&who(a)); }
                Op::Advance(s) => clock.advance(s),
            }
            for a in [true, false] {
                prop_assert_eq!(
                    stake.balance_of(&who(a)) + engine.staking_balance(&who(a)),
                    FUNDING
                );
            }
            prop_assert_eq!(stake.balance_of(engine.custody()), engine.total_staked());
            prop_assert_eq!(reward.total_supply(), engine.total_yield_minted());
        }
    }

    /// Yield over one period is exactly staked × elapsed / 86400.
    #[test]
    fn yield_is_linear_in_time(staked in 1u128..FUNDING, elapsed in 0u64..10_000_000) {
        let (mut engine, _, _, clock) = setup();
        let alice = who(true);
        engine.stake(&alice, staked).unwrap();
        clock.advance(elapsed);
        prop_assert_eq!(engine.calculate_yield_time(&alice), elapsed);
        prop_assert_eq!(
            engine.accrued_yield(&alice).unwrap(),
            staked * elapsed as u128 / 86_400
        );
    }

    /// A partial unstake keeps yield already earned and accrues afterwards at
    /// the reduced stake.
    #[test]
    fn partial_unstake_preserves_yield(
        staked in 2u128..FUNDING,
        frac_pct in 1u128..100,
        d1 in 0u64..1_000_000,
        d2 in 0u64..1_000_000,
    ) {
        let (mut engine, _, _, clock) = setup();
        let alice = who(true);
        engine.stake(&alice, staked).unwrap();
        clock.advance(d1);
        let earned = staked * d1 as u128 / 86_400;

        let removed = (staked * frac_pct / 100).max(1);
        engine.unstake(&alice, removed).unwrap();
        prop_assert_eq!(engine.accrued_yield(&alice).unwrap(), earned);

        clock.advance(d2);
        let remaining = staked - removed;
        prop_assert_eq!(
            engine.accrued_yield(&alice).unwrap(),
            earned + remaining * d2 as u128 / 86_400
        );
    }

    /// An over-sized unstake changes nothing.
    #[test]
    fn rejected_unstake_is_inert(staked in 1u128..FUNDING, excess in 1u128..1_000, elapsed in 0u64..1_000_000) {
        let (mut engine, stake, _, clock) = setup();
        let alice = who(true);
        engine.stake(&alice, staked).unwrap();
        clock.advance(elapsed);
        let before = engine.record(&alice).cloned();
        let accrued = engine.accrued_yield(&alice).unwrap();

        let result = engine.unstake(&alice, staked + excess);
        let rejected = matches!(result, Err(FarmError::InsufficientStake { .. }));
        prop_assert!(rejected);
        prop_assert_eq!(engine.record(&alice).cloned(), before);
        prop_assert_eq!(engine.accrued_yield(&alice).unwrap(), accrued);
        prop_assert_eq!(stake.balance_of(&alice), FUNDING - staked);
    }

    /// Withdrawal mints exactly the pre-withdrawal accrued amount and zeroes it.
    #[test]
    fn withdraw_mints_accrued(staked in 1u128..FUNDING, elapsed in 1u64..10_000_000) {
        let (mut engine, _, reward, clock) = setup();
        let alice = who(true);
        engine.stake(&alice, staked).unwrap();
        clock.advance(elapsed);
        let accrued = engine.accrued_yield(&alice).unwrap();
        match engine.withdraw_yield(&alice) {
            Ok(minted) => {
                prop_assert_eq!(minted, accrued);
                prop_assert_eq!(reward.balance_of(&alice), accrued);
                prop_assert_eq!(reward.total_supply(), accrued);
                prop_assert_eq!(engine.accrued_yield(&alice).unwrap(), 0);
            }
            Err(FarmError::NothingToWithdraw) => prop_assert_eq!(accrued, 0),
            Err(e) => prop_assert!(false, "unexpected error: {}", e),
        }
    }

    /// The reduced rate agrees with the unreduced formula for differing decimals.
    #[test]
    fn reduced_rate_matches_direct_formula(
        whole_rate in 0u128..1_000,
        stake_decimals in 0u8..=18,
        reward_decimals in 0u8..=18,
        staked in 0u128..1_000_000_000,
        elapsed in 0u64..10_000_000,
    ) {
        let params = FarmParams::with_whole_rate(
            whole_rate,
            AssetDecimals::new(stake_decimals),
            AssetDecimals::new(reward_decimals),
        ).unwrap();
        let rate = YieldRate::new(&params).unwrap();
        let unit = AssetDecimals::new(stake_decimals).unit().unwrap();
        // staked × elapsed < 10^16 and the rate < 10^21, so this fits in u128.
        let direct = staked * elapsed as u128 * params.reward_per_token_per_day / (86_400 * unit);
        prop_assert_eq!(rate.yield_for_period(staked, elapsed), Some(direct));
    }
}
