use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use icefarm_farm::{StakingEngine, YieldRate};
use icefarm_nullables::NullClock;
use icefarm_token::{FungibleLedger, MintableLedger, TokenLedger};
use icefarm_types::{AccountId, AssetDecimals, FarmParams};

const ETHER: u128 = 1_000_000_000_000_000_000;

fn make_engine(accounts: usize) -> (StakingEngine, Arc<NullClock>, Vec<AccountId>) {
    let owner = AccountId::new("owner");
    let farm = AccountId::new("farm");
    let stake = Arc::new(TokenLedger::new("mDAI", AssetDecimals::STANDARD, owner.clone()));
    let reward = Arc::new(TokenLedger::new("ICE", AssetDecimals::STANDARD, owner.clone()));
    reward.transfer_ownership(&owner, &farm).unwrap();

    let ids: Vec<AccountId> = (0..accounts)
        .map(|i| AccountId::new(format!("staker-{i}")))
        .collect();
    for id in &ids {
        stake.mint(&owner, id, 1_000_000 * ETHER).unwrap();
        stake.approve(id, &farm, u128::MAX).unwrap();
    }

    let clock = Arc::new(NullClock::new(0));
    let engine = StakingEngine::new(FarmParams::default(), farm, stake, reward, clock.clone())
        .unwrap();
    (engine, clock, ids)
}

fn bench_yield_for_period(c: &mut Criterion) {
    let mut group = c.benchmark_group("yield_for_period");

    for decimals in [0u8, 6, 18] {
        let params =
            FarmParams::with_whole_rate(1, AssetDecimals::new(decimals), AssetDecimals::STANDARD)
                .unwrap();
        let rate = YieldRate::new(&params).unwrap();
        let staked = 25_000 * 10u128.pow(decimals as u32);

        group.bench_with_input(
            BenchmarkId::new("stake_decimals", decimals),
            &decimals,
            |b, _| {
                b.iter(|| black_box(rate.yield_for_period(black_box(staked), black_box(31_536_000))));
            },
        );
    }

    group.finish();
}

fn bench_stake_withdraw_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("stake_withdraw_unstake_cycle");

    for accounts in [1usize, 100] {
        let (mut engine, clock, ids) = make_engine(accounts);

        group.bench_with_input(BenchmarkId::new("accounts", accounts), &accounts, |b, _| {
            b.iter(|| {
                for id in &ids {
                    engine.stake(id, ETHER).unwrap();
                }
                clock.advance(86_400);
                for id in &ids {
                    black_box(engine.withdraw_yield(id).unwrap());
                    engine.unstake(id, ETHER).unwrap();
                }
                engine.take_events();
            });
        });
    }

    group.finish();
}

fn bench_accrued_yield_query(c: &mut Criterion) {
    let (mut engine, clock, ids) = make_engine(1_000);
    for id in &ids {
        engine.stake(id, 10 * ETHER).unwrap();
    }
    clock.advance(3_600);

    c.bench_function("accrued_yield_1000_accounts", |b| {
        b.iter(|| {
            for id in &ids {
                black_box(engine.accrued_yield(black_box(id)).unwrap());
            }
        });
    });
}

criterion_group!(
    benches,
    bench_yield_for_period,
    bench_stake_withdraw_cycle,
    bench_accrued_yield_query
);
criterion_main!(benches);
