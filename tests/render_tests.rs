use shargrila_viz::function_num::{plot_transfer_counts, TransferCounts};
use shargrila_viz::shard::{plot_shard_series, ShardSeries, BASE_FEE_TEXT, MEMPOOL_TEXT};
use shargrila_viz::users::{plot_fee_distribution, FeeDistribution, UserRecord};
use shargrila_viz::{Table, VizResult, GWEI};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// draws twice over a stale file, the png must replace it both times
fn assert_renders_and_overwrites<F>(fout: &Path, draw: F)
where
    F: Fn(&Path) -> VizResult<()>,
{
    fs::write(fout, b"stale").unwrap();
    for _ in 0..2 {
        draw(fout).unwrap();
        let bytes = fs::read(fout).unwrap();
        assert!(bytes.len() > PNG_SIGNATURE.len());
        assert_eq!(&bytes[..8], &PNG_SIGNATURE[..]);
    }
}

fn shard_table() -> Table {
    Table {
        rows: (0..20)
            .map(|slot| (0..6).map(|shard| ((slot * shard) % 7) as f64).collect())
            .collect(),
    }
}

#[test]
fn mempool_chart_is_written() {
    let dir = TempDir::new().unwrap();
    let series = ShardSeries::from_table(&shard_table(), 1.).unwrap();
    assert_renders_and_overwrites(&dir.path().join("mempool.png"), |p| {
        plot_shard_series(&series, &MEMPOOL_TEXT, p)
    });
}

#[test]
fn base_fee_chart_is_written() {
    let dir = TempDir::new().unwrap();
    let table = Table {
        rows: vec![vec![1e9, 2e9], vec![1.125e9, 1.875e9], vec![1.25e9, 1.75e9]],
    };
    let series = ShardSeries::from_table(&table, GWEI as f64).unwrap();
    assert_renders_and_overwrites(&dir.path().join("base_fee.png"), |p| {
        plot_shard_series(&series, &BASE_FEE_TEXT, p)
    });
}

#[test]
fn transfer_count_chart_is_written() {
    let dir = TempDir::new().unwrap();
    let table = Table {
        rows: (0..15)
            .map(|slot| (0..10).map(|c| ((slot + c) % 5) as f64).collect())
            .collect(),
    };
    let counts = TransferCounts::from_table(&table).unwrap();
    assert_renders_and_overwrites(&dir.path().join("function_num.png"), |p| {
        plot_transfer_counts(&counts, p)
    });
}

#[test]
fn fee_distribution_chart_is_written() {
    let dir = TempDir::new().unwrap();
    let users: Vec<UserRecord> = (0..50)
        .map(|address| UserRecord {
            address,
            strategy: address % 3,
            total_fee: (address as u128 + 1) * 3 * GWEI,
            transaction_num: 1,
        })
        .chain(std::iter::once(UserRecord {
            address: 50,
            strategy: 3,
            total_fee: GWEI,
            transaction_num: 1,
        }))
        .collect();
    let dist = FeeDistribution::from_users(&users).unwrap();
    assert_eq!(dist.plottable().count(), 3);
    assert_renders_and_overwrites(&dir.path().join("users.png"), |p| {
        plot_fee_distribution(&dist, p)
    });
}

#[test]
fn fee_distribution_without_drawable_strategy_still_renders() {
    let dir = TempDir::new().unwrap();
    let users = vec![UserRecord {
        address: 0,
        strategy: 1,
        total_fee: 5 * GWEI,
        transaction_num: 2,
    }];
    let dist = FeeDistribution::from_users(&users).unwrap();
    assert_eq!(dist.plottable().count(), 0);
    assert_renders_and_overwrites(&dir.path().join("users.png"), |p| {
        plot_fee_distribution(&dist, p)
    });
}

#[test]
fn missing_output_directory_is_a_drawing_error() {
    let dir = TempDir::new().unwrap();
    let fout = dir.path().join("missing").join("mempool.png");
    let series = ShardSeries::from_table(&shard_table(), 1.).unwrap();
    let result = plot_shard_series(&series, &MEMPOOL_TEXT, &fout);
    assert!(matches!(result, Err(shargrila_viz::VizError::Drawing(_))));
}
