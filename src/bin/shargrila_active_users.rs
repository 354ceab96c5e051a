use anyhow::Context;
use shargrila_viz::cli::parse_cli;
use shargrila_viz::shard::{plot_shard_series, ShardSeries, ACTIVE_USERS_TEXT};
use shargrila_viz::{init_logger, Table};

fn main() -> anyhow::Result<()> {
    init_logger();
    let (csvin, pngout) = parse_cli(
        "shargrila_active_users",
        "plot the number of active users in each shard over time",
        "active_user_num.csv",
    );
    log::info!("read data from {} and plot to {}", csvin.display(), pngout.display());
    let table = Table::from_csv(&csvin)?;
    let series = ShardSeries::from_table(&table, 1.)?;
    plot_shard_series(&series, &ACTIVE_USERS_TEXT, &pngout)
        .with_context(|| format!("could not plot {}", pngout.display()))?;
    Ok(())
}
