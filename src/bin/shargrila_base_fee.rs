use anyhow::Context;
use shargrila_viz::cli::parse_cli;
use shargrila_viz::shard::{plot_shard_series, ShardSeries, BASE_FEE_TEXT};
use shargrila_viz::{init_logger, Table, GWEI};

fn main() -> anyhow::Result<()> {
    init_logger();
    let (csvin, pngout) = parse_cli(
        "shargrila_base_fee",
        "plot the base fee of each shard over time",
        "base_fee.csv",
    );
    log::info!("read data from {} and plot to {}", csvin.display(), pngout.display());
    let table = Table::from_csv(&csvin)?;
    let series = ShardSeries::from_table(&table, GWEI as f64)?;
    plot_shard_series(&series, &BASE_FEE_TEXT, &pngout)
        .with_context(|| format!("could not plot {}", pngout.display()))?;
    Ok(())
}
