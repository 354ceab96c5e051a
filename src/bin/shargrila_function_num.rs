use anyhow::Context;
use shargrila_viz::cli::parse_cli;
use shargrila_viz::function_num::{plot_transfer_counts, TransferCounts};
use shargrila_viz::{init_logger, Table};

fn main() -> anyhow::Result<()> {
    init_logger();
    let (csvin, pngout) = parse_cli(
        "shargrila_function_num",
        "plot the number of intra-shard and cross-shard transfers over time",
        "function_num.csv",
    );
    log::info!("read data from {} and plot to {}", csvin.display(), pngout.display());
    let table = Table::from_csv(&csvin)?;
    let counts = TransferCounts::from_table(&table)
        .with_context(|| format!("unexpected layout of {}", csvin.display()))?;
    plot_transfer_counts(&counts, &pngout)
        .with_context(|| format!("could not plot {}", pngout.display()))?;
    Ok(())
}
