use anyhow::Context;
use shargrila_viz::cli::parse_cli;
use shargrila_viz::init_logger;
use shargrila_viz::users::{plot_fee_distribution, read_users, FeeDistribution};

fn main() -> anyhow::Result<()> {
    init_logger();
    let (csvin, pngout) = parse_cli(
        "shargrila_users",
        "plot the distribution of users by total transaction fee",
        "users.csv",
    );
    log::info!("read data from {} and plot to {}", csvin.display(), pngout.display());
    let users = read_users(&csvin)?;
    let dist = FeeDistribution::from_users(&users)?;
    plot_fee_distribution(&dist, &pngout)
        .with_context(|| format!("could not plot {}", pngout.display()))?;
    Ok(())
}
