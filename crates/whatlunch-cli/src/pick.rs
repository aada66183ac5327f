//! One-shot `pick` command.

use std::sync::Arc;

use whatlunch_core::{AppConfig, Genre, Radius};
use whatlunch_kakao::KakaoClient;
use whatlunch_search::Flow;

use crate::render;
use crate::SearchArgs;

/// Builds a flow over the Kakao client, applying command-line overrides on
/// top of `config`.
pub(crate) fn build_flow(config: &AppConfig, args: SearchArgs) -> anyhow::Result<Flow<KakaoClient>> {
    let client = KakaoClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build Kakao client: {e}"))?;
    let strategy = args.strategy.unwrap_or(config.search_strategy);
    let radius = args.radius.map_or(config.search_radius, Radius::from_meters);

    tracing::debug!(%strategy, %radius, "building recommendation flow");

    let index = Arc::new(client);
    Ok(match args.seed {
        Some(seed) => Flow::with_seed(index, strategy, radius, seed),
        None => Flow::new(index, strategy, radius),
    })
}

/// Resolves `location`, searches `genre` around it and prints one pick.
///
/// # Errors
///
/// Returns an error if the client cannot be built or no restaurant could be
/// picked. The user-facing reason is printed first.
pub(crate) async fn run_pick(
    config: &AppConfig,
    location: &str,
    genre: Genre,
    args: SearchArgs,
) -> anyhow::Result<()> {
    let mut flow = build_flow(config, args)?;
    flow.edit_location(location);
    flow.choose_genre(genre);

    if let Err(e) = flow.submit().await {
        eprint!("{}", render::errors(flow.errors()));
        anyhow::bail!("no restaurant picked: {e}");
    }

    print!("{}", render::view(&flow.view()));
    Ok(())
}
