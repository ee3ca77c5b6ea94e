use std::error::Error;
use std::sync::Arc;

use episode_picker_rs::{
    EpisodeNavigationController, MediaType, PlaybackTarget, SeasonEpisodeCache, ShowId,
    StillSize, TmdbClient, SETTINGS,
};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Browse a show's seasons against the live metadata provider.
///
/// Needs `TMDB_AUTH` in the environment (or a `.env` file).
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let show_id: u64 = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "1399".to_string())
        .parse()?;

    let client = TmdbClient::from_settings()?;
    let cache = Arc::new(SeasonEpisodeCache::new(client));
    let mut nav = EpisodeNavigationController::new(cache);

    nav.initialize(ShowId(show_id)).await?;

    if let Some(show) = nav.show() {
        println!(
            "{} [{}] {}",
            show.name.as_deref().unwrap_or("Untitled"),
            show.content_rating(MediaType::Tv).as_str(),
            show.genre_label()
        );
    }

    let seasons = nav.seasons().to_vec();
    for season in &seasons {
        println!("{} ({} episodes)", season.display_name(), season.episode_count);
    }

    // Walk through the second season too, if there is one
    if let Some(season) = seasons.get(1) {
        nav.select_season_and_load(season.number).await?;
    }

    for episode in nav.current_episodes() {
        println!(
            "  {:>2}. {} {}",
            episode.number,
            episode.name,
            episode.runtime_label()
        );
        if let Some(url) = episode.still_url(StillSize::W185) {
            println!("      {}", url);
        }
    }

    if let Some(first) = nav.current_episodes().first().map(|e| e.number) {
        let picked = nav.select_episode(first)?;
        let target = PlaybackTarget::episode(ShowId(show_id), picked);
        println!("Would play: {}", target.playback_url(&SETTINGS.player_base_url));
    }

    Ok(())
}
