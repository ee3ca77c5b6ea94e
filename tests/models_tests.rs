use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;

use episode_picker_rs::{
    still_image_url, ContentRating, Episode, FrameCommand, MediaType, Season, SeasonDetails, Show,
    ShowDetails, ShowId, StillSize, TmdbClient,
};

// Test Show deserialization from the provider's /tv/{id} body
#[test]
fn test_show_model() {
    let json_data = json!({
        "id": 100,
        "name": "Test Show",
        "genres": [{"id": 18, "name": "Drama"}, {"id": 80, "name": "Crime"}],
        "seasons": [
            {"season_number": 1, "name": "Season 1", "episode_count": 8, "air_date": "2020-01-01"},
            {"season_number": 0, "name": "Specials", "episode_count": 1}
        ],
        "number_of_seasons": 1
    });

    let details: ShowDetails = serde_json::from_value(json_data).unwrap();
    let show = Show::from(details);

    assert_eq!(show.id, ShowId(100));
    assert_eq!(show.name.as_deref(), Some("Test Show"));
    assert_eq!(show.genre_ids, BTreeSet::from([18, 80]));
    assert_eq!(show.genre_label(), "Drama, Crime");
    assert_eq!(show.seasons.len(), 2);

    let navigable = show.navigable_seasons();
    assert_eq!(navigable.len(), 1);
    assert_eq!(navigable[0].number, 1);
    assert!(show.is_navigable_season(1));
    assert!(!show.is_navigable_season(0));
    assert!(!show.is_navigable_season(2));
}

// Test the navigable season rule on its own
#[test]
fn test_season_navigability() {
    let season = |number, episode_count| Season {
        number,
        name: String::new(),
        episode_count,
    };
    assert!(season(1, 8).is_navigable());
    assert!(!season(0, 8).is_navigable());
    assert!(!season(-1, 8).is_navigable());
    assert!(!season(3, 0).is_navigable());
    assert!(!season(3, -2).is_navigable());

    assert_eq!(season(4, 1).display_name(), "Season 4");
    let named = Season {
        number: 1,
        name: "Book One".to_string(),
        episode_count: 10,
    };
    assert_eq!(named.display_name(), "Book One");
}

// Test Episode deserialization, including missing optional fields
#[test]
fn test_episode_model() {
    let json_data = json!({
        "episodes": [
            {
                "episode_number": 1,
                "name": "Pilot",
                "overview": "It begins.",
                "runtime": 58,
                "still_path": "/abc.jpg",
                "vote_average": 8.1
            },
            {
                "episode_number": 2,
                "name": "Second",
                "overview": null,
                "runtime": null,
                "still_path": null
            }
        ]
    });

    let details: SeasonDetails = serde_json::from_value(json_data).unwrap();
    assert_eq!(details.episodes.len(), 2);

    let pilot = &details.episodes[0];
    assert_eq!(pilot.number, 1);
    assert_eq!(pilot.runtime_minutes, Some(58));
    assert_eq!(pilot.runtime_label(), "58m");
    assert_eq!(pilot.still_image_path.as_deref(), Some("/abc.jpg"));

    let second = &details.episodes[1];
    assert_eq!(second.runtime_minutes, None);
    assert_eq!(second.runtime_label(), "");
    assert_eq!(second.still_url(StillSize::W185), None);
}

// Test still image URLs
#[test]
fn test_still_image_url() {
    assert_eq!(
        still_image_url("https://image.tmdb.org/t/p", StillSize::W185, "/abc.jpg"),
        "https://image.tmdb.org/t/p/w185/abc.jpg"
    );
    assert_eq!(
        still_image_url("https://image.tmdb.org/t/p/", StillSize::W92, "abc.jpg"),
        "https://image.tmdb.org/t/p/w92/abc.jpg"
    );

    let episode = Episode {
        number: 1,
        name: "Pilot".to_string(),
        overview: String::new(),
        runtime_minutes: None,
        still_image_path: Some("/still.jpg".to_string()),
    };
    let url = episode.still_url(StillSize::Original).unwrap();
    assert!(url.ends_with("/original/still.jpg"));
}

// Test content rating rules for movies and series
#[test]
fn test_content_rating() {
    let ids = |list: &[i64]| list.iter().copied().collect::<BTreeSet<i64>>();

    // Movies
    assert_eq!(
        ContentRating::from_genres(MediaType::Movie, &ids(&[35, 27])),
        ContentRating::Adult
    );
    assert_eq!(
        ContentRating::from_genres(MediaType::Movie, &ids(&[16, 10751])),
        ContentRating::All
    );
    assert_eq!(
        ContentRating::from_genres(MediaType::Movie, &ids(&[99])),
        ContentRating::Adult
    );

    // Series
    assert_eq!(
        ContentRating::from_genres(MediaType::Tv, &ids(&[18, 80])),
        ContentRating::Adult
    );
    assert_eq!(
        ContentRating::from_genres(MediaType::Tv, &ids(&[10768])),
        ContentRating::Adult
    );
    assert_eq!(
        ContentRating::from_genres(MediaType::Tv, &ids(&[10762])),
        ContentRating::All
    );
    // Romance is only an adult marker for movies
    assert_eq!(
        ContentRating::from_genres(MediaType::Tv, &ids(&[10749, 35])),
        ContentRating::All
    );
    assert_eq!(ContentRating::All.as_str(), "All");
    assert_eq!(ContentRating::Adult.as_str(), "18+");
}

// Test frame command payloads
#[test]
fn test_frame_commands() {
    assert_eq!(FrameCommand::Pause.func_name(), "pauseVideo");
    assert_eq!(FrameCommand::Stop.func_name(), "stopVideo");

    let value: serde_json::Value = serde_json::from_str(&FrameCommand::Stop.to_json()).unwrap();
    assert_eq!(
        value,
        json!({"event": "command", "func": "stopVideo", "args": ""})
    );
}

// Test metadata endpoint URLs
#[test]
fn test_tmdb_urls() {
    let client = TmdbClient::new(
        Arc::new(reqwest::Client::new()),
        "https://api.themoviedb.org/3/",
        "token",
        "en-US",
    );
    assert_eq!(
        client.show_url(ShowId(100)),
        "https://api.themoviedb.org/3/tv/100"
    );
    assert_eq!(
        client.season_url(ShowId(100), 2),
        "https://api.themoviedb.org/3/tv/100/season/2"
    );
}
