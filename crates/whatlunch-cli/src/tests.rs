use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["whatlunch"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_genres_command() {
    let cli = Cli::try_parse_from(["whatlunch", "genres"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Genres)));
}

#[test]
fn pick_requires_location_and_genre() {
    assert!(Cli::try_parse_from(["whatlunch", "pick"]).is_err());
    assert!(Cli::try_parse_from(["whatlunch", "pick", "--location", "서울시청"]).is_err());
    assert!(Cli::try_parse_from(["whatlunch", "pick", "--genre", "korean"]).is_err());
}

#[test]
fn pick_defaults_leave_search_overrides_unset() {
    let cli = Cli::try_parse_from([
        "whatlunch",
        "pick",
        "--location",
        "서울시청",
        "--genre",
        "korean",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Pick {
            ref location,
            genre: Genre::Korean,
            search: SearchArgs {
                radius: None,
                strategy: None,
                seed: None
            }
        }) if location == "서울시청"
    ));
}

#[test]
fn pick_accepts_korean_genre_label_and_overrides() {
    let cli = Cli::try_parse_from([
        "whatlunch",
        "pick",
        "--location",
        "강남역",
        "--genre",
        "중식",
        "--radius",
        "1500",
        "--strategy",
        "category",
        "--seed",
        "42",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Pick {
            genre: Genre::Chinese,
            search: SearchArgs {
                radius: Some(1500),
                strategy: Some(SearchStrategy::Category),
                seed: Some(42)
            },
            ..
        })
    ));
}

#[test]
fn pick_rejects_unknown_genre() {
    let result = Cli::try_parse_from([
        "whatlunch",
        "pick",
        "--location",
        "서울시청",
        "--genre",
        "pizza",
    ]);
    assert!(result.is_err());
}

#[test]
fn radius_outside_kakao_range_is_rejected() {
    for radius in ["0", "20001"] {
        let result = Cli::try_parse_from([
            "whatlunch",
            "pick",
            "--location",
            "서울시청",
            "--genre",
            "random",
            "--radius",
            radius,
        ]);
        assert!(result.is_err(), "radius {radius} should be rejected");
    }
}

#[test]
fn parses_interactive_with_strategy() {
    let cli = Cli::try_parse_from(["whatlunch", "interactive", "--strategy", "keyword"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Interactive {
            search: SearchArgs {
                strategy: Some(SearchStrategy::Keyword),
                ..
            }
        })
    ));
}
