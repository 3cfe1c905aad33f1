use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use autocat_rust::{
    load_autocats, save_autocats, steam_labels_preset, AutoCat, AutoCatFlags, AutoCatGenre,
    AutoCatKind, AutoCatManual, AutoCatName, AutoCatUserScore, AutoCatYear, BatchEvent,
    BatchRunner, CategorizeResult, Filter, GameDb, GameDbEntry, GameInfo, GameList,
};

fn fixture() -> (Arc<GameList>, Arc<GameDb>) {
    let games = GameList::new();
    games.add_game(GameInfo::new(10, "Half-Life")).unwrap();
    games.add_game(GameInfo::new(20, "Stardew Valley")).unwrap();
    games.add_game(GameInfo::new(30, "The Witness")).unwrap();

    let mut db = GameDb::new();
    db.insert(
        GameDbEntry::new(10, "Half-Life")
            .with_genres(&["Action"])
            .with_flags(&["Single-player"])
            .with_release_year(1998)
            .with_review(96, 60000)
            .with_time_to_beat(12.0),
    );
    db.insert(
        GameDbEntry::new(20, "Stardew Valley")
            .with_genres(&["Simulation", "RPG"])
            .with_flags(&["Single-player", "Multi-player"])
            .with_release_year(2016)
            .with_review(98, 400000)
            .with_time_to_beat(52.5),
    );
    db.insert(
        GameDbEntry::new(30, "The Witness")
            .with_genres(&["Puzzle"])
            .with_flags(&["Single-player"])
            .with_release_year(2016)
            .with_review(88, 20000)
            .with_time_to_beat(17.0),
    );

    (Arc::new(games), Arc::new(db))
}

#[test]
fn pipeline_of_schemes_builds_up_categories() {
    let (games, db) = fixture();

    let mut schemes: Vec<Box<dyn AutoCat>> = vec![
        Box::new(AutoCatGenre::new("genres").with_prefix("Genre: ")),
        Box::new(AutoCatYear::new("years").with_prefix("Year: ")),
        Box::new(AutoCatUserScore::new("reviews").with_rules(steam_labels_preset())),
    ];

    // Run each scheme over the whole list, the way a save-and-apply pass does
    let mut runner = BatchRunner::new();
    for scheme in &mut schemes {
        let summary = runner
            .run_all(scheme.as_mut(), games.clone(), db.clone())
            .unwrap();
        assert_eq!(summary.succeeded, 3);
        assert!(summary.failed.is_empty());
        assert!(!summary.cancelled);
    }

    let cats = games.categories_of(20).unwrap();
    assert!(cats.contains("Genre: Simulation"));
    assert!(cats.contains("Genre: RPG"));
    assert!(cats.contains("Year: 2016"));
    assert!(cats.contains("Overwhelmingly Positive"));

    let cats = games.categories_of(10).unwrap();
    assert!(cats.contains("Genre: Action"));
    assert!(cats.contains("Year: 1998"));
    assert!(cats.contains("Overwhelmingly Positive"));

    // 88 with 20k reviews lands in the second tier
    let cats = games.categories_of(30).unwrap();
    assert!(cats.contains("Very Positive"));
    assert!(!cats.contains("Overwhelmingly Positive"));
}

#[test]
fn games_missing_from_the_database_are_collected() {
    let (games, db) = fixture();
    games
        .add_game(GameInfo::new(40, "Unmapped Prototype"))
        .unwrap();

    let mut scheme = AutoCatGenre::new("genres").with_prefix("Genre: ");
    let summary = BatchRunner::new()
        .run_all(&mut scheme, games.clone(), db)
        .unwrap();

    assert_eq!(summary.succeeded, 3);
    assert_eq!(summary.not_in_database, vec![40]);
    assert!(summary.failed.is_empty());
    assert_eq!(summary.processed(), 4);

    // The unmatched game keeps its categories untouched
    assert!(games.categories_of(40).unwrap().is_empty());
}

#[test]
fn filter_limits_the_run_to_matching_games() {
    let (games, db) = fixture();
    let favorites = games.categories().get_or_create("Favorites").unwrap();
    games.add_category(10, &favorites).unwrap();
    games.add_category(30, &favorites).unwrap();

    let filter = Filter::new("favorites only").with_require("Favorites");
    let mut scheme = AutoCatYear::new("years").with_prefix("Year: ");
    let summary = BatchRunner::new()
        .with_filter(filter)
        .run_all(&mut scheme, games.clone(), db)
        .unwrap();

    assert_eq!(summary.succeeded, 2);
    assert_eq!(summary.skipped, 1);
    assert!(games.categories_of(10).unwrap().contains("Year: 1998"));
    assert!(games.categories_of(30).unwrap().contains("Year: 2016"));
    assert!(!games.categories_of(20).unwrap().contains("Year: 2016"));
}

#[test]
fn saved_schemes_come_back_with_their_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("autocats.json");

    let schemes: Vec<Box<dyn AutoCat>> = vec![
        Box::new(
            AutoCatName::new("alphabet")
                .with_prefix("@ ")
                .with_group_numbers(true),
        ),
        Box::new(AutoCatFlags::new("features").with_included(&["Single-player", "Multi-player"])),
        Box::new(
            AutoCatUserScore::new("reviews")
                .with_wilson_score(true)
                .with_rules(steam_labels_preset()),
        ),
    ];
    save_autocats(&path, &schemes).unwrap();

    let loaded = load_autocats(&path).unwrap();
    assert_eq!(loaded.skipped, 0);
    assert_eq!(loaded.autocats.len(), 3);
    assert_eq!(loaded.autocats[0].kind(), AutoCatKind::Name);
    assert_eq!(loaded.autocats[1].kind(), AutoCatKind::Flags);
    assert_eq!(loaded.autocats[2].kind(), AutoCatKind::UserScore);

    // Writing the loaded schemes back out reproduces the saved settings
    for (original, reloaded) in schemes.iter().zip(&loaded.autocats) {
        assert_eq!(original.write_to_element(), reloaded.write_to_element());
    }
}

#[test]
fn loaded_scheme_categorizes_like_the_original() {
    let (games, db) = fixture();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("autocats.json");

    let schemes: Vec<Box<dyn AutoCat>> =
        vec![Box::new(AutoCatFlags::new("features").with_included(&["Multi-player"]))];
    save_autocats(&path, &schemes).unwrap();

    let mut loaded = load_autocats(&path).unwrap();
    let scheme = loaded.autocats[0].as_mut();
    let summary = BatchRunner::new().run_all(scheme, games.clone(), db).unwrap();

    assert_eq!(summary.succeeded, 3);
    assert!(games.categories_of(20).unwrap().contains("Multi-player"));
    assert!(games.categories_of(10).unwrap().is_empty());
}

#[test]
fn progress_events_arrive_in_run_order() {
    let (games, db) = fixture();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink_events = Arc::clone(&events);
    let mut runner = BatchRunner::new().with_sink(move |event: &BatchEvent| {
        sink_events.lock().unwrap().push(event.clone());
    });

    let mut scheme = AutoCatGenre::new("genres");
    runner.run_all(&mut scheme, games, db).unwrap();

    let events = events.lock().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[3], BatchEvent::Finished);
    for event in &events[..3] {
        assert!(matches!(
            event,
            BatchEvent::Game {
                result: CategorizeResult::Success,
                ..
            }
        ));
    }
}

#[test]
fn cancellation_flag_stops_the_batch() {
    let (games, db) = fixture();
    let cancel = Arc::new(AtomicBool::new(true));

    let mut scheme = AutoCatGenre::new("genres");
    let summary = BatchRunner::new()
        .with_cancel_flag(Arc::clone(&cancel))
        .run_all(&mut scheme, games.clone(), db)
        .unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.processed(), 0);
    assert!(games.categories_of(10).unwrap().is_empty());
}

#[test]
fn manual_scheme_rewrites_assignments() {
    let (games, db) = fixture();
    let backlog = games.categories().get_or_create("Backlog").unwrap();
    games.add_category(10, &backlog).unwrap();
    games.add_category(20, &backlog).unwrap();

    let mut scheme = AutoCatManual::new("cleanup")
        .with_remove_all(true)
        .with_add(&["Reviewed"]);
    let summary = BatchRunner::new()
        .run_all(&mut scheme, games.clone(), db)
        .unwrap();

    assert_eq!(summary.succeeded, 3);
    for id in [10, 20, 30] {
        let cats = games.categories_of(id).unwrap();
        assert!(!cats.contains("Backlog"));
        assert!(cats.contains("Reviewed"));
    }
}

#[test]
fn schemes_are_unbound_after_every_run() {
    let (games, db) = fixture();

    let mut scheme = AutoCatGenre::new("genres").with_prefix("Genre: ");
    BatchRunner::new()
        .run_all(&mut scheme, games.clone(), db.clone())
        .unwrap();

    // A direct call outside a run needs its own binding
    assert!(scheme.categorize_game_id(10, None).is_err());

    scheme.pre_process(games.clone(), db).unwrap();
    assert_eq!(
        scheme.categorize_game_id(10, None).unwrap(),
        CategorizeResult::Success
    );
    scheme.de_process();
}
