use std::path::PathBuf;

use glam::Vec2;
use keymaze::controller::{resolve, FrameLoop, InputEvent, InputProcessor, Key};
use keymaze::model::{parse_map, Camera, Door, DoorTag, TileCoord, WorldState};
use keymaze::view::{RenderScheduler, SceneMeshes, TextureSelector};
use keymaze::{load_scene_assets, SCENE_MESHES};

fn repo_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(relative)
}

fn shipped_level() -> FrameLoop {
    let world = parse_map(repo_path("maps/level1.txt")).unwrap();
    let assets = load_scene_assets(repo_path("assets/models")).unwrap();
    let meshes = SceneMeshes::from_registry(&assets).unwrap();
    FrameLoop::new(
        world,
        InputProcessor::default(),
        RenderScheduler::new(meshes),
        Camera::new(1024, 768),
        Some(3),
    )
}

/// Turn to face `target`, then walk until standing on it.
fn walk_to(game: &mut FrameLoop, x: f32, y: f32) {
    let target = Vec2::new(x, y);
    let delta = target - game.world().player().ground_position();
    let heading = delta.x.atan2(delta.y).to_degrees().rem_euclid(360.0);
    let turns = ((heading - game.world().player().heading_deg) / 15.0).round() as i32;
    let turns = turns.rem_euclid(24) as usize;
    game.step(&vec![InputEvent::key_down(Key::ArrowRight); turns]);

    for _ in 0..200 {
        if (game.world().player().ground_position() - target).length() < 0.05 {
            return;
        }
        game.step(&[InputEvent::key_down(Key::ArrowUp)]);
    }
    panic!(
        "stuck at {} on the way to {}",
        game.world().player().ground_position(),
        target
    );
}

#[test]
fn test_shipped_assets_load() {
    let assets = load_scene_assets(repo_path("assets/models")).unwrap();
    for name in SCENE_MESHES {
        let mesh = assets.mesh(name).unwrap();
        assert!(mesh.count > 0 && mesh.count % 3 == 0, "{name} is not a triangle list");
    }
    assert_eq!(assets.mesh("cube").unwrap().count, 36);

    let game = shipped_level();
    let world = game.world();
    assert_eq!((world.width(), world.height()), (10, 9));
    assert_eq!(world.player().ground_position(), Vec2::new(1.0, 1.0));
    assert_eq!(world.goal().position(), Vec2::new(1.0, 7.0));
    // Tag b shows up first in the file
    let tags: Vec<DoorTag> = world.doors().iter().map(|d| d.tag()).collect();
    assert_eq!(tags, vec![DoorTag::B, DoorTag::A]);
}

#[test]
fn test_shipped_level_is_solvable() {
    let mut game = shipped_level();
    let untextured = |game: &mut FrameLoop| {
        game.step(&[])
            .draw_list
            .iter()
            .filter(|d| d.texture == TextureSelector::Untextured)
            .count()
    };
    assert_eq!(untextured(&mut game), 4);

    walk_to(&mut game, 1.0, 4.0);
    assert!(game.world().door(DoorTag::A).unwrap().have_key());
    assert_eq!(untextured(&mut game), 3);

    for (x, y) in [(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (6.0, 3.0), (6.0, 6.0)] {
        walk_to(&mut game, x, y);
    }
    assert!(game.world().door(DoorTag::A).unwrap().is_open());

    for (x, y) in [(8.0, 6.0), (8.0, 1.0), (5.0, 1.0)] {
        walk_to(&mut game, x, y);
    }
    assert!(game.world().door(DoorTag::B).unwrap().have_key());
    assert_eq!(untextured(&mut game), 1);

    let route = [
        (8.0, 1.0),
        (8.0, 6.0),
        (6.0, 6.0),
        (6.0, 3.0),
        (3.0, 3.0),
        (3.0, 1.0),
        (1.0, 1.0),
        (1.0, 5.0),
        (4.0, 5.0),
        (4.0, 7.0),
    ];
    for (x, y) in route {
        walk_to(&mut game, x, y);
    }

    // West through door b and onto the goal
    game.step(&vec![InputEvent::key_down(Key::ArrowLeft); 6]);
    assert_eq!(game.world().player().heading_deg, 270.0);
    let mut frames = 0;
    while game.levels_completed() == 0 {
        game.step(&[InputEvent::key_down(Key::ArrowUp)]);
        frames += 1;
        assert!(frames < 100, "never reached the goal");
    }

    let world = game.world();
    assert_eq!(world.player().ground_position(), Vec2::new(1.0, 1.0));
    assert!(world.doors().iter().all(|d| !d.have_key() && !d.is_open()));
    assert_eq!(untextured(&mut game), 4);
}

#[test]
fn test_single_door_scenario() {
    let door = Door::new(DoorTag::A, TileCoord::new(3, 3), TileCoord::new(5, 5));
    let mut world = WorldState::new(8, 8, vec![], vec![door], TileCoord::new(7, 0), TileCoord::new(0, 0));

    assert!(resolve(&mut world, Vec2::new(5.0, 5.0)));
    assert!(world.doors()[0].have_key());

    assert!(!resolve(&mut world, Vec2::new(3.0, 3.0)));
    assert!(world.doors()[0].is_open());
    assert!(resolve(&mut world, Vec2::new(3.0, 3.0)));
    assert_eq!(world.player().ground_position(), Vec2::new(3.0, 3.0));
}

#[test]
fn test_quit_keys() {
    let mut game = shipped_level();
    assert!(!game.step(&[InputEvent::key_down(Key::Escape)]).quit);
    assert!(game.step(&[InputEvent::key_up(Key::Escape)]).quit);
}
