//! Headless sprite engine demo
//!
//! Builds a walled room, drops a player into it and holds Right+Down for
//! one second of simulated frames. The player slides along the walls into
//! the bottom-right corner, picking up a coin on the way.
//!
//! Usage: `sprite_demo [config.toml|config.ron]`

use sprite_engine::foundation::logging;
use sprite_engine::prelude::*;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

const TILE_SIZE: u32 = 16;
const MAP_WIDTH: u32 = 20;
const MAP_HEIGHT: u32 = 15;
const PLAYER_SPEED: f32 = 240.0;

/// Drawing surface that reports to the log instead of a window
struct LoggingSurface {
    frames: u64,
}

impl DrawingSurface for LoggingSurface {
    fn add_entity(&mut self, id: EntityId, entity: &Entity) {
        log::debug!("Surface: add {id:?} ({})", entity.name.as_deref().unwrap_or("unnamed"));
    }

    fn remove_entity(&mut self, id: EntityId) {
        log::debug!("Surface: remove {id:?}");
    }

    fn add_tilemap(&mut self, id: TileMapId, tilemap: &TileMap) {
        log::debug!(
            "Surface: add {id:?} {}x{} from {}",
            tilemap.map_width(),
            tilemap.map_height(),
            tilemap.image_file()
        );
    }

    fn remove_tilemap(&mut self, id: TileMapId) {
        log::debug!("Surface: remove {id:?}");
    }

    fn draw_all(&mut self, world: &World, background: &Background, elapsed: Duration) {
        self.frames += 1;
        log::trace!(
            "Frame {} ({:.2} ms) on {:?}",
            self.frames,
            elapsed.as_secs_f64() * 1000.0,
            background.colour
        );
        for (id, entity) in world.entities() {
            log::trace!("  {id:?} at ({}, {})", entity.pixel_x(), entity.pixel_y());
        }
    }
}

/// Keyboard that holds a fixed set of actions and announces them once
struct ScriptedKeyboard {
    bus: Rc<EventBus>,
    held: Vec<Action>,
    announced: bool,
}

impl KeyboardProvider for ScriptedKeyboard {
    fn is_action_down(&self, action: Action) -> bool {
        self.held.contains(&action)
    }

    fn update(&mut self) {
        if !self.announced {
            for &action in &self.held {
                self.bus.broadcast(Signal::ActionPressed, Some(EventData::Action(action)));
            }
            self.announced = true;
        }
    }
}

fn build_room() -> EngineResult<TileMap> {
    let mut room = TileMap::new(MAP_WIDTH, MAP_HEIGHT, "dungeon.png", TILE_SIZE, TILE_SIZE)?;
    room.define("floor", 0, 0, false);
    room.define("wall", 1, 0, true);
    room.fill("floor")?;

    let (last_column, last_row) = (MAP_WIDTH as i32 - 1, MAP_HEIGHT as i32 - 1);
    for column in 0..=last_column {
        room.set(column, 0, "wall")?;
        room.set(column, last_row, "wall")?;
    }
    for row in 0..=last_row {
        room.set(0, row, "wall")?;
        room.set(last_column, row, "wall")?;
    }
    Ok(room)
}

fn build_player(coins: &Rc<Cell<u32>>) -> EngineResult<Entity> {
    let collected = Rc::clone(coins);
    let tile = TILE_SIZE as f32;

    let movement = FourWayMovementComponent::new(PLAYER_SPEED)?.with_keyboard(
        KeyboardComponent::new().with_on_action_pressed(|_: &mut Entity, action: Action| {
            log::info!("Player pressed {action:?}");
        }),
    );
    let collision = CollisionComponent::new(tile, tile)?
        .with_slide_on_collide(true)
        .with_on_collide(|player: &mut Entity, target: CollisionTarget, axis: Axis| {
            log::debug!("Player hit {target:?} on {axis} at ({:.1}, {:.1})", player.x, player.y);
        });
    let pickup = OverlapComponent::new(tile, tile)?.with_on_start_overlap(move |_: &mut Entity, _: EntityId| {
        collected.set(collected.get() + 1);
        log::info!("Coin collected ({} total)", collected.get());
    });

    Ok(Entity::named("player", tile * 3.0, tile * 3.0)
        .with(SpriteComponent::new("player.png").with_frames(TILE_SIZE, TILE_SIZE, 4)?)
        .with(movement)
        .with(collision)
        .with(pickup))
}

fn build_coin(x: f32, y: f32) -> EngineResult<Entity> {
    let tile = TILE_SIZE as f32;
    let bob = TweenComponent::new((x, y), (x, y - 4.0), Duration::from_millis(500))?
        .with_on_complete(|coin: &mut Entity| log::debug!("Coin settled at ({}, {})", coin.x, coin.y));

    Ok(Entity::named("coin", x, y)
        .with(ColourBlockComponent::new(Colour::from_hex(0x00FF_D700), TILE_SIZE / 2, TILE_SIZE / 2))
        .with(OverlapComponent::new(tile / 2.0, tile / 2.0)?)
        .with(bob))
}

fn run(config: &ApplicationConfig) -> EngineResult<()> {
    let mut scene = Scene::new(&config.scene);
    let bus = scene.event_bus();
    let coins = Rc::new(Cell::new(0));

    scene.add_tilemap(build_room()?);
    let player = scene.add_entity(build_player(&coins)?);
    scene.add_entity(build_coin(120.0, 120.0)?);
    scene.add_entity(Entity::named("title", 8.0, 2.0).with(TextLabelComponent::new(
        config.engine.title.clone(),
        "mono",
        8,
    )?));

    let keyboard = ScriptedKeyboard {
        bus: Rc::clone(&bus),
        held: vec![Action::Right, Action::Down],
        announced: false,
    };
    let systems: Vec<SceneSystem> = vec![
        KeyboardSystem::new(Rc::clone(&bus)).into(),
        MovementSystem::new().into(),
        OverlapSystem::new().into(),
        TweenSystem::new().into(),
        DrawingSystem::new(Box::new(LoggingSurface { frames: 0 })).into(),
    ];
    scene.initialize(systems, Box::new(NoInput), Box::new(keyboard))?;

    let frames = config.engine.target_fps;
    let mut timer = Timer::fixed_rate(frames);
    log::info!("Running {frames} frames of '{}'", config.engine.title);
    let mut stopwatch = Stopwatch::start_new();
    for _ in 0..frames {
        let elapsed = timer.tick();
        scene.on_update(elapsed);
        scene.on_draw(elapsed);
    }
    stopwatch.stop();
    log::info!(
        "Simulated {:.2}s of game time in {:.3} ms",
        timer.total().as_secs_f32(),
        stopwatch.elapsed_millis()
    );

    if let Some(entity) = scene.entity(player) {
        log::info!(
            "Player finished at ({:.1}, {:.1}) with {} coin(s)",
            entity.x,
            entity.y,
            coins.get()
        );
    }

    scene.dispose();
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(&path)?,
        None => ApplicationConfig::new("Sprite Engine Demo"),
    };
    logging::init_with_config(&config.logging);
    config.validate().map_err(EngineError::InvalidArgument)?;

    run(&config)?;
    Ok(())
}
