mod script;

use std::collections::BTreeMap;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use driftwood_core::simulation::Simulation;
use driftwood_sim::World;
use driftwood_sim::config::SimConfig;
use driftwood_sim::events::SimEvent;
use driftwood_sim::level::LevelDescriptor;

use script::Script;

const DEFAULT_LEVEL: &str = "levels/demo.toml";
/// Ten seconds of standing still when no script is given.
const DEFAULT_TICKS: usize = 600;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let level_path = args.next().unwrap_or_else(|| DEFAULT_LEVEL.to_string());
    let script = match args.next() {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("reading script {path}"))?;
            Script::from_toml_str(&content).with_context(|| format!("parsing script {path}"))?
        },
        None => Script::idle(DEFAULT_TICKS),
    };

    let config = SimConfig::load();
    let level = LevelDescriptor::load(&level_path)
        .with_context(|| format!("loading level {level_path}"))?;
    let mut world = World::from_level(&level, config)
        .with_context(|| format!("building level {level_path}"))?;

    tracing::info!(
        level = %level_path,
        actors = world.actor_count(),
        ticks = script.total_ticks(),
        "Driftwood headless run starting"
    );

    let dt = 1.0 / world.tick_rate();
    let mut tally: BTreeMap<&'static str, usize> = BTreeMap::new();
    for (tick, intent) in script.intents().enumerate() {
        for event in world.tick(dt, intent) {
            tracing::info!(tick, ?event, "Event");
            *tally.entry(event_name(&event)).or_default() += 1;
        }
    }

    let player = world.player();
    let feet = player.hitbox.mid_bottom();
    tracing::info!(
        elapsed = world.elapsed(),
        state = player.state.as_str(),
        x = feet.x,
        y = feet.y,
        actors = world.actor_count(),
        ?tally,
        "Run finished"
    );
    Ok(())
}

fn event_name(event: &SimEvent) -> &'static str {
    match event {
        SimEvent::PlayerHit { .. } => "player_hit",
        SimEvent::ProjectileSpawned { .. } => "projectile_spawned",
        SimEvent::ProjectileRemoved { .. } => "projectile_removed",
        SimEvent::EnemyReversed { .. } => "enemy_reversed",
    }
}
