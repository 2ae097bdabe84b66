use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use mayhem_core::entity::{Decoration, Platform, Player};
use mayhem_core::error::WorldError;
use mayhem_core::handle::{DecorationHandle, PlatformHandle, PlayerHandle};
use mayhem_core::registry::CollisionRegistry;
use mayhem_core::visual::Visual;

use crate::camera::{self, Camera, CameraOffset};
use crate::config::MayhemConfig;
use crate::contact::resolve_platform_collisions;
use crate::input::PlayerInput;
use crate::integrate::integrate_player;
use crate::jump;
use crate::separation::separate_players;
use crate::snapshot::WorldSnapshot;

/// Whether the match is running. The camera holds still in the menu.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Menu,
    Playing,
}

/// Owns every entity, registry and the camera of one simulation.
///
/// Entities live in generational arenas; handles to destroyed entities are
/// rejected rather than aliasing whatever reuses the slot. Iteration is
/// always in creation order.
pub struct World {
    config: MayhemConfig,

    players: SlotMap<PlayerHandle, Player>,
    platforms: SlotMap<PlatformHandle, Platform>,
    decorations: SlotMap<DecorationHandle, Decoration>,

    player_order: Vec<PlayerHandle>,
    platform_order: Vec<PlatformHandle>,
    decoration_order: Vec<DecorationHandle>,

    player_collisions: CollisionRegistry<PlayerHandle>,
    platform_collisions: CollisionRegistry<PlatformHandle>,
    decoration_collisions: CollisionRegistry<DecorationHandle>,

    camera: Camera,
    phase: Phase,
    tick: u64,
}

impl World {
    pub fn new() -> Self {
        Self::with_config(MayhemConfig::default())
    }

    pub fn with_config(config: MayhemConfig) -> Self {
        let camera = Camera::new(&config.camera);
        Self {
            config,
            players: SlotMap::with_key(),
            platforms: SlotMap::with_key(),
            decorations: SlotMap::with_key(),
            player_order: Vec::new(),
            platform_order: Vec::new(),
            decoration_order: Vec::new(),
            player_collisions: CollisionRegistry::new(),
            platform_collisions: CollisionRegistry::new(),
            decoration_collisions: CollisionRegistry::new(),
            camera,
            phase: Phase::Menu,
            tick: 0,
        }
    }

    pub fn config(&self) -> &MayhemConfig {
        &self.config
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            tracing::debug!(from = ?self.phase, to = ?phase, tick = self.tick, "Phase changed");
            self.phase = phase;
        }
    }

    // ---- Entity lifecycle ----

    /// Create a player at rest, using the configured gravity and terminal
    /// velocity. The player is not enrolled for collisions.
    pub fn create_player(
        &mut self,
        x: i64,
        y: i64,
        size_x: u32,
        size_y: u32,
        velocity_max: f64,
        visual: Visual,
    ) -> PlayerHandle {
        let mut player = Player::new(x, y, size_x, size_y, velocity_max).with_visual(visual);
        player.gravity_acceleration = self.config.physics.gravity_acceleration;
        player.terminal_velocity = self.config.physics.terminal_velocity;
        self.insert_player(player)
    }

    /// Adopt a fully built player as-is.
    pub fn insert_player(&mut self, player: Player) -> PlayerHandle {
        let handle = self.players.insert(player);
        self.player_order.push(handle);
        tracing::debug!(?handle, "Player created");
        handle
    }

    pub fn create_platform(
        &mut self,
        x: i64,
        y: i64,
        size_x: u32,
        size_y: u32,
        visual: Visual,
    ) -> PlatformHandle {
        self.insert_platform(Platform::new(x, y, size_x, size_y, visual))
    }

    pub fn insert_platform(&mut self, platform: Platform) -> PlatformHandle {
        let handle = self.platforms.insert(platform);
        self.platform_order.push(handle);
        tracing::debug!(?handle, rect = ?self.platforms[handle].rect(), "Platform created");
        handle
    }

    pub fn create_decoration(
        &mut self,
        x: i64,
        y: i64,
        size_x: u32,
        size_y: u32,
        visual: Visual,
    ) -> DecorationHandle {
        let handle = self
            .decorations
            .insert(Decoration::new(x, y, size_x, size_y, visual));
        self.decoration_order.push(handle);
        tracing::debug!(?handle, "Decoration created");
        handle
    }

    /// Remove a player from the world and every registry.
    pub fn destroy_player(&mut self, handle: PlayerHandle) -> Option<Player> {
        let player = self.players.remove(handle)?;
        self.player_order.retain(|&h| h != handle);
        self.player_collisions.remove(handle);
        tracing::debug!(?handle, "Player destroyed");
        Some(player)
    }

    pub fn destroy_platform(&mut self, handle: PlatformHandle) -> Option<Platform> {
        let platform = self.platforms.remove(handle)?;
        self.platform_order.retain(|&h| h != handle);
        self.platform_collisions.remove(handle);
        tracing::debug!(?handle, "Platform destroyed");
        Some(platform)
    }

    pub fn destroy_decoration(&mut self, handle: DecorationHandle) -> Option<Decoration> {
        let decoration = self.decorations.remove(handle)?;
        self.decoration_order.retain(|&h| h != handle);
        self.decoration_collisions.remove(handle);
        tracing::debug!(?handle, "Decoration destroyed");
        Some(decoration)
    }

    // ---- Collision registries ----

    pub fn enable_player_collisions(&mut self, handle: PlayerHandle) -> Result<(), WorldError> {
        if !self.players.contains_key(handle) {
            return Err(WorldError::StalePlayer(handle));
        }
        self.player_collisions.insert(handle);
        Ok(())
    }

    pub fn disable_player_collisions(&mut self, handle: PlayerHandle) -> Result<(), WorldError> {
        if !self.players.contains_key(handle) {
            return Err(WorldError::StalePlayer(handle));
        }
        self.player_collisions.remove(handle);
        Ok(())
    }

    pub fn enable_platform_collisions(&mut self, handle: PlatformHandle) -> Result<(), WorldError> {
        if !self.platforms.contains_key(handle) {
            return Err(WorldError::StalePlatform(handle));
        }
        self.platform_collisions.insert(handle);
        Ok(())
    }

    pub fn disable_platform_collisions(
        &mut self,
        handle: PlatformHandle,
    ) -> Result<(), WorldError> {
        if !self.platforms.contains_key(handle) {
            return Err(WorldError::StalePlatform(handle));
        }
        self.platform_collisions.remove(handle);
        Ok(())
    }

    pub fn enable_decoration_collisions(
        &mut self,
        handle: DecorationHandle,
    ) -> Result<(), WorldError> {
        if !self.decorations.contains_key(handle) {
            return Err(WorldError::StaleDecoration(handle));
        }
        self.decoration_collisions.insert(handle);
        Ok(())
    }

    pub fn disable_decoration_collisions(
        &mut self,
        handle: DecorationHandle,
    ) -> Result<(), WorldError> {
        if !self.decorations.contains_key(handle) {
            return Err(WorldError::StaleDecoration(handle));
        }
        self.decoration_collisions.remove(handle);
        Ok(())
    }

    pub fn player_collisions(&self) -> &CollisionRegistry<PlayerHandle> {
        &self.player_collisions
    }

    pub fn platform_collisions(&self) -> &CollisionRegistry<PlatformHandle> {
        &self.platform_collisions
    }

    pub fn decoration_collisions(&self) -> &CollisionRegistry<DecorationHandle> {
        &self.decoration_collisions
    }

    // ---- Input ----

    fn player_entry(&mut self, handle: PlayerHandle) -> Result<&mut Player, WorldError> {
        self.players
            .get_mut(handle)
            .ok_or(WorldError::StalePlayer(handle))
    }

    /// Set the horizontal acceleration read by every following tick.
    /// Non-finite values are treated as no input.
    pub fn set_horizontal_input(
        &mut self,
        handle: PlayerHandle,
        acceleration: f64,
    ) -> Result<(), WorldError> {
        let player = self.player_entry(handle)?;
        player.acceleration = if acceleration.is_finite() {
            acceleration
        } else {
            0.0
        };
        Ok(())
    }

    pub fn request_jump(&mut self, handle: PlayerHandle) -> Result<(), WorldError> {
        let physics = self.config.physics;
        jump::request_jump(self.player_entry(handle)?, &physics);
        Ok(())
    }

    pub fn set_triple_jump(
        &mut self,
        handle: PlayerHandle,
        enabled: bool,
    ) -> Result<(), WorldError> {
        self.player_entry(handle)?.triple_jump = enabled;
        Ok(())
    }

    /// Add a horizontal knockback impulse. It decays once the player is free.
    pub fn apply_knockback(
        &mut self,
        handle: PlayerHandle,
        impulse: f64,
    ) -> Result<(), WorldError> {
        let player = self.player_entry(handle)?;
        if impulse.is_finite() {
            player.collision_velocity += impulse;
        }
        Ok(())
    }

    pub fn apply_input(
        &mut self,
        handle: PlayerHandle,
        input: &PlayerInput,
    ) -> Result<(), WorldError> {
        self.set_horizontal_input(handle, input.acceleration)?;
        if input.jump {
            self.request_jump(handle)?;
        }
        Ok(())
    }

    /// Decode and apply a MessagePack `PlayerInput`. Malformed bytes are
    /// dropped.
    pub fn apply_encoded_input(
        &mut self,
        handle: PlayerHandle,
        data: &[u8],
    ) -> Result<(), WorldError> {
        match PlayerInput::from_bytes(data) {
            Ok(input) => self.apply_input(handle, &input),
            Err(e) => {
                tracing::debug!(?handle, error = %e, "Dropped malformed input");
                Ok(())
            },
        }
    }

    // ---- Simulation ----

    /// Advance the simulation by one fixed tick.
    pub fn step_physics(&mut self) {
        for &handle in &self.player_order {
            if let Some(player) = self.players.get_mut(handle) {
                integrate_player(player, &self.config.physics);
            }
        }

        separate_players(
            &mut self.players,
            self.player_collisions.as_slice(),
            &self.config.physics,
        );

        resolve_platform_collisions(
            &mut self.players,
            self.player_collisions.as_slice(),
            &self.platforms,
            self.platform_collisions.as_slice(),
        );

        for player in self.players.values_mut() {
            player.commit_position();
        }

        if self.phase == Phase::Playing {
            let mid = self.midpoint();
            self.camera.track(mid, &self.config.camera);
        }

        self.tick += 1;
    }

    // ---- Camera ----

    pub fn camera_offset(&self) -> CameraOffset {
        self.camera.offset()
    }

    /// Mean centre of the in-play players at their previous positions.
    pub fn midpoint(&self) -> (i64, i64) {
        camera::midpoint(self.players(), &self.config.camera)
    }

    pub fn longest_player_distance(&self) -> f64 {
        let players: Vec<&Player> = self.players().collect();
        camera::longest_distance(&players)
    }

    // ---- Accessors ----

    pub fn player(&self, handle: PlayerHandle) -> Option<&Player> {
        self.players.get(handle)
    }

    pub fn platform(&self, handle: PlatformHandle) -> Option<&Platform> {
        self.platforms.get(handle)
    }

    pub fn decoration(&self, handle: DecorationHandle) -> Option<&Decoration> {
        self.decorations.get(handle)
    }

    pub fn player_handles(&self) -> &[PlayerHandle] {
        &self.player_order
    }

    pub fn platform_handles(&self) -> &[PlatformHandle] {
        &self.platform_order
    }

    pub fn decoration_handles(&self) -> &[DecorationHandle] {
        &self.decoration_order
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.player_order.iter().filter_map(|&h| self.players.get(h))
    }

    pub fn platforms(&self) -> impl Iterator<Item = &Platform> + '_ {
        self.platform_order.iter().filter_map(|&h| self.platforms.get(h))
    }

    pub fn decorations(&self) -> impl Iterator<Item = &Decoration> + '_ {
        self.decoration_order
            .iter()
            .filter_map(|&h| self.decorations.get(h))
    }

    // ---- Snapshots ----

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.tick,
            phase: self.phase,
            players: self.players().cloned().collect(),
            platforms: self.platforms().cloned().collect(),
            decorations: self.decorations().cloned().collect(),
            camera: self.camera.offset(),
        }
    }

    pub fn serialize_snapshot(&self) -> Result<Vec<u8>, rmp_serde::encode::Error> {
        self.snapshot().to_bytes()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mayhem_core::test_helpers::{
        TEST_PLAYER_HEIGHT, TEST_PLAYER_WIDTH, TEST_VELOCITY_MAX, make_floor, make_player,
        make_players,
    };
    use mayhem_core::visual::Rgba;

    /// World with a floor whose top is at y = 10000 and one player standing on it.
    fn standing_world() -> (World, PlayerHandle) {
        let mut world = World::new();
        let floor = world.insert_platform(make_floor(10_000));
        world.enable_platform_collisions(floor).unwrap();
        let player = world.insert_player(make_player(50_000, 10_000));
        world.enable_player_collisions(player).unwrap();
        (world, player)
    }

    #[test]
    fn landing_resets_jump_state_the_tick_after_contact() {
        let (mut world, player) = standing_world();
        world.request_jump(player).unwrap();
        world.request_jump(player).unwrap();

        let mut landed_at = None;
        for tick in 0..200 {
            world.step_physics();
            let p = world.player(player).unwrap();
            if tick > 0 && p.jump_number == 0 {
                landed_at = Some(tick);
                assert_eq!(p.vertical_velocity, 0.0);
                assert_eq!(p.y, 10_000);
                break;
            }
        }
        assert!(landed_at.is_some(), "player never landed");
    }

    #[test]
    fn resting_player_stays_put() {
        let (mut world, player) = standing_world();
        for _ in 0..120 {
            world.step_physics();
            let p = world.player(player).unwrap();
            assert_eq!(p.y, 10_000);
            assert_eq!(p.y_before, 10_000);
            assert_eq!(p.vertical_velocity, 0.0);
            assert_eq!(p.jump_number, 0);
        }
    }

    #[test]
    fn walking_into_a_wall_stops_flush() {
        let mut world = World::new();
        let wall = world.create_platform(10_000, 0, 10_000, 10_000, Visual::default());
        world.enable_platform_collisions(wall).unwrap();

        // Right edge 1 unit short of the wall, no gravity so only x moves.
        let mut p = make_player(5_999, 2_000);
        p.gravity_acceleration = 0.0;
        p.velocity = 50.0;
        let player = world.insert_player(p);
        world.enable_player_collisions(player).unwrap();

        world.step_physics();
        let p = world.player(player).unwrap();
        assert_eq!(p.velocity, 0.0);
        assert_eq!(p.x, 10_000 - i64::from(TEST_PLAYER_WIDTH));
        assert_eq!(p.x_before, p.x);
    }

    #[test]
    fn unregistered_player_falls_through_platforms() {
        let mut world = World::new();
        let floor = world.insert_platform(make_floor(10_000));
        world.enable_platform_collisions(floor).unwrap();
        let player = world.insert_player(make_player(50_000, 10_000));

        world.step_physics();
        assert_eq!(world.player(player).unwrap().y, 9_940);
    }

    #[test]
    fn disabled_platform_is_ignored() {
        let (mut world, player) = standing_world();
        let floor = world.platform_handles()[0];
        world.disable_platform_collisions(floor).unwrap();
        world.step_physics();
        assert_eq!(world.player(player).unwrap().y, 9_940);
    }

    #[test]
    fn create_player_uses_configured_gravity() {
        let mut config = MayhemConfig::default();
        config.physics.gravity_acceleration = -10.0;
        config.physics.terminal_velocity = -100.0;
        let mut world = World::with_config(config);
        let handle = world.create_player(
            0,
            50_000,
            TEST_PLAYER_WIDTH,
            TEST_PLAYER_HEIGHT,
            TEST_VELOCITY_MAX,
            Visual::Solid(Rgba::WHITE),
        );
        let p = world.player(handle).unwrap();
        assert_eq!(p.gravity_acceleration, -10.0);
        assert_eq!(p.terminal_velocity, -100.0);
        assert_eq!(p.visual, Visual::Solid(Rgba::WHITE));
        assert!(!world.player_collisions().contains(handle));
    }

    #[test]
    fn destroy_purges_registries_and_invalidates_handle() {
        let (mut world, player) = standing_world();
        assert!(world.destroy_player(player).is_some());
        assert!(world.player_collisions().is_empty());
        assert!(world.player(player).is_none());
        assert!(world.player_handles().is_empty());
        assert_eq!(
            world.enable_player_collisions(player),
            Err(WorldError::StalePlayer(player))
        );
        assert_eq!(
            world.set_horizontal_input(player, 160.0),
            Err(WorldError::StalePlayer(player))
        );
        assert_eq!(world.request_jump(player), Err(WorldError::StalePlayer(player)));
        assert!(world.destroy_player(player).is_none());

        // The freed slot is reused with a new generation.
        let fresh = world.insert_player(make_player(0, 0));
        assert_ne!(fresh, player);
        assert!(world.player(player).is_none());
    }

    #[test]
    fn destroyed_platform_and_decoration_leave_registries() {
        let mut world = World::new();
        let platform = world.create_platform(0, 0, 10, 10, Visual::default());
        let decoration = world.create_decoration(0, 0, 10, 10, Visual::default());
        world.enable_platform_collisions(platform).unwrap();
        world.enable_decoration_collisions(decoration).unwrap();

        assert!(world.destroy_platform(platform).is_some());
        assert!(world.destroy_decoration(decoration).is_some());
        assert!(world.platform_collisions().is_empty());
        assert!(world.decoration_collisions().is_empty());
        assert_eq!(world.platforms().count(), 0);
        assert_eq!(world.decorations().count(), 0);
        assert_eq!(
            world.disable_platform_collisions(platform),
            Err(WorldError::StalePlatform(platform))
        );
        assert_eq!(
            world.disable_decoration_collisions(decoration),
            Err(WorldError::StaleDecoration(decoration))
        );
    }

    #[test]
    fn enrolment_is_idempotent() {
        let (mut world, player) = standing_world();
        world.enable_player_collisions(player).unwrap();
        assert_eq!(world.player_collisions().len(), 1);
        world.disable_player_collisions(player).unwrap();
        world.disable_player_collisions(player).unwrap();
        assert!(world.player_collisions().is_empty());
    }

    #[test]
    fn camera_frozen_in_menu_and_tracks_when_playing() {
        let (mut world, _) = standing_world();
        for _ in 0..10 {
            world.step_physics();
        }
        assert_eq!(world.camera_offset().x, 0);
        assert_eq!(world.camera_offset().y, 0);

        world.set_phase(Phase::Playing);
        world.step_physics();
        let offset = world.camera_offset();
        // Midpoint (52000, 13000): target (44000, 41000), one percent of it.
        assert_eq!((offset.x, offset.y), (440, 410));
        assert_eq!(world.tick(), 11);
    }

    #[test]
    fn non_finite_input_is_ignored() {
        let (mut world, player) = standing_world();
        world.set_horizontal_input(player, f64::NAN).unwrap();
        world.apply_knockback(player, f64::INFINITY).unwrap();
        world.step_physics();
        let p = world.player(player).unwrap();
        assert_eq!(p.x, 50_000);
        assert_eq!(p.collision_velocity, 0.0);
    }

    #[test]
    fn acceleration_persists_until_changed() {
        let (mut world, player) = standing_world();
        world.set_horizontal_input(player, 160.0).unwrap();
        world.step_physics();
        world.step_physics();
        // 0 + 160 -> 130, then 130 + 160 - 30 = 260.
        assert_eq!(world.player(player).unwrap().velocity, 260.0);

        world.set_horizontal_input(player, 0.0).unwrap();
        world.step_physics();
        assert_eq!(world.player(player).unwrap().velocity, 230.0);
    }

    #[test]
    fn encoded_input_applies_and_garbage_is_dropped() {
        let (mut world, player) = standing_world();
        let bytes = PlayerInput {
            acceleration: -160.0,
            jump: true,
        }
        .to_bytes()
        .unwrap();
        world.apply_encoded_input(player, &bytes).unwrap();
        let p = world.player(player).unwrap();
        assert_eq!(p.acceleration, -160.0);
        assert_eq!(p.jump_number, 1);
        assert_eq!(p.jump_acceleration, 700.0);

        world
            .apply_encoded_input(player, &[0xFF, 0xFE, 0x00, 0x01, 0xAB, 0xCD])
            .unwrap();
        let p = world.player(player).unwrap();
        assert_eq!(p.acceleration, -160.0);
        assert_eq!(p.jump_number, 1);
    }

    #[test]
    fn triple_jump_toggle_reaches_state_machine() {
        let (mut world, player) = standing_world();
        world.set_triple_jump(player, true).unwrap();
        for _ in 0..3 {
            world.request_jump(player).unwrap();
        }
        assert_eq!(world.player(player).unwrap().jump_acceleration, 450.0);
    }

    #[test]
    fn knockback_pushes_then_fades() {
        let (mut world, player) = standing_world();
        world.apply_knockback(player, 300.0).unwrap();
        world.step_physics();
        let p = world.player(player).unwrap();
        assert_eq!(p.x, 50_300);
        assert!((p.collision_velocity - 270.0).abs() < 1e-9);
    }

    #[test]
    fn spaced_players_fall_independently() {
        let mut world = World::new();
        let handles: Vec<_> = make_players(4)
            .into_iter()
            .map(|p| world.insert_player(p))
            .collect();
        for &h in &handles {
            world.enable_player_collisions(h).unwrap();
        }
        world.step_physics();
        for (i, &h) in handles.iter().enumerate() {
            let p = world.player(h).unwrap();
            assert_eq!(p.x, 10_000 + i as i64 * 20_000);
            assert_eq!(p.y, 49_940);
            assert_eq!(p.visual, Visual::Solid(Rgba::for_slot(i)));
        }
    }

    #[test]
    fn accessors_follow_creation_order() {
        let mut world = World::new();
        let a = world.insert_player(make_player(0, 0));
        let b = world.insert_player(make_player(30_000, 0));
        let c = world.insert_player(make_player(60_000, 0));
        world.destroy_player(b);
        let d = world.insert_player(make_player(90_000, 0));
        assert_eq!(world.player_handles(), &[a, c, d]);
        let xs: Vec<i64> = world.players().map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 60_000, 90_000]);
    }

    #[test]
    fn longest_player_distance_spans_extremes() {
        let mut world = World::new();
        world.insert_player(make_player(0, 0));
        world.insert_player(make_player(3_000, 4_000));
        world.insert_player(make_player(30_000, 40_000));
        assert_eq!(world.longest_player_distance(), 50_000.0);
    }

    #[test]
    fn snapshot_bytes_decode_to_same_frame() {
        let (mut world, _) = standing_world();
        world.create_decoration(0, 0, 500, 500, Visual::default());
        world.step_physics();
        let bytes = world.serialize_snapshot().unwrap();
        let decoded = WorldSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, world.snapshot());
        assert_eq!(decoded.tick, 1);
        assert_eq!(decoded.players.len(), 1);
        assert_eq!(decoded.platforms.len(), 1);
        assert_eq!(decoded.decorations.len(), 1);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn speed_limits_hold_every_tick(
                starts in prop::collection::vec(
                    (0i64..150_000, 0i64..80_000, 50.0f64..2_500.0),
                    1..5,
                ),
                inputs in prop::collection::vec(
                    (
                        prop::collection::vec(-2_000.0f64..2_000.0, 5),
                        prop::collection::vec(any::<bool>(), 5),
                    ),
                    1..120,
                ),
            ) {
                let mut world = World::new();
                let floor = world.insert_platform(make_floor(5_000));
                world.enable_platform_collisions(floor).unwrap();
                let ledge = world.create_platform(60_000, 30_000, 20_000, 2_000, Visual::default());
                world.enable_platform_collisions(ledge).unwrap();

                let handles: Vec<PlayerHandle> = starts
                    .iter()
                    .map(|&(x, y, velocity_max)| {
                        let mut player = make_player(x, y);
                        player.velocity_max = velocity_max;
                        let h = world.insert_player(player);
                        world.enable_player_collisions(h).unwrap();
                        world.set_triple_jump(h, true).unwrap();
                        h
                    })
                    .collect();

                for (accels, jumps) in &inputs {
                    for (i, &h) in handles.iter().enumerate() {
                        world.set_horizontal_input(h, accels[i]).unwrap();
                        if jumps[i] {
                            world.request_jump(h).unwrap();
                        }
                    }
                    world.step_physics();
                    for p in world.players() {
                        prop_assert!(p.velocity.abs() <= p.velocity_max, "velocity {}", p.velocity);
                        prop_assert!(
                            p.vertical_velocity >= p.terminal_velocity,
                            "vertical velocity {}",
                            p.vertical_velocity
                        );
                        prop_assert_eq!((p.x_before, p.y_before), (p.x, p.y));
                    }
                }
            }
        }
    }
}
