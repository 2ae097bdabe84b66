use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use mayhem_core::handle::DecorationHandle;
use mayhem_core::visual::{Rgba, Visual};
use mayhem_physics::{MayhemConfig, Phase, World};

use crate::error::ScenarioError;
use crate::input::BotDriver;
use crate::scenario::{Control, PlayerSlot, Scenario};

/// Commands sent into a running session.
#[derive(Debug)]
pub enum HostCommand {
    /// MessagePack-encoded `PlayerInput` for the player in `slot`.
    PlayerInput { slot: usize, input_data: Vec<u8> },
    Knockback { slot: usize, impulse: f64 },
    Stop,
}

/// Width and height of one menu selection box.
const MENU_BOX_SIZE: (u32, u32) = (48_000, 54_000);

/// A world plus everything that drives it between ticks.
pub struct Session {
    world: World,
    slots: Vec<PlayerSlot>,
    bots: Vec<Option<BotDriver>>,
    menu_ticks: u64,
    max_ticks: u64,
    menu_boxes: Vec<DecorationHandle>,
}

impl Session {
    pub fn new(scenario: &Scenario, config: MayhemConfig) -> Result<Self, ScenarioError> {
        let (mut world, slots) = scenario.build_world(config)?;

        let bots = slots
            .iter()
            .enumerate()
            .map(|(i, slot)| match slot.control {
                Control::Bot => Some(BotDriver::new(scenario.seed.wrapping_add(i as u64))),
                Control::Remote => None,
            })
            .collect();

        // One coloured box per player slot, two rows of four, shown until play starts.
        let menu_boxes = if scenario.menu_ticks > 0 {
            (0..slots.len().min(Rgba::PALETTE.len()))
                .map(|i| {
                    let (w, h) = MENU_BOX_SIZE;
                    let x = (i % 4) as i64 * i64::from(w);
                    let y = if i < 4 { i64::from(h) } else { 0 };
                    world.create_decoration(x, y, w, h, Visual::Solid(Rgba::for_slot(i)))
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut session = Self {
            world,
            slots,
            bots,
            menu_ticks: scenario.menu_ticks,
            max_ticks: scenario.max_ticks,
            menu_boxes,
        };
        if session.menu_ticks == 0 {
            session.start_play();
        }
        Ok(session)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn slots(&self) -> &[PlayerSlot] {
        &self.slots
    }

    fn start_play(&mut self) {
        for handle in self.menu_boxes.drain(..) {
            self.world.destroy_decoration(handle);
        }
        self.world.set_phase(Phase::Playing);
        tracing::info!(
            tick = self.world.tick(),
            players = self.slots.len(),
            "Match started"
        );
    }

    /// Run one tick. Returns `false` once the tick budget is spent.
    pub fn tick(&mut self) -> bool {
        if self.world.phase() == Phase::Menu && self.world.tick() >= self.menu_ticks {
            self.start_play();
        }

        if self.world.phase() == Phase::Playing {
            for (slot, bot) in self.slots.iter().zip(self.bots.iter_mut()) {
                let Some(bot) = bot else {
                    continue;
                };
                let input = bot.next_input();
                if let Err(e) = self.world.apply_input(slot.handle, &input) {
                    tracing::debug!(error = %e, "Bot input for missing player");
                }
            }
        }

        self.world.step_physics();

        self.max_ticks == 0 || self.world.tick() < self.max_ticks
    }

    pub fn handle_command(&mut self, cmd: HostCommand) {
        match cmd {
            HostCommand::PlayerInput { slot, input_data } => {
                let Some(player) = self.slots.get(slot) else {
                    tracing::debug!(slot, "Input for unknown slot");
                    return;
                };
                if let Err(e) = self.world.apply_encoded_input(player.handle, &input_data) {
                    tracing::debug!(slot, error = %e, "Input for missing player");
                }
            },
            HostCommand::Knockback { slot, impulse } => {
                let Some(player) = self.slots.get(slot) else {
                    tracing::debug!(slot, "Knockback for unknown slot");
                    return;
                };
                if let Err(e) = self.world.apply_knockback(player.handle, impulse) {
                    tracing::debug!(slot, error = %e, "Knockback for missing player");
                }
            },
            HostCommand::Stop => {},
        }
    }
}

/// Period for `tick_rate_hz`, or the 60 Hz period when the rate has no usable
/// non-zero period.
fn tick_period(tick_rate_hz: f32) -> Duration {
    match Duration::try_from_secs_f32(1.0 / tick_rate_hz) {
        Ok(period) if !period.is_zero() => period,
        _ => {
            tracing::warn!(tick_rate_hz, "Invalid tick rate, using 60 Hz");
            Duration::from_secs_f64(1.0 / 60.0)
        },
    }
}

/// Spawn a fixed-rate session loop as a tokio task.
/// The task hands the session back when it stops.
pub fn spawn_session(
    session: Session,
    tick_rate_hz: f32,
) -> (mpsc::UnboundedSender<HostCommand>, JoinHandle<Session>) {
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(run_session(session, tick_rate_hz, cmd_rx));
    (cmd_tx, handle)
}

/// Tick `session` at `tick_rate_hz` until the budget runs out, a `Stop`
/// arrives, or every command sender is dropped.
pub async fn run_session(
    mut session: Session,
    tick_rate_hz: f32,
    mut cmd_rx: mpsc::UnboundedReceiver<HostCommand>,
) -> Session {
    let mut interval = tokio::time::interval(tick_period(tick_rate_hz));
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if !session.tick() {
                    tracing::info!(tick = session.world().tick(), "Tick budget reached");
                    break;
                }
            }
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(HostCommand::Stop) | None => {
                        tracing::info!(tick = session.world().tick(), "Session stopped");
                        break;
                    },
                    Some(cmd) => session.handle_command(cmd),
                }
            }
        }
    }

    session
}
