//! The orchestrator.
//!
//! `Engine` is the only mutable facade. Every public operation takes the
//! engine lock: queries take it for reading, `start`, `submit_action` and
//! `end_phase` for writing. Phase processing runs entirely under the write
//! lock:
//!
//! ```text
//! resolve -> apply -> check victory -> transition
//! ```
//!
//! Notifications are collected while the lock is held and delivered after
//! it is released, so a handler may call back into the engine.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info, warn};

use crate::core::{
    ActionKind, ActionUse, ApplyResult, Camp, GameConfig, GameState, Phase, PlayerId,
    PlayerRecord, Role, SubmittedAction,
};
use crate::effects::{Effect, EffectKind};
use crate::error::{EngineError, EngineResult};
use crate::phases::PhaseManager;
use crate::resolvers::resolver_for;
use crate::rules::Victory;

use super::event::{ChatMessage, GameEvent};
use super::info::PhaseInfo;
use super::observer::{HandlerError, Observers};
use super::replay::ReplayLog;

/// Everything behind the engine lock.
#[derive(Debug)]
struct Inner {
    config: Arc<GameConfig>,
    phases: PhaseManager,
    state: GameState,
    /// Actions buffered for the current phase.
    buffer: Vec<SubmittedAction>,
    /// Every effect produced since the game started.
    history: Vec<Effect>,
    winner: Option<Victory>,
    log: ReplayLog,
}

/// A single game instance.
///
/// ## Example
///
/// ```
/// use werewolf_engine::core::{ActionKind, ActionUse, Phase, Role};
/// use werewolf_engine::engine::Engine;
///
/// let engine = Engine::standard();
/// let roster = [
///     ("w1", Role::Werewolf),
///     ("s1", Role::Seer),
///     ("v1", Role::Villager),
///     ("v2", Role::Villager),
/// ];
/// for (id, role) in roster {
///     engine.add_player(id, role, role.camp()).unwrap();
/// }
/// engine.start().unwrap();
/// assert_eq!(engine.current_phase(), Phase::NightGuard);
///
/// engine.end_phase().unwrap(); // no guard on this roster
/// engine.submit_action(ActionUse::targeted("w1", ActionKind::Kill, "v1")).unwrap();
/// engine.end_phase().unwrap();
/// assert_eq!(engine.night_kill_target().map(|p| p.to_string()), Some("v1".to_string()));
/// ```
#[derive(Debug)]
pub struct Engine {
    inner: RwLock<Inner>,
    observers: Observers,
}

impl Engine {
    /// Create an engine for a configuration.
    pub fn new(config: GameConfig) -> Self {
        let log = ReplayLog::new(config.clone());
        let config = Arc::new(config);
        Self {
            inner: RwLock::new(Inner {
                phases: PhaseManager::new(config.clone()),
                config,
                state: GameState::new(),
                buffer: Vec::new(),
                history: Vec::new(),
                winner: None,
                log,
            }),
            observers: Observers::new(),
        }
    }

    /// Create an engine with the classic phase graph and default rules.
    pub fn standard() -> Self {
        Self::new(GameConfig::standard())
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    // === Setup ===

    /// Add a player to the roster. Only allowed before `start`.
    pub fn add_player(&self, id: impl Into<PlayerId>, role: Role, camp: Camp) -> EngineResult<()> {
        let id = id.into();
        let mut inner = self.write();
        inner.state.add_player(id.clone(), role, camp)?;
        inner.log.record_player(id, role, camp);
        Ok(())
    }

    /// Leave the initial phase and enter the first night at round 1.
    pub fn start(&self) -> EngineResult<()> {
        let event = {
            let mut inner = self.write();
            if inner.state.phase != Phase::Start {
                return Err(EngineError::GameAlreadyStarted);
            }

            let next = inner.phases.next_phase(&inner.state, false);
            inner.state.transition_to(next);
            inner.log.record_start();
            info!(players = inner.state.player_count(), phase = %next, "game started");

            GameEvent::PhaseChanged {
                from: Phase::Start,
                to: next,
                round: inner.state.round,
            }
        };

        self.observers.notify_events(&[event]);
        Ok(())
    }

    // === Actions ===

    /// Validate an action and buffer it for the current phase.
    pub fn submit_action(&self, action: ActionUse) -> EngineResult<()> {
        let mut inner = self.write();
        if let Err(error) = inner.phases.validate(&inner.state, &action) {
            warn!(player = %action.player, action = %action.kind, %error, "action rejected");
            return Err(error);
        }

        let submitted = SubmittedAction::stamp(action, inner.state.phase, inner.state.round);
        debug!(
            player = %submitted.player,
            action = %submitted.kind,
            target = ?submitted.target,
            phase = %submitted.phase,
            "action buffered"
        );
        inner.buffer.push(submitted);
        Ok(())
    }

    /// Resolve and apply the current phase, then move on.
    ///
    /// Returns every effect the phase produced, canceled ones included.
    pub fn end_phase(&self) -> EngineResult<Vec<Effect>> {
        let (effects, events) = {
            let mut inner = self.write();
            inner.end_phase()?
        };

        self.observers.notify_events(&events);
        Ok(effects)
    }

    /// `end_phase` restricted to the night sub-phases.
    pub fn end_sub_step(&self) -> EngineResult<Vec<Effect>> {
        let (effects, events) = {
            let mut inner = self.write();
            let phase = inner.state.phase;
            if phase.sub_step().is_none() && !phase.is_terminal() && phase != Phase::Start {
                return Err(EngineError::InvalidPhase {
                    expected: "a night sub-phase".to_string(),
                    actual: phase,
                });
            }
            inner.end_phase()?
        };

        self.observers.notify_events(&events);
        Ok(effects)
    }

    /// Send a chat message, routed by phase.
    ///
    /// Werewolves talk among themselves at night; everyone alive talks
    /// during the day. Nobody else may chat.
    pub fn send_message(
        &self,
        from: impl Into<PlayerId>,
        content: impl Into<String>,
    ) -> EngineResult<()> {
        let from = from.into();
        let message = {
            let inner = self.read();
            let state = &inner.state;
            match state.phase {
                Phase::Start => return Err(EngineError::GameNotStarted),
                Phase::End => return Err(EngineError::GameEnded),
                _ => {}
            }

            let sender = state
                .player(&from)
                .ok_or_else(|| EngineError::PlayerNotFound(from.clone()))?;
            if !sender.alive {
                return Err(EngineError::PlayerDead(from));
            }

            let hears: fn(&PlayerRecord) -> bool = if state.phase == Phase::Day {
                |_| true
            } else if state.phase.is_night() && sender.is_wolf() {
                PlayerRecord::is_wolf
            } else {
                return Err(EngineError::MessageNotAllowed {
                    player: from,
                    phase: state.phase,
                });
            };

            ChatMessage {
                recipients: state
                    .alive_players()
                    .filter(|p| p.id != from && hears(p))
                    .map(|p| p.id.clone())
                    .collect(),
                from,
                content: content.into(),
                phase: state.phase,
                round: state.round,
            }
        };

        self.observers.notify_message(&message);
        Ok(())
    }

    // === Observers ===

    /// Register a handler for game notifications.
    pub fn register_event_handler<F>(&self, handler: F)
    where
        F: Fn(&GameEvent) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.observers.add_event_handler(handler);
    }

    /// Register a handler for chat messages.
    pub fn register_message_handler<F>(&self, handler: F)
    where
        F: Fn(&ChatMessage) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        self.observers.add_message_handler(handler);
    }

    // === Queries ===

    #[must_use]
    pub fn current_phase(&self) -> Phase {
        self.read().state.phase
    }

    #[must_use]
    pub fn current_round(&self) -> u32 {
        self.read().state.round
    }

    /// Index of the current night sub-phase.
    #[must_use]
    pub fn current_sub_step(&self) -> Option<usize> {
        self.read().state.phase.sub_step()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.read().state.phase.is_terminal()
    }

    #[must_use]
    pub fn winner(&self) -> Option<Victory> {
        self.read().winner
    }

    /// Tonight's victim as currently known.
    #[must_use]
    pub fn night_kill_target(&self) -> Option<PlayerId> {
        self.read().state.context.kill_target.clone()
    }

    /// Actions a player may submit right now.
    #[must_use]
    pub fn allowed_actions(&self, player: &PlayerId) -> Vec<ActionKind> {
        let inner = self.read();
        match inner.state.player(player) {
            Some(record) => inner.phases.allowed_for_player(&inner.state, record),
            None => Vec::new(),
        }
    }

    /// Other werewolves, visible only to a werewolf.
    #[must_use]
    pub fn wolf_teammates(&self, player: &PlayerId) -> Vec<PlayerId> {
        self.read().state.wolf_teammates(player)
    }

    /// Who must act now and what each role may observe.
    #[must_use]
    pub fn phase_info(&self) -> PhaseInfo {
        let inner = self.read();
        PhaseInfo::project(&inner.state, &inner.phases)
    }

    /// Copy of a player's record.
    #[must_use]
    pub fn player(&self, id: &PlayerId) -> Option<PlayerRecord> {
        self.read().state.player(id).cloned()
    }

    /// Copy of every player's record, in roster order.
    #[must_use]
    pub fn players(&self) -> Vec<PlayerRecord> {
        self.read().state.players().to_vec()
    }

    /// Copy of the full game state.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.read().state.clone()
    }

    /// Every effect produced so far, in order.
    #[must_use]
    pub fn effect_history(&self) -> Vec<Effect> {
        self.read().history.clone()
    }

    /// Actions buffered for the current phase.
    #[must_use]
    pub fn pending_actions(&self) -> Vec<SubmittedAction> {
        self.read().buffer.clone()
    }

    /// The configuration this engine runs.
    #[must_use]
    pub fn config(&self) -> Arc<GameConfig> {
        self.read().config.clone()
    }

    // === Replay ===

    /// Copy of the replay log so far.
    #[must_use]
    pub fn replay_log(&self) -> ReplayLog {
        self.read().log.clone()
    }

    /// Rebuild a game by re-running a replay log.
    pub fn replay(log: &ReplayLog) -> EngineResult<Self> {
        let engine = Self::new(log.config.clone());
        for entry in &log.roster {
            engine.add_player(entry.id.clone(), entry.role, entry.camp)?;
        }
        if !log.started {
            return Ok(engine);
        }
        engine.start()?;

        for record in &log.phases {
            let mut inner = engine.write();
            if inner.state.phase != record.phase || inner.state.round != record.round {
                return Err(EngineError::Replay(format!(
                    "expected {} in round {}, engine is at {} in round {}",
                    record.phase, record.round, inner.state.phase, inner.state.round
                )));
            }
            inner.buffer = record.actions.clone();
            inner.end_phase()?;
        }

        Ok(engine)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::standard()
    }
}

impl Inner {
    /// One full phase step. Caller holds the write lock.
    fn end_phase(&mut self) -> EngineResult<(Vec<Effect>, Vec<GameEvent>)> {
        let phase = self.state.phase;
        match phase {
            Phase::Start => return Err(EngineError::GameNotStarted),
            Phase::End => return Err(EngineError::GameEnded),
            _ => {}
        }
        let round = self.state.round;
        let actions = std::mem::take(&mut self.buffer);

        let effects = match resolver_for(phase) {
            Some(resolver) => resolver.resolve(&actions, &self.state, &self.config),
            None => Vec::new(),
        };

        let just_triggered = apply_all(&mut self.state, &effects);

        let mut events: Vec<GameEvent> = effects
            .iter()
            .filter(|e| !e.kind.is_internal())
            .map(|e| GameEvent::from_effect(e.clone(), phase, round))
            .collect();

        self.history.extend(effects.iter().cloned());
        self.log.record_phase(phase, round, actions);

        let next = match self.state.check_victory() {
            Some(winner) => {
                self.winner = Some(winner);
                Phase::End
            }
            None => self.phases.next_phase(&self.state, just_triggered),
        };
        self.state.transition_to(next);
        info!(
            from = %phase,
            to = %next,
            round = self.state.round,
            effects = effects.len(),
            "phase ended"
        );

        events.push(GameEvent::PhaseChanged {
            from: phase,
            to: next,
            round: self.state.round,
        });
        if let Some(winner) = self.winner {
            info!(%winner, round, "game ended");
            events.push(GameEvent::GameEnded { winner, round });
        }

        Ok((effects, events))
    }
}

/// Apply effects in order. Returns whether a hunter was triggered.
///
/// A failed effect is logged and the rest still apply.
fn apply_all(state: &mut GameState, effects: &[Effect]) -> bool {
    let mut just_triggered = false;
    for effect in effects {
        match state.apply_effect(effect) {
            ApplyResult::Success => {
                just_triggered |= effect.kind == EffectKind::HunterTriggered;
            }
            ApplyResult::Skipped => {}
            ApplyResult::Failed(reason) => {
                warn!(effect = %effect, phase = %state.phase, %reason, "effect not applied");
            }
        }
    }
    just_triggered
}
