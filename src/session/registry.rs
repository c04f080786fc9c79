use std::{collections::HashMap, sync::Arc};

use indexmap::IndexMap;

use crate::{
    cutscene::Cutscene,
    foundation::core::{ResourceId, TICK_SECONDS, ViewerId},
    loader::CutsceneLoader,
};

use super::playback::{EndHook, PauseControl, PlaybackHooks, PlaybackSession, StartHook};

/// Owns the cutscene catalog, every active playback session, and the trigger
/// tables, and drives them all from one externally invoked [`tick`].
///
/// There is no global instance: the host constructs one registry, keeps the
/// handle, and calls `tick()` from its single simulation-step driver. All
/// internal maps are mutated only through the registry's own methods.
///
/// [`tick`]: SessionRegistry::tick
pub struct SessionRegistry {
    catalog: HashMap<ResourceId, Arc<Cutscene>>,
    /// Insertion-ordered so sessions advance in a stable order per tick.
    active: IndexMap<ViewerId, PlaybackSession>,
    item_triggers: HashMap<ResourceId, Arc<Cutscene>>,
    advancement_triggers: HashMap<ResourceId, Arc<Cutscene>>,
    loader: CutsceneLoader,
    hooks: PlaybackHooks,
    pause: Box<dyn PauseControl>,
}

impl SessionRegistry {
    pub fn new(loader: CutsceneLoader, pause: Box<dyn PauseControl>) -> Self {
        Self {
            catalog: HashMap::new(),
            active: IndexMap::new(),
            item_triggers: HashMap::new(),
            advancement_triggers: HashMap::new(),
            loader,
            hooks: PlaybackHooks::new(),
            pause,
        }
    }

    /// Register the cancellable pre-start notification hook.
    pub fn set_start_hook(&mut self, hook: StartHook) {
        self.hooks.set_start(hook);
    }

    /// Register the fire-and-forget post-end notification hook.
    pub fn set_end_hook(&mut self, hook: EndHook) {
        self.hooks.set_end(hook);
    }

    /// Put `cutscene` into the catalog under `id`. Overwriting an existing
    /// entry is allowed and logged.
    pub fn register(&mut self, id: ResourceId, cutscene: Cutscene) -> Arc<Cutscene> {
        let cutscene = Arc::new(cutscene);
        if self
            .catalog
            .insert(id.clone(), Arc::clone(&cutscene))
            .is_some()
        {
            tracing::info!(%id, "re-registered cutscene, previous entry replaced");
        } else {
            tracing::info!(%id, "registered cutscene");
        }
        cutscene
    }

    /// Load a cutscene through the loader and auto-register it.
    ///
    /// Load failures are already logged by the loader and surface as `None`.
    pub fn load(&mut self, id: &ResourceId) -> Option<Arc<Cutscene>> {
        let cutscene = self.loader.load(id)?;
        Some(self.register(id.clone(), cutscene))
    }

    pub fn get(&self, id: &ResourceId) -> Option<&Arc<Cutscene>> {
        self.catalog.get(id)
    }

    /// Start playing `cutscene` for `viewer`.
    ///
    /// A session the viewer already has is stopped first, end notification
    /// and all, before the new one starts. Returns `false` (with a warning)
    /// when the start hook cancels, in which case no session exists.
    pub fn play(&mut self, viewer: ViewerId, cutscene: &Arc<Cutscene>) -> bool {
        self.stop(viewer);

        let mut session = PlaybackSession::new(viewer, Arc::clone(cutscene));
        match session.start(&mut self.hooks, self.pause.as_mut()) {
            Ok(()) => {
                self.active.insert(viewer, session);
                true
            }
            Err(err) => {
                tracing::warn!(%viewer, cutscene = %cutscene.id, %err, "cutscene did not start");
                false
            }
        }
    }

    /// Start playing the catalog entry `id` for `viewer`. Returns `false`
    /// when the id is unknown.
    pub fn play_id(&mut self, viewer: ViewerId, id: &ResourceId) -> bool {
        let Some(cutscene) = self.catalog.get(id).cloned() else {
            tracing::warn!(%id, "cannot play unknown cutscene");
            return false;
        };
        self.play(viewer, &cutscene)
    }

    /// Stop and remove the viewer's active session, if any.
    pub fn stop(&mut self, viewer: ViewerId) {
        if let Some(mut session) = self.active.shift_remove(&viewer) {
            session.stop(&mut self.hooks, self.pause.as_mut());
        }
    }

    pub fn is_playing(&self, viewer: ViewerId) -> bool {
        self.active.contains_key(&viewer)
    }

    pub fn session(&self, viewer: ViewerId) -> Option<&PlaybackSession> {
        self.active.get(&viewer)
    }

    pub fn active_sessions(&self) -> usize {
        self.active.len()
    }

    /// Advance every active session by one fixed step, then drop the
    /// finished ones.
    ///
    /// Only sessions present when the tick began are advanced; a session
    /// inserted while the tick runs waits for the next one. Removal happens
    /// strictly after all advancing, so a `Finished` transition becomes
    /// visible to queries on the following tick.
    pub fn tick(&mut self) {
        let viewers: Vec<ViewerId> = self.active.keys().copied().collect();
        for viewer in viewers {
            if let Some(session) = self.active.get_mut(&viewer) {
                session.advance(TICK_SECONDS, &mut self.hooks, self.pause.as_mut());
            }
        }
        self.active.retain(|_, session| !session.is_finished());
    }

    /// Map an item key to a cutscene played when the item is picked up.
    /// The last registration for a key wins.
    pub fn register_item_trigger(&mut self, item: ResourceId, cutscene: Arc<Cutscene>) {
        tracing::info!(%item, cutscene = %cutscene.id, "registered item trigger");
        self.item_triggers.insert(item, cutscene);
    }

    /// Map an advancement key to a cutscene played when it is earned.
    /// The last registration for a key wins.
    pub fn register_advancement_trigger(&mut self, advancement: ResourceId, cutscene: Arc<Cutscene>) {
        tracing::info!(%advancement, cutscene = %cutscene.id, "registered advancement trigger");
        self.advancement_triggers.insert(advancement, cutscene);
    }

    pub fn item_trigger(&self, item: &ResourceId) -> Option<&Arc<Cutscene>> {
        self.item_triggers.get(item)
    }

    pub fn advancement_trigger(&self, advancement: &ResourceId) -> Option<&Arc<Cutscene>> {
        self.advancement_triggers.get(advancement)
    }

    /// Host entry point for item-pickup events. Plays the mapped cutscene,
    /// if any; returns whether one fired.
    pub fn trigger_item_pickup(&mut self, viewer: ViewerId, item: &ResourceId) -> bool {
        let Some(cutscene) = self.item_triggers.get(item).cloned() else {
            return false;
        };
        tracing::info!(%item, %viewer, "item trigger activated");
        self.play(viewer, &cutscene)
    }

    /// Host entry point for advancement events. Plays the mapped cutscene,
    /// if any; returns whether one fired.
    pub fn trigger_advancement(&mut self, viewer: ViewerId, advancement: &ResourceId) -> bool {
        let Some(cutscene) = self.advancement_triggers.get(advancement).cloned() else {
            return false;
        };
        tracing::info!(%advancement, %viewer, "advancement trigger activated");
        self.play(viewer, &cutscene)
    }
}
