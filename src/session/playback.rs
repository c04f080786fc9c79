use std::sync::Arc;

use crate::{
    cutscene::Cutscene,
    foundation::{
        core::ViewerId,
        error::{CinereelError, CinereelResult},
    },
    timeline::{CameraState, Frame},
};

/// Host seam for pausing and resuming the simulation while a cutscene plays.
pub trait PauseControl {
    fn set_paused(&mut self, paused: bool);
}

/// In-memory pause flag for hosts that poll the pause state each step.
#[derive(Debug, Default)]
pub struct SimulationPause {
    paused: bool,
}

impl SimulationPause {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }
}

impl PauseControl for SimulationPause {
    fn set_paused(&mut self, paused: bool) {
        if self.paused != paused {
            tracing::debug!(paused, "simulation pause toggled");
        }
        self.paused = paused;
    }
}

/// Fired before a session starts. Returning `false` cancels the start.
pub type StartHook = Box<dyn FnMut(ViewerId, &Cutscene) -> bool>;

/// Fired after a session ends. Not cancellable.
pub type EndHook = Box<dyn FnMut(ViewerId, &Cutscene)>;

/// The two notification points around a session's lifetime.
#[derive(Default)]
pub struct PlaybackHooks {
    start: Option<StartHook>,
    end: Option<EndHook>,
}

impl PlaybackHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_start(&mut self, hook: StartHook) {
        self.start = Some(hook);
    }

    pub fn set_end(&mut self, hook: EndHook) {
        self.end = Some(hook);
    }

    fn fire_start(&mut self, viewer: ViewerId, cutscene: &Cutscene) -> bool {
        match &mut self.start {
            Some(hook) => hook(viewer, cutscene),
            None => true,
        }
    }

    fn fire_end(&mut self, viewer: ViewerId, cutscene: &Cutscene) {
        if let Some(hook) = &mut self.end {
            hook(viewer, cutscene);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    /// Terminal. A finished session is removed from the registry, never
    /// restarted.
    Finished,
}

/// One viewer's playback of one cutscene, advanced by the registry once per
/// simulation step.
///
/// Publishes the camera pose and the current frame as snapshots the renderer
/// reads between steps.
pub struct PlaybackSession {
    viewer: ViewerId,
    cutscene: Arc<Cutscene>,
    current_time: f32,
    state: PlaybackState,
    camera_snapshot: Option<CameraState>,
    frame_snapshot: Option<Frame>,
}

impl PlaybackSession {
    pub fn new(viewer: ViewerId, cutscene: Arc<Cutscene>) -> Self {
        Self {
            viewer,
            cutscene,
            current_time: 0.0,
            state: PlaybackState::Stopped,
            camera_snapshot: None,
            frame_snapshot: None,
        }
    }

    pub fn viewer(&self) -> ViewerId {
        self.viewer
    }

    pub fn cutscene(&self) -> &Arc<Cutscene> {
        &self.cutscene
    }

    pub fn current_time(&self) -> f32 {
        self.current_time
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// Camera pose from the last advance, if the cutscene has an inline
    /// camera path.
    pub fn camera_snapshot(&self) -> Option<CameraState> {
        self.camera_snapshot
    }

    /// Frame from the last advance, if the cutscene has a frame timeline.
    pub fn frame_snapshot(&self) -> Option<&Frame> {
        self.frame_snapshot.as_ref()
    }

    /// Begin playback from time zero.
    ///
    /// No-op when already playing. The cancellable pre-start hook fires
    /// before any state change; a cancelled start leaves the session
    /// `Stopped` and is reported as an error.
    pub fn start(
        &mut self,
        hooks: &mut PlaybackHooks,
        pause: &mut dyn PauseControl,
    ) -> CinereelResult<()> {
        match self.state {
            PlaybackState::Playing => return Ok(()),
            PlaybackState::Finished => {
                return Err(CinereelError::playback(format!(
                    "finished session for '{}' cannot restart",
                    self.cutscene.id
                )));
            }
            PlaybackState::Stopped => {}
        }

        self.current_time = 0.0;

        if !hooks.fire_start(self.viewer, &self.cutscene) {
            return Err(CinereelError::playback(format!(
                "start of '{}' was cancelled",
                self.cutscene.id
            )));
        }

        self.state = PlaybackState::Playing;
        if self.cutscene.pause_on_play {
            pause.set_paused(true);
        }

        tracing::info!(viewer = %self.viewer, cutscene = %self.cutscene.id, "cutscene started");
        Ok(())
    }

    /// Advance playback by `dt` seconds and republish the snapshots.
    ///
    /// No-op unless playing. Reaching the cutscene's duration stops the
    /// session.
    pub fn advance(&mut self, dt: f32, hooks: &mut PlaybackHooks, pause: &mut dyn PauseControl) {
        if self.state != PlaybackState::Playing {
            return;
        }

        self.current_time += dt;
        if self.current_time >= self.cutscene.duration {
            self.stop(hooks, pause);
            return;
        }

        if self.cutscene.camera.is_some() {
            self.camera_snapshot = Some(self.cutscene.camera_state_at(self.current_time));
        }
        self.frame_snapshot = self.cutscene.frame_at(self.current_time).cloned();
    }

    /// End playback.
    ///
    /// No-op unless playing. Resumes the simulation unconditionally, even
    /// when this cutscene never paused it, then fires the end hook.
    pub fn stop(&mut self, hooks: &mut PlaybackHooks, pause: &mut dyn PauseControl) {
        if self.state != PlaybackState::Playing {
            return;
        }

        self.state = PlaybackState::Finished;
        pause.set_paused(false);
        hooks.fire_end(self.viewer, &self.cutscene);

        tracing::info!(viewer = %self.viewer, cutscene = %self.cutscene.id, "cutscene stopped");
    }

    /// Playback progress in `[0, 1]`. A non-positive duration reports `1.0`.
    pub fn progress(&self) -> f32 {
        if self.cutscene.duration <= 0.0 {
            return 1.0;
        }
        (self.current_time / self.cutscene.duration).min(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        foundation::core::{ResourceId, TICK_SECONDS, Vec3},
        timeline::{CameraKind, CameraPath, Frame, FrameTimeline, Keyframe},
    };
    use std::{cell::RefCell, rc::Rc};

    fn cutscene(duration: f32) -> Arc<Cutscene> {
        let mut cutscene = Cutscene::new(ResourceId::parse("test:scene").unwrap());
        cutscene.duration = duration;
        let mut path = CameraPath::new(CameraKind::Path);
        path.push(Keyframe::new(0.0, Vec3::ZERO, Vec3::ZERO));
        path.push(Keyframe::new(
            duration,
            Vec3::new(duration, 0.0, 0.0),
            Vec3::ZERO,
        ));
        cutscene.camera = Some(path);
        Arc::new(cutscene)
    }

    fn session(duration: f32) -> PlaybackSession {
        PlaybackSession::new(ViewerId::random(), cutscene(duration))
    }

    #[test]
    fn progress_is_monotonic_and_clamped() {
        let mut hooks = PlaybackHooks::new();
        let mut pause = SimulationPause::new();
        let mut session = session(0.2);
        session.start(&mut hooks, &mut pause).unwrap();

        let mut last = 0.0;
        for _ in 0..8 {
            session.advance(TICK_SECONDS, &mut hooks, &mut pause);
            let p = session.progress();
            assert!(p >= last);
            assert!(p <= 1.0);
            last = p;
        }
        assert_eq!(last, 1.0);
        assert!(session.is_finished());
    }

    #[test]
    fn degenerate_duration_reports_full_progress() {
        let session = session(0.0);
        assert_eq!(session.progress(), 1.0);
    }

    #[test]
    fn advance_updates_snapshots() {
        let mut hooks = PlaybackHooks::new();
        let mut pause = SimulationPause::new();
        let mut session = session(1.0);
        session.start(&mut hooks, &mut pause).unwrap();

        session.advance(TICK_SECONDS, &mut hooks, &mut pause);
        let camera = session.camera_snapshot().unwrap();
        assert!((camera.position.x - TICK_SECONDS).abs() < 1e-5);
        assert_eq!(session.current_time(), TICK_SECONDS);
    }

    #[test]
    fn frame_snapshot_follows_the_timeline() {
        let mut raw = Cutscene::new(ResourceId::parse("test:frames").unwrap());
        raw.duration = 1.0;
        let mut timeline = FrameTimeline::new();
        timeline.push(Frame::new(0.0));
        raw.frames = timeline;

        let mut hooks = PlaybackHooks::new();
        let mut pause = SimulationPause::new();
        let mut session = PlaybackSession::new(ViewerId::random(), Arc::new(raw));
        session.start(&mut hooks, &mut pause).unwrap();
        session.advance(TICK_SECONDS, &mut hooks, &mut pause);

        assert!(session.frame_snapshot().is_some());
        // No camera path on this cutscene, so no camera snapshot either.
        assert!(session.camera_snapshot().is_none());
    }

    #[test]
    fn start_is_a_noop_while_playing() {
        let mut hooks = PlaybackHooks::new();
        let mut pause = SimulationPause::new();
        let mut session = session(1.0);
        session.start(&mut hooks, &mut pause).unwrap();
        session.advance(TICK_SECONDS, &mut hooks, &mut pause);

        session.start(&mut hooks, &mut pause).unwrap();
        // Time was not reset by the second start.
        assert_eq!(session.current_time(), TICK_SECONDS);
    }

    #[test]
    fn cancelled_start_leaves_session_stopped() {
        let mut hooks = PlaybackHooks::new();
        hooks.set_start(Box::new(|_, _| false));
        let ended = Rc::new(RefCell::new(0));
        let ended_count = ended.clone();
        hooks.set_end(Box::new(move |_, _| *ended_count.borrow_mut() += 1));

        let mut pause = SimulationPause::new();
        let mut session = session(1.0);
        assert!(session.start(&mut hooks, &mut pause).is_err());
        assert_eq!(session.state(), PlaybackState::Stopped);
        assert!(!pause.is_paused());

        // A session that never started has nothing to stop.
        session.stop(&mut hooks, &mut pause);
        assert_eq!(*ended.borrow(), 0);
    }

    #[test]
    fn pause_engages_on_start_and_releases_on_stop() {
        let mut hooks = PlaybackHooks::new();
        let mut pause = SimulationPause::new();
        let mut session = session(1.0);

        session.start(&mut hooks, &mut pause).unwrap();
        assert!(pause.is_paused());
        session.stop(&mut hooks, &mut pause);
        assert!(!pause.is_paused());
    }

    #[test]
    fn non_pausing_cutscene_still_resumes_on_stop() {
        let mut raw = Cutscene::new(ResourceId::parse("test:nopause").unwrap());
        raw.duration = 1.0;
        raw.pause_on_play = false;

        let mut hooks = PlaybackHooks::new();
        let mut pause = SimulationPause::new();
        pause.set_paused(true);

        let mut session = PlaybackSession::new(ViewerId::random(), Arc::new(raw));
        session.start(&mut hooks, &mut pause).unwrap();
        assert!(pause.is_paused());
        session.stop(&mut hooks, &mut pause);
        assert!(!pause.is_paused());
    }

    #[test]
    fn end_hook_fires_once_on_natural_expiry() {
        let ended = Rc::new(RefCell::new(0));
        let ended_count = ended.clone();
        let mut hooks = PlaybackHooks::new();
        hooks.set_end(Box::new(move |_, _| *ended_count.borrow_mut() += 1));

        let mut pause = SimulationPause::new();
        let mut session = session(2.0 * TICK_SECONDS);
        session.start(&mut hooks, &mut pause).unwrap();

        for _ in 0..5 {
            session.advance(TICK_SECONDS, &mut hooks, &mut pause);
        }
        assert!(session.is_finished());
        assert_eq!(*ended.borrow(), 1);
    }

    #[test]
    fn finished_session_cannot_restart() {
        let mut hooks = PlaybackHooks::new();
        let mut pause = SimulationPause::new();
        let mut session = session(TICK_SECONDS);
        session.start(&mut hooks, &mut pause).unwrap();
        session.advance(TICK_SECONDS, &mut hooks, &mut pause);
        assert!(session.is_finished());
        assert!(session.start(&mut hooks, &mut pause).is_err());
    }
}
