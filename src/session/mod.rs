pub mod playback;
pub mod registry;

pub use playback::{
    EndHook, PauseControl, PlaybackHooks, PlaybackSession, PlaybackState, SimulationPause,
    StartHook,
};
pub use registry::SessionRegistry;
