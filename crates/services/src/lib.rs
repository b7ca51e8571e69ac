#![forbid(unsafe_code)]

pub mod error;
pub mod events;
pub mod game;
pub mod progress;
pub mod sessions;
pub mod tracker;

pub use error::{GameError, SessionError, TrackerError};
pub use events::{EventBus, EventLog, GameEvent, GameObserver};
pub use game::{GameConfig, GamePhase, GameService};
pub use progress::{CategorySlot, ProgressView};
pub use sessions::{QuestionSession, SessionState, Submission};
pub use tracker::{CategoryTracker, Completion, Pick};
