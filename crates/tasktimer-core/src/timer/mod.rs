mod band;
mod clock;
mod session;

pub use band::Band;
pub use clock::{Clock, ManualClock, SystemClock};
pub use session::{SessionKind, SessionState, SessionView, TimerSession};
