use strum::{Display, IntoStaticStr};

use crate::game::SessionPhase;

/// Inputs that move a session between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SessionCommand {
    Start,
    Abort,
    TrackFinished,
    Replay,
    Quit,
}

impl SessionCommand {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Phase reached by applying `command` in `phase`, or `None` if the command
/// is not allowed there.
///
/// Title -> Playing -> Result -> Title, and anything -> Terminated.
pub fn next_phase(phase: SessionPhase, command: SessionCommand) -> Option<SessionPhase> {
    use SessionCommand as C;
    use SessionPhase as P;

    match (phase, command) {
        (P::Terminated, _) => None,
        (_, C::Quit) => Some(P::Terminated),
        (P::Title, C::Start) => Some(P::Playing),
        (P::Playing, C::Abort | C::TrackFinished) => Some(P::Result),
        (P::Result, C::Replay) => Some(P::Title),
        _ => None,
    }
}
