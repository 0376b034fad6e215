use super::MinionId;

/// What the current player is expected to do next.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// The current player may spawn or move any of their minions.
    #[default]
    AwaitingAnyAction,

    /// Multi-step movement: `minion` still has `remaining` movement and the
    /// player must keep moving it or end the turn.
    AwaitingContinuedMovement { minion: MinionId, remaining: u8 },
}

impl Phase {
    pub fn allows_spawn(&self) -> bool {
        matches!(self, Phase::AwaitingAnyAction)
    }

    /// Minion the current player is locked to, if any.
    pub fn pending_minion(&self) -> Option<MinionId> {
        match self {
            Phase::AwaitingAnyAction => None,
            Phase::AwaitingContinuedMovement { minion, .. } => Some(*minion),
        }
    }
}
