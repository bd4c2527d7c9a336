//! Vote values exchanged between the viewer, the ledger and the registry API
use std::fmt;
use std::str::FromStr;

use failure::Error as FailureError;

use errors::Error;
use models::types::CouponId;

/// Button clicked by the viewer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteDirection {
    Up,
    Down,
}

/// Local per-viewer vote on one coupon. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteState {
    None,
    Up,
    Down,
}

impl Default for VoteState {
    fn default() -> Self {
        VoteState::None
    }
}

impl VoteState {
    pub fn is(&self, direction: VoteDirection) -> bool {
        match (*self, direction) {
            (VoteState::Up, VoteDirection::Up) | (VoteState::Down, VoteDirection::Down) => true,
            _ => false,
        }
    }
}

impl From<VoteDirection> for VoteState {
    fn from(direction: VoteDirection) -> Self {
        match direction {
            VoteDirection::Up => VoteState::Up,
            VoteDirection::Down => VoteState::Down,
        }
    }
}

impl FromStr for VoteState {
    type Err = FailureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(VoteState::None),
            "up" => Ok(VoteState::Up),
            "down" => Ok(VoteState::Down),
            other => Err(format_err!("Unknown vote state '{}'", other)
                .context(Error::InvalidVote(other.to_string()))
                .into()),
        }
    }
}

/// Counter change produced by one click: `amount` is `+1` for a cast and
/// `-1` for a retraction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteDelta {
    pub direction: VoteDirection,
    pub amount: i32,
}

impl VoteDelta {
    pub fn cast(direction: VoteDirection) -> Self {
        VoteDelta { direction, amount: 1 }
    }

    pub fn retract(direction: VoteDirection) -> Self {
        VoteDelta { direction, amount: -1 }
    }

    pub fn is_retraction(&self) -> bool {
        self.amount < 0
    }
}

/// Vote type accepted by the `/vote` endpoint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteAction {
    Up,
    Down,
    RemoveUp,
    RemoveDown,
}

impl From<VoteDelta> for VoteAction {
    fn from(delta: VoteDelta) -> Self {
        match (delta.direction, delta.is_retraction()) {
            (VoteDirection::Up, false) => VoteAction::Up,
            (VoteDirection::Down, false) => VoteAction::Down,
            (VoteDirection::Up, true) => VoteAction::RemoveUp,
            (VoteDirection::Down, true) => VoteAction::RemoveDown,
        }
    }
}

impl From<VoteAction> for VoteDelta {
    fn from(action: VoteAction) -> Self {
        match action {
            VoteAction::Up => VoteDelta::cast(VoteDirection::Up),
            VoteAction::Down => VoteDelta::cast(VoteDirection::Down),
            VoteAction::RemoveUp => VoteDelta::retract(VoteDirection::Up),
            VoteAction::RemoveDown => VoteDelta::retract(VoteDirection::Down),
        }
    }
}

impl FromStr for VoteAction {
    type Err = FailureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(VoteAction::Up),
            "down" => Ok(VoteAction::Down),
            "remove_up" => Ok(VoteAction::RemoveUp),
            "remove_down" => Ok(VoteAction::RemoveDown),
            other => Err(format_err!("Unknown vote type '{}'", other)
                .context(Error::InvalidVote(other.to_string()))
                .into()),
        }
    }
}

impl fmt::Display for VoteAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let value = match *self {
            VoteAction::Up => "up",
            VoteAction::Down => "down",
            VoteAction::RemoveUp => "remove_up",
            VoteAction::RemoveDown => "remove_down",
        };
        write!(f, "{}", value)
    }
}

/// Payload for `/vote`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct VotePayload {
    pub id: CouponId,
    #[serde(rename = "type")]
    pub action: VoteAction,
}

/// `/vote` body as received. The type stays a string so an unknown value
/// is reported as an invalid vote rather than a malformed body.
#[derive(Deserialize, Clone, Debug)]
pub struct RawVotePayload {
    pub id: CouponId,
    #[serde(rename = "type")]
    pub action: String,
}

impl RawVotePayload {
    pub fn into_payload(self) -> Result<VotePayload, FailureError> {
        let action = self.action.parse::<VoteAction>()?;
        Ok(VotePayload { id: self.id, action })
    }
}
