/// Team byte reported for players when the game mode has no teams.
pub const TEAM_NONE: u8 = 3;

/// One WAD archive loaded by the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WadInfo {
    pub name: String,
    pub hash: String,
}

/// One connected player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub name: String,
    pub frags: i16,
    pub deaths: i16,
    pub points: i16,
    pub team: u8,
    pub spectator: bool,
    pub time: i16,
    pub ping: i32,
}

/// Accumulated score of one of the two team slots.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeamInfo {
    pub points: i32,
}

/// A boolean server cvar.
///
/// Values are transmitted positionally on the wire, the names come from
/// a per-revision table on our side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvarInfo {
    pub name: String,
    pub value: bool,
}
