use std::io;
use std::net::{ToSocketAddrs, UdpSocket};
use std::time::Duration;

use log::{debug, warn};

use crate::common::{CvarInfo, PlayerInfo, TeamInfo, WadInfo, TEAM_NONE};
use crate::decoder::Decoder;
use crate::errors::*;
use crate::uri::ServerAddr;
use crate::util::{create_packet, PacketType};

/// Cvar slots of the 0.7.x launcher protocol, in wire order.
///
/// Values arrive positionally. `None` marks the one slot servers still
/// transmit but no longer name; its value is read and discarded.
const CVAR_NAMES_070: [Option<&str>; 14] = [
    Some("sv_itemsrespawn"),
    Some("sv_weaponstay"),
    Some("sv_friendlyfire"),
    Some("sv_allowexit"),
    Some("sv_infiniteammo"),
    Some("sv_nomonsters"),
    Some("sv_monstersrespawn"),
    Some("sv_fastmonsters"),
    Some("sv_allowjump"),
    Some("sv_freelook"),
    Some("sv_waddownload"),
    Some("sv_emptyreset"),
    None,
    Some("sv_fragexitswitch"),
];

/// Replies fit comfortably below this, even on full 255 client servers.
const RESPONSE_BUFFER_SIZE: usize = 8192;

/// Socket timeouts for one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub connect: Duration,
    pub read: Duration,
}

impl Default for Timeouts {
    fn default() -> Timeouts {
        Timeouts {
            connect: Duration::from_secs(2),
            read: Duration::from_secs(3),
        }
    }
}

/// Snapshot of one server at query time.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerInfo {
    pub challenge: i32,
    pub token: i32,
    pub protocol: i16,
    /// Software version of the server binary.
    pub version: i32,

    pub hostname: String,
    pub website: String,
    pub email: String,
    pub has_password: bool,

    pub fraglimit: i16,
    pub timelimit: i16,
    pub time_left: i16,
    pub scorelimit: i32,

    pub players_in_game: u8,
    pub spectators: u32,
    pub max_clients: u8,
    pub max_players: i16,
    pub player_list: Vec<PlayerInfo>,
    pub teams: [TeamInfo; 2],

    pub map_name: String,
    pub is_deathmatch: bool,
    pub skill: u8,
    pub is_team_dm: bool,
    pub is_ctf: bool,

    pub wad_list: Vec<WadInfo>,
    pub cvar_list: Vec<CvarInfo>,
    pub patch_list: Vec<String>,
}

impl ServerInfo {
    /// Decodes one raw reply datagram.
    ///
    /// The reply has no length prefix, its extent is implied by walking
    /// the structure, so field order below is the protocol contract.
    /// Decoding is all or nothing: the first error aborts the parse.
    pub fn parse(data: &[u8]) -> Result<ServerInfo, DecodeError> {
        let mut dec = Decoder::new(data);

        let challenge = dec.read_long()?;
        let token = dec.read_long()?;
        let hostname = dec.read_string()?;
        let players_in_game = dec.read_count("player")?;
        let max_clients = dec.read_byte()?;
        let map_name = dec.read_string()?;
        let wad_count = dec.read_count("wad")?;

        // WAD names and hashes arrive in two separate blocks correlated
        // by index; the hashes come later, after the first player pass.
        let mut wad_names = Vec::with_capacity(wad_count);
        for _ in 0..wad_count {
            wad_names.push(dec.read_string()?);
        }

        let is_deathmatch = dec.read_bool()?;
        let skill = dec.read_byte()?;
        let is_team_dm = dec.read_bool()?;
        let is_ctf = dec.read_bool()?;
        let team_game = is_team_dm || is_ctf;

        // Player pass one: identity, frags, ping and, in team modes only,
        // the team byte.
        let mut base = Vec::with_capacity(players_in_game);
        for _ in 0..players_in_game {
            let name = dec.read_string()?;
            let frags = dec.read_short()?;
            let ping = dec.read_long()?;
            let team = if team_game { dec.read_byte()? } else { TEAM_NONE };
            base.push((name, frags, ping, team));
        }

        let mut wad_hashes = Vec::with_capacity(wad_count);
        for _ in 0..wad_count {
            wad_hashes.push(dec.read_string()?);
        }

        let website = dec.read_string()?;

        let mut scorelimit = 0;
        let mut teams = [TeamInfo::default(); 2];
        if team_game {
            scorelimit = dec.read_long()?;
            for slot in teams.iter_mut() {
                if dec.read_byte()? == 1 {
                    slot.points = dec.read_long()?;
                }
            }
        }

        let protocol = dec.read_short()?;
        let email = dec.read_string()?;
        let timelimit = dec.read_short()?;
        let time_left = dec.read_short()?;
        let fraglimit = dec.read_short()?;

        let mut cvar_list = Vec::with_capacity(CVAR_NAMES_070.len());
        for slot in CVAR_NAMES_070.iter() {
            match slot {
                Some(name) => cvar_list.push(dec.read_cvar(name)?),
                None => {
                    dec.read_bool()?;
                }
            }
        }

        // Player pass two: scoring.
        let mut scores = Vec::with_capacity(players_in_game);
        for _ in 0..players_in_game {
            let points = dec.read_short()?;
            let deaths = dec.read_short()?;
            let time = dec.read_short()?;
            scores.push((points, deaths, time));
        }

        dec.read_long()?; // reserved

        let max_players = dec.read_short()?;

        // Player pass three: spectator flags.
        let mut spectators = 0u32;
        let mut flags = Vec::with_capacity(players_in_game);
        for _ in 0..players_in_game {
            let spectator = dec.read_bool()?;
            if spectator {
                spectators += 1;
            }
            flags.push(spectator);
        }

        dec.read_long()?; // reserved

        let has_password = dec.read_short()? == 1;
        let version = dec.read_long()?;

        let patch_count = dec.read_count("patch")?;
        let mut patch_list = Vec::with_capacity(patch_count);
        for _ in 0..patch_count {
            patch_list.push(dec.read_string()?);
        }

        // The three player passes index the same positions; zipping them
        // here keeps that correlation without mutating half built entries.
        let player_list = base
            .into_iter()
            .zip(scores)
            .zip(flags)
            .map(
                |(((name, frags, ping, team), (points, deaths, time)), spectator)| PlayerInfo {
                    name,
                    frags,
                    deaths,
                    points,
                    team,
                    spectator,
                    time,
                    ping,
                },
            )
            .collect();

        let wad_list = wad_names
            .into_iter()
            .zip(wad_hashes)
            .map(|(name, hash)| WadInfo { name, hash })
            .collect();

        Ok(ServerInfo {
            challenge,
            token,
            protocol,
            version,
            hostname,
            website,
            email,
            has_password,
            fraglimit,
            timelimit,
            time_left,
            scorelimit,
            players_in_game: players_in_game as u8,
            spectators,
            max_clients,
            max_players,
            player_list,
            teams,
            map_name,
            is_deathmatch,
            skill,
            is_team_dm,
            is_ctf,
            wad_list,
            cvar_list,
            patch_list,
        })
    }

    /// Performs one query with the default timeouts.
    pub fn query(addr: &ServerAddr) -> Result<ServerInfo> {
        ServerInfo::query_with_timeouts(addr, Timeouts::default())
    }

    /// Resolves the host, sends the launcher challenge and decodes the
    /// single reply datagram. One write, one read, no retries; the socket
    /// is released on every exit path.
    pub fn query_with_timeouts(addr: &ServerAddr, timeouts: Timeouts) -> Result<ServerInfo> {
        let target = (addr.host.as_str(), addr.port)
            .to_socket_addrs()
            .map_err(|source| QueryError::Resolution {
                host: addr.host.clone(),
                source,
            })?
            .next()
            .ok_or_else(|| QueryError::Resolution {
                host: addr.host.clone(),
                source: io::Error::new(io::ErrorKind::AddrNotAvailable, "no addresses found"),
            })?;

        debug!("resolved {} to {}", addr, target);

        let sock = UdpSocket::bind("0.0.0.0:0").map_err(QueryError::Connect)?;
        sock.connect(target).map_err(QueryError::Connect)?;
        sock.set_write_timeout(Some(timeouts.connect))
            .map_err(QueryError::Connect)?;
        sock.set_read_timeout(Some(timeouts.read))
            .map_err(QueryError::Connect)?;

        let buf = create_packet(PacketType::LauncherChallenge);
        let sent = sock.send(&buf).map_err(|e| match e.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                QueryError::WriteTimeout(timeouts.connect)
            }
            _ => QueryError::Write(e),
        })?;

        debug!("sent {} bytes", sent);
        if sent != buf.len() {
            warn!(
                "bytes sent ({}) not equal to request size ({})!",
                sent,
                buf.len()
            );
        }

        let mut response = [0u8; RESPONSE_BUFFER_SIZE];
        let received = sock.recv(&mut response).map_err(|e| match e.kind() {
            io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut => {
                QueryError::ReadTimeout(timeouts.read)
            }
            _ => QueryError::Read(e),
        })?;

        debug!("received {} bytes", received);
        if received == 0 {
            return Err(QueryError::EmptyResponse);
        }

        Ok(ServerInfo::parse(&response[..received])?)
    }

    /// True when neither deathmatch flag nor a team mode is set.
    pub fn is_cooperation(&self) -> bool {
        !self.is_deathmatch && !self.is_team_dm && !self.is_ctf
    }

    /// True for plain deathmatch without teams.
    pub fn is_pure_deathmatch(&self) -> bool {
        self.is_deathmatch && !self.is_team_dm && !self.is_ctf
    }

    /// True for the modes that carry team and scorelimit data.
    pub fn is_team_game(&self) -> bool {
        self.is_team_dm || self.is_ctf
    }

    /// Human readable game mode, labelled the way launchers do.
    pub fn game_mode(&self) -> &'static str {
        if self.is_deathmatch {
            "Deathmatch"
        } else if self.is_team_dm {
            "Team Deathmatch"
        } else if self.is_ctf {
            "Capture the Flag"
        } else {
            "Cooperation"
        }
    }
}
