use std::env;
use std::process::exit;

use odastatus::*;

fn main() {
    env_logger::init();

    let link = env::args().nth(1).unwrap_or_else(|| {
        eprintln!("usage: info odamex://<host>[:<port>]");
        exit(2);
    });

    let addr = match ServerAddr::from_oda_uri(&link) {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("{}", e);
            exit(2);
        }
    };

    let info = match ServerInfo::query(&addr) {
        Ok(info) => info,
        Err(e) => {
            eprintln!("query failed: {}", e);
            exit(1);
        }
    };

    println!("{}", addr);
    println!();
    println!("==============================");
    println!("[SERVER]");
    println!("Hostname : {}", info.hostname);
    println!(
        "Players : {} ({} spectating) / {}",
        info.players_in_game, info.spectators, info.max_clients
    );
    println!("Map : {}", info.map_name);
    println!("Website : {}", info.website);
    println!("Contact : {}", info.email);
    println!("Password-protected : {}", info.has_password);
    println!("Gamemode : {}", info.game_mode());
    println!("Skill : {}", info.skill);

    println!();
    println!("==============================");
    println!("[WADS]");
    for wad in &info.wad_list {
        println!("- {} ({})", wad.name, wad.hash);
    }

    if !info.player_list.is_empty() {
        println!();
        println!("==============================");
        println!("[PLAYERS]");
        println!("name frags deaths points time ping spectator");
        for p in &info.player_list {
            println!(
                "- {} {} {} {} {} {} {}",
                p.name, p.frags, p.deaths, p.points, p.time, p.ping, p.spectator
            );
        }
    }

    println!();
    println!("==============================");
    println!("[CVARS]");
    for cvar in &info.cvar_list {
        println!("{} : {}", cvar.name, cvar.value);
    }

    if !info.patch_list.is_empty() {
        println!();
        println!("==============================");
        println!("[PATCHES]");
        for patch in &info.patch_list {
            println!("- {}", patch);
        }
    }
}
