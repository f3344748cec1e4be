//! Print a generated world as a table, followed by its audit.

use comfy_table::{ContentArrangement, Table};
use infoprox_core::{Exit, Lock, World};
use infoprox_worldgen::{GenConfig, audit, generate};

pub fn run(config: &GenConfig) -> Result<(), String> {
    let world = generate(config);

    println!(
        "  {} world, seed {} (derived {}), {} rooms",
        world.theme,
        world.seed,
        world.derived_seed,
        world.len()
    );

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Room", "Name", "Role", "Exits", "Items"]);

    for room in world.rooms() {
        let role = if room.id == *world.start() {
            "start"
        } else if room.is_vault() {
            "vault"
        } else {
            ""
        };
        let exits: Vec<String> = world.exits(&room.id).iter().map(describe_exit).collect();
        let items: Vec<&str> = room.items.iter().map(|i| i.name.as_str()).collect();
        let items = if items.is_empty() {
            "-".to_string()
        } else {
            items.join(", ")
        };
        table.add_row(vec![
            room.id.to_string(),
            room.name.clone(),
            role.to_string(),
            exits.join(", "),
            items,
        ]);
    }

    println!("{table}");
    println!();

    let report = audit(&world);
    println!("{report}");
    if report.is_solvable() {
        Ok(())
    } else {
        Err(unsolvable(&world))
    }
}

fn describe_exit(exit: &Exit<'_>) -> String {
    match (exit.is_locked(), exit.lock()) {
        (true, Some(Lock::Goal)) => format!("{} -> {} [goal]", exit.direction, exit.to),
        (true, Some(Lock::Key(tag))) => format!("{} -> {} [{tag}]", exit.direction, exit.to),
        (true, None) => format!("{} -> {} [locked]", exit.direction, exit.to),
        (false, _) => format!("{} -> {}", exit.direction, exit.to),
    }
}

fn unsolvable(world: &World) -> String {
    format!("world with seed {} failed its audit", world.seed)
}
