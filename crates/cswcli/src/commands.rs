//! Command implementations over the core API.
//!
//! Everything here goes through [`InstanceStore`] and [`Activation`]; the
//! CLI never touches the instance directories or the live path itself.

use std::io::{self, Write};

use anyhow::Result;
use cswcore::{Activation, InstanceStore, Settings, DEFAULT_INSTANCE};

pub fn run_create(settings: &Settings, name: &str) -> Result<()> {
    let store = InstanceStore::new(settings);
    store.create(name)?;

    println!("Created instance: {name}");
    println!(
        "Add mods to: {}",
        store.instance_path(name).join("mods").display()
    );
    Ok(())
}

pub fn run_switch(settings: &Settings, name: &str) -> Result<()> {
    Activation::new(settings).switch_to(name)?;

    println!("Switched to instance: {name}");
    println!("Launch Minecraft normally - it will use this instance");
    Ok(())
}

pub fn run_list(settings: &Settings) -> Result<()> {
    let store = InstanceStore::new(settings);
    let instances = store.list()?;

    println!("Available instances:");
    if instances.is_empty() {
        println!("  No instances found");
    } else {
        for inst in &instances {
            let status = if inst.is_active { "ACTIVE" } else { "Inactive" };
            println!(
                "  - {:<20} ({} mods, {} configs, {} saves) [{}]",
                inst.name, inst.mod_count, inst.config_count, inst.save_count, status
            );
        }
    }

    let active = Activation::new(settings).active_instance();
    println!();
    println!(
        "Current instance: {}",
        active.as_deref().unwrap_or(DEFAULT_INSTANCE)
    );
    Ok(())
}

pub fn run_info(settings: &Settings, name: &str) -> Result<()> {
    let detail = InstanceStore::new(settings).inspect(name)?;

    println!("Instance: {name}");
    print_section("Mods", &detail.mods);
    print_section("Configs", &detail.configs);
    print_section("Saves", &detail.saves);
    Ok(())
}

fn print_section(title: &str, names: &[String]) {
    println!("{title} ({}):", names.len());
    if names.is_empty() {
        println!("  (none)");
    }
    for name in names {
        println!("  - {name}");
    }
}

pub fn run_restore(settings: &Settings) -> Result<()> {
    Activation::new(settings).restore_default()?;

    println!("Restored default Minecraft directory");
    Ok(())
}

pub fn run_delete(settings: &Settings, name: &str, yes: bool) -> Result<()> {
    if !yes && !confirm(&format!(
        "Are you sure you want to delete instance '{name}'? This cannot be undone. (y/N): "
    ))? {
        println!("Deletion cancelled");
        return Ok(());
    }

    InstanceStore::new(settings).delete(name)?;
    println!("Deleted instance: {name}");
    Ok(())
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(matches!(response.trim(), "y" | "Y"))
}

pub fn run_config(settings: &mut Settings, key: &str, value: Option<&str>) -> Result<()> {
    let key = key.to_lowercase();

    if key == "show" || key == "list" {
        println!("Platform: {}/{}", std::env::consts::OS, std::env::consts::ARCH);
        println!("Configuration:");
        for (k, v) in settings.entries() {
            println!("  {k}: {v}");
        }
        return Ok(());
    }

    match value {
        None => match settings.get(&key) {
            Some(v) => println!("{key}: {v}"),
            None => anyhow::bail!("unknown config key: {key}"),
        },
        Some(value) => {
            settings.set(&key, value)?;
            println!("Updated {key} -> {value}");
        }
    }
    Ok(())
}
