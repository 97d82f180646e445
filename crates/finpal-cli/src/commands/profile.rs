//! Profile and theme command implementations

use std::path::Path;

use anyhow::{bail, Context, Result};
use finpal_core::{PreferenceStore, ViewModel};

pub fn cmd_profile_show<S: PreferenceStore>(vm: &ViewModel<S>) -> Result<()> {
    let profile = vm.profile();

    println!();
    println!("👤 {}", profile.name);
    println!("   ─────────────────────────────");
    println!(
        "   Email:   {}",
        profile.email.as_deref().unwrap_or("(not set)")
    );
    match &profile.profile_image {
        Some(bytes) => println!("   Picture: {} bytes", bytes.len()),
        None => println!("   Picture: (not set)"),
    }
    println!(
        "   Theme:   {}",
        if profile.prefers_dark_mode {
            "dark"
        } else {
            "light"
        }
    );
    println!(
        "   Balance: {}",
        vm.assistant().locale().format_amount(vm.balance())
    );

    Ok(())
}

pub fn cmd_profile_set<S: PreferenceStore>(
    vm: &mut ViewModel<S>,
    name: Option<&str>,
    email: Option<&str>,
    image: Option<&Path>,
) -> Result<()> {
    if name.is_none() && email.is_none() && image.is_none() {
        bail!("Nothing to update. Pass --name, --email or --image.");
    }

    let current = vm.profile();
    let name = name.unwrap_or(&current.name);
    let email = match email {
        Some(e) => Some(e),
        None => current.email.as_deref(),
    };

    let image_bytes = match image {
        Some(path) => Some(
            std::fs::read(path)
                .with_context(|| format!("Failed to read image: {}", path.display()))?,
        ),
        None => None,
    };

    if !vm.update_profile(name, email, image_bytes.as_deref()) {
        bail!("Failed to save profile");
    }

    println!("✅ Profile updated");
    cmd_profile_show(vm)
}

pub fn cmd_theme_show<S: PreferenceStore>(vm: &ViewModel<S>) -> Result<()> {
    if vm.dark_mode() {
        println!("🌙 Theme: dark");
    } else {
        println!("☀️  Theme: light");
    }
    Ok(())
}

pub fn cmd_theme_set<S: PreferenceStore>(vm: &mut ViewModel<S>, dark: bool) -> Result<()> {
    if !vm.set_dark_mode(dark) {
        bail!("Failed to save theme preference");
    }
    cmd_theme_show(vm)
}
