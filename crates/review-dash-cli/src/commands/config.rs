use super::context::AppContext;
use crate::output::{mask_secret, styled_table, Output};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use comfy_table::Cell;
use owo_colors::OwoColorize;
use review_dash_config::{Config, CredentialStore, PathManager};
use serde_json::json;

pub fn run_config(cmd: crate::ConfigCommands, paths: PathManager, output: &Output) -> Result<()> {
    match cmd {
        crate::ConfigCommands::Show { full } => {
            let ctx = AppContext::load(paths)?;
            show_config(&ctx, full, output)
        }
        crate::ConfigCommands::Init { force } => init_config(&paths, force, output),
        crate::ConfigCommands::SetKey { hostaway, google } => set_keys(&paths, hostaway, google, output),
    }
}

fn enabled_mark(enabled: bool) -> String {
    if enabled {
        "✓".green().to_string()
    } else {
        "✗".red().to_string()
    }
}

fn show_config(ctx: &AppContext, full: bool, output: &Output) -> Result<()> {
    let config = &ctx.config;
    let hostaway_key = ctx.credentials.hostaway_api_key();
    let google_key = ctx.credentials.google_api_key();
    let secret = |value: &Option<String>| {
        if full {
            value.clone().unwrap_or_else(|| "<not set>".to_string())
        } else {
            mask_secret(value.as_deref())
        }
    };
    let approvals_file = config.approvals_file(ctx.paths.approvals_file());

    if !output.is_human() {
        output.data(&json!({
            "configFile": ctx.paths.config_file(),
            "approvalsFile": approvals_file,
            "hostaway": {
                "enabled": config.hostaway.enabled,
                "apiUrl": config.hostaway.api_url,
                "accountId": config.hostaway.account_id,
                "apiKey": secret(&hostaway_key),
            },
            "google": {
                "enabled": config.google.enabled,
                "apiUrl": config.google.api_url,
                "placeId": config.google.place_id,
                "listingName": config.google.listing_name,
                "apiKey": secret(&google_key),
            },
            "dashboard": {
                "pageSize": config.dashboard.page_size,
                "sortField": config.dashboard.sort_field,
                "sortDirection": config.dashboard.sort_direction,
            },
            "bootstrapApprovedIds": config.approvals.bootstrap_ids.len(),
        }));
        return Ok(());
    }

    let mut files = styled_table(["Files", ""]);
    files.add_row(vec![Cell::new("Config"), Cell::new(ctx.paths.config_file().display())]);
    files.add_row(vec![Cell::new("Credentials"), Cell::new(ctx.paths.credentials_file().display())]);
    files.add_row(vec![Cell::new("Approvals"), Cell::new(approvals_file.display())]);
    output.table(&files);

    let mut hostaway = styled_table(["Hostaway", ""]);
    hostaway.add_row(vec![Cell::new("Enabled"), Cell::new(enabled_mark(config.hostaway.enabled))]);
    hostaway.add_row(vec![Cell::new("API URL"), Cell::new(&config.hostaway.api_url)]);
    hostaway.add_row(vec![Cell::new("Account ID"), Cell::new(&config.hostaway.account_id)]);
    hostaway.add_row(vec![Cell::new("API key"), Cell::new(secret(&hostaway_key))]);
    output.table(&hostaway);

    let mut google = styled_table(["Google", ""]);
    google.add_row(vec![Cell::new("Enabled"), Cell::new(enabled_mark(config.google.enabled))]);
    google.add_row(vec![Cell::new("API URL"), Cell::new(&config.google.api_url)]);
    google.add_row(vec![
        Cell::new("Place ID"),
        Cell::new(config.google.place_id.as_deref().unwrap_or("<not set>")),
    ]);
    google.add_row(vec![Cell::new("Listing name"), Cell::new(&config.google.listing_name)]);
    google.add_row(vec![Cell::new("API key"), Cell::new(secret(&google_key))]);
    output.table(&google);

    let mut dashboard = styled_table(["Dashboard", ""]);
    dashboard.add_row(vec![Cell::new("Page size"), Cell::new(config.dashboard.page_size)]);
    dashboard.add_row(vec![
        Cell::new("Sort"),
        Cell::new(format!("{} {}", config.dashboard.sort_field, config.dashboard.sort_direction)),
    ]);
    dashboard.add_row(vec![
        Cell::new("Bootstrap approvals"),
        Cell::new(config.approvals.bootstrap_ids.len()),
    ]);
    output.table(&dashboard);
    Ok(())
}

fn init_config(paths: &PathManager, force: bool, output: &Output) -> Result<()> {
    let config_file = paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {} (use --force to overwrite)",
            config_file.display()
        ));
        return Ok(());
    }

    paths
        .ensure_directories()
        .map_err(|e| eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| eyre!("Failed to write config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn set_keys(paths: &PathManager, hostaway: Option<String>, google: Option<String>, output: &Output) -> Result<()> {
    if hostaway.is_none() && google.is_none() {
        output.warn("Nothing to set. Use --hostaway and/or --google");
        return Ok(());
    }

    let credentials_file = paths.credentials_file();
    let mut store = CredentialStore::new(credentials_file.clone());
    store
        .load()
        .map_err(|e| eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;

    if let Some(key) = hostaway {
        store.set_hostaway_api_key(key);
    }
    if let Some(key) = google {
        store.set_google_api_key(key);
    }

    store
        .save()
        .map_err(|e| eyre!("Failed to save credentials to {}: {}", credentials_file.display(), e))?;
    output.success(format!("Saved credentials to {}", credentials_file.display()));
    Ok(())
}
