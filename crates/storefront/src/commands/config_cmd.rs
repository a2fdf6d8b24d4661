//! Config subcommand handlers.

use secrecy::SecretString;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

/// Format config for display, masking sensitive fields.
fn format_config_redacted(cfg: &Config) -> String {
    use std::fmt::Write;
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    let _ = writeln!(out, "timeout = {}", cfg.defaults.timeout);

    let _ = writeln!(out);
    let _ = writeln!(out, "[catalog]");
    let _ = writeln!(out, "fallback_category = \"{}\"", cfg.catalog.fallback_category);
    let _ = writeln!(out, "all_category_title = \"{}\"", cfg.catalog.all_category_title);
    let _ = writeln!(out, "currency_symbol = \"{}\"", cfg.catalog.currency_symbol);
    let _ = writeln!(out, "image_bucket = \"{}\"", cfg.catalog.image_bucket);

    let mut names: Vec<_> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let p = &cfg.profiles[name];
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "backend = \"{}\"", p.backend);
        if p.api_key.is_some() {
            let _ = writeln!(out, "api_key = \"****\"");
        }
        if let Some(ref env) = p.api_key_env {
            let _ = writeln!(out, "api_key_env = \"{env}\"");
        }
        if let Some(ref user) = p.user_id {
            let _ = writeln!(out, "user_id = \"{user}\"");
        }
        if let Some(ref email) = p.email {
            let _ = writeln!(out, "email = \"{email}\"");
        }
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
    }

    out
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init {
            backend,
            name,
            api_key_env,
            store_key,
            force,
        } => {
            url::Url::parse(&backend).map_err(|_| CliError::Validation {
                field: "backend".into(),
                reason: format!("invalid URL: {backend}"),
            })?;

            let mut cfg = config::load_config_or_default();
            if cfg.profiles.contains_key(&name) && !force {
                return Err(CliError::ProfileExists { name });
            }

            if store_key {
                let key = rpassword::prompt_password("API key: ")?;
                if key.is_empty() {
                    return Err(CliError::Validation {
                        field: "api_key".into(),
                        reason: "API key cannot be empty".into(),
                    });
                }
                storefront_config::store_api_key(&name, &SecretString::from(key))?;
                if !global.quiet {
                    eprintln!("   ✓ API key stored in system keyring");
                }
            }

            cfg.profiles.insert(
                name.clone(),
                Profile {
                    backend,
                    api_key_env,
                    ..Profile::default()
                },
            );
            if cfg.profiles.len() == 1 {
                cfg.default_profile = Some(name.clone());
            }
            config::save_config(&cfg)?;

            if !global.quiet {
                eprintln!(
                    "✓ Profile '{name}' written to {}",
                    config::config_path().display()
                );
            }
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load_config_or_default();
            output::print_output(format_config_redacted(&cfg).trim_end(), global.quiet);
            Ok(())
        }
    }
}
