use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use std::path::Path;
use std::process::ExitCode;

mod bundle;
mod cli;
mod config;
mod fsio;
mod logging;
mod validate;

use bundle::discover::discover_assets;
use bundle::{BundleConfig, BundleService};
use cli::{BundleArgs, Command, ConfigShowArgs, RootArgs, ValidateNameArgs, ValidatePhoneArgs};
use config::{ConfigShow, ShowRequest, StoreRootPaths};
use fsio::read_json;
use validate::{Customer, NameValidator, PhoneValidator, ValidationReport, Validator};

fn main() -> ExitCode {
    let args = RootArgs::parse();
    logging::init(args.verbose);

    let outcome = match args.command {
        Command::ConfigShow(args) => cmd_config_show(args),
        Command::ValidateName(args) => cmd_validate_name(args),
        Command::ValidatePhone(args) => cmd_validate_phone(args),
        Command::Bundle(args) => cmd_bundle(args),
    };
    match outcome {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_config_show(args: ConfigShowArgs) -> Result<ExitCode> {
    let paths = StoreRootPaths::new(args.root.clone());
    // `env::vars` panics on non-UTF-8 entries; such variables can't name config paths anyway.
    let env_vars = std::env::vars_os()
        .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
    let command = ConfigShow::load(&paths, env_vars)?;
    let request = ShowRequest {
        path: &args.path,
        scope: &args.scope,
        scope_code: args.scope_code.as_deref(),
    };
    match command.show(&request) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn cmd_validate_name(args: ValidateNameArgs) -> Result<ExitCode> {
    let customer = match &args.customer {
        Some(path) => read_json(path)?,
        None => Customer {
            firstname: args.firstname,
            middlename: args.middlename,
            lastname: args.lastname,
        },
    };
    let messages = NameValidator.validate(&customer);
    report_validation(ValidationReport::from_messages(messages), args.json)
}

fn cmd_validate_phone(args: ValidatePhoneArgs) -> Result<ExitCode> {
    let value = match (&args.payload, args.value) {
        (Some(path), _) => read_json(path)?,
        (None, Some(value)) => Value::String(value),
        (None, None) => Value::Null,
    };
    let messages = PhoneValidator.validate(&value);
    report_validation(ValidationReport::from_messages(messages), args.json)
}

fn report_validation(report: ValidationReport, json: bool) -> Result<ExitCode> {
    if json {
        let text = serde_json::to_string_pretty(&report).context("serialize report")?;
        println!("{text}");
    } else if report.valid {
        println!("valid");
    } else {
        for message in &report.messages {
            println!("{message}");
        }
    }
    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn cmd_bundle(args: BundleArgs) -> Result<ExitCode> {
    let config = match &args.config {
        Some(path) => BundleConfig::load(path)?,
        None => BundleConfig::default(),
    };
    let target = args.target.as_deref().unwrap_or(&args.source);
    let assets = discover_assets(&args.source)?;
    let total = assets.len();

    let mut service = BundleService::new(config);
    let mut collected = 0usize;
    for discovered in assets {
        if service.collect(discovered.asset, &discovered.context) {
            collected += 1;
        }
    }
    tracing::info!(bundles = service.bundles().count(), collected, total, "assets collected");
    let written = service.save_bundles(target)?;
    for path in &written {
        println!("{}", display_path(path, target));
    }
    println!(
        "collected {collected} of {total} assets into {} bundle files",
        written.len()
    );
    Ok(ExitCode::SUCCESS)
}

fn display_path(path: &Path, base: &Path) -> String {
    match path.strip_prefix(base) {
        Ok(relative) => relative.display().to_string(),
        Err(_) => path.display().to_string(),
    }
}
