//! `menudeck` command-line front end
//!
//! Each invocation builds a fresh [`BackOffice`] from the config file, so
//! only upload history (when `history_path` is set) outlives the process.

mod logging;

use anyhow::{anyhow, bail, Context};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use menudeck_catalog::AvailabilityUpdate;
use menudeck_core::{BackOffice, BackOfficeConfig};
use menudeck_deploy::DeploySelection;
use menudeck_model::{Channel, ChangeAction, ChangeType, Environment, NewChange, StoreId};
use menudeck_stores::ToggleSource;
use menudeck_upload::{export, UploadKind};
use std::path::PathBuf;
use tracing::Instrument;

fn cli() -> Command {
    Command::new("menudeck")
        .version(menudeck_core::VERSION)
        .about("Restaurant back office: deployments, store channels, bulk uploads")
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .default_value("menudeck.toml")
                .value_parser(value_parser!(PathBuf))
                .help("Path to the TOML config file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Raise log verbosity (-v debug, -vv trace)"),
        )
        .arg(
            Arg::new("instant")
                .long("instant")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Skip simulated step and parse delays"),
        )
        .subcommand_required(true)
        .subcommand(
            Command::new("deploy")
                .about("Record changes and push them to an environment")
                .arg(
                    Arg::new("env")
                        .long("env")
                        .required(true)
                        .help("sandbox or production"),
                )
                .arg(
                    Arg::new("store")
                        .long("store")
                        .action(ArgAction::Append)
                        .help("Sandbox store id (repeatable)"),
                )
                .arg(
                    Arg::new("all-stores")
                        .long("all-stores")
                        .action(ArgAction::SetTrue)
                        .help("Target every store in the directory"),
                )
                .arg(
                    Arg::new("change")
                        .long("change")
                        .action(ArgAction::Append)
                        .help("Pending change as TYPE:ACTION:ITEM:DESCRIPTION (repeatable)"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the deployment record as JSON"),
                ),
        )
        .subcommand(
            Command::new("stores")
                .about("Inspect and toggle store channels")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .about("List stores with their open state")
                        .arg(Arg::new("search").long("search").help("Filter by name or address")),
                )
                .subcommand(
                    Command::new("close")
                        .about("Turn channels off")
                        .arg(Arg::new("store").required(true))
                        .arg(Arg::new("channel").long("channel").help("delivery, takeaway or curbside"))
                        .arg(
                            Arg::new("temporary")
                                .long("temporary")
                                .action(ArgAction::SetTrue)
                                .help("Close until the next business day"),
                        ),
                )
                .subcommand(
                    Command::new("open")
                        .about("Turn channels on")
                        .arg(Arg::new("store").required(true))
                        .arg(Arg::new("channel").long("channel").help("delivery, takeaway or curbside")),
                ),
        )
        .subcommand(
            Command::new("upload")
                .about("Parse a bulk upload file")
                .arg(Arg::new("kind").required(true).help("menu or location"))
                .arg(Arg::new("file").required(true).help("csv, xlsx or xls file"))
                .arg(
                    Arg::new("accept")
                        .long("accept")
                        .action(ArgAction::SetTrue)
                        .help("Accept the parsed items"),
                )
                .arg(
                    Arg::new("export-errors")
                        .long("export-errors")
                        .action(ArgAction::SetTrue)
                        .help("Write failed rows to an xlsx file"),
                ),
        )
        .subcommand(
            Command::new("template")
                .about("Write a blank upload template")
                .arg(Arg::new("kind").required(true).help("menu or location"))
                .arg(
                    Arg::new("dir")
                        .long("dir")
                        .value_parser(value_parser!(PathBuf))
                        .help("Output directory (defaults to export_dir)"),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("Show bulk upload history")
                .arg(Arg::new("kind").long("kind").help("menu or location")),
        )
        .subcommand(
            Command::new("ingredients")
                .about("Show ingredient availability")
                .arg(
                    Arg::new("disable")
                        .long("disable")
                        .help("Ingredient id to mark unavailable"),
                )
                .arg(
                    Arg::new("confirm")
                        .long("confirm")
                        .action(ArgAction::SetTrue)
                        .help("Apply the disable without stopping at the impact preview"),
                ),
        )
        .subcommand(Command::new("config").about("Print the effective configuration"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli().get_matches();

    let config_path = matches
        .get_one::<PathBuf>("config")
        .cloned()
        .unwrap_or_else(|| PathBuf::from("menudeck.toml"));
    let mut config = BackOfficeConfig::load(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    if matches.get_flag("instant") {
        config = config.instant();
    }
    logging::init_logging(&config.logging, matches.get_count("verbose"))?;

    if let Some(("config", _)) = matches.subcommand() {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let command = command_label(&matches);
    tracing::debug!(%command, config = %config_path.display(), "starting");
    let office = BackOffice::new(config).await?;
    let result = dispatch(&office, &matches)
        .instrument(tracing::info_span!("command", %command))
        .await;
    match &result {
        Ok(()) => tracing::debug!(%command, "finished"),
        Err(err) => tracing::warn!(%command, error = %err, "failed"),
    }
    result
}

async fn dispatch(office: &BackOffice, matches: &ArgMatches) -> anyhow::Result<()> {
    match matches.subcommand() {
        Some(("deploy", args)) => deploy(office, args).await,
        Some(("stores", args)) => stores(office, args),
        Some(("upload", args)) => upload(office, args).await,
        Some(("template", args)) => {
            let kind = parse_kind(required(args, "kind")?)?;
            let dir = args
                .get_one::<PathBuf>("dir")
                .cloned()
                .unwrap_or_else(|| office.config().export_dir.clone());
            let path = export::write_template(kind, &dir)?;
            tracing::info!(%kind, path = %path.display(), "template written");
            println!("Template written to {}", path.display());
            Ok(())
        }
        Some(("history", args)) => history(office, args),
        Some(("ingredients", args)) => ingredients(office, args),
        _ => Ok(()),
    }
}

/// Subcommand path such as `stores list`, for log fields
fn command_label(matches: &ArgMatches) -> String {
    let mut parts = Vec::new();
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        parts.push(name);
        current = sub;
    }
    parts.join(" ")
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("missing <{name}>"))
}

fn parse_kind(value: &str) -> anyhow::Result<UploadKind> {
    Ok(value.parse()?)
}

/// `TYPE:ACTION:ITEM:DESCRIPTION`; the description may contain colons
fn parse_change(value: &str) -> anyhow::Result<NewChange> {
    let mut parts = value.splitn(4, ':');
    let (Some(kind), Some(action), Some(item), Some(description)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        bail!("expected TYPE:ACTION:ITEM:DESCRIPTION, got {value:?}");
    };
    let kind: ChangeType = kind.parse()?;
    let action: ChangeAction = action.parse()?;
    Ok(NewChange::new(kind, action, item.trim(), description.trim()))
}

async fn deploy(office: &BackOffice, args: &ArgMatches) -> anyhow::Result<()> {
    for raw in args.get_many::<String>("change").into_iter().flatten() {
        office.add_change(parse_change(raw)?);
    }

    let environment: Environment = required(args, "env")?.parse()?;
    let mut selection = DeploySelection::new();
    selection.select_environment(environment);
    if args.get_flag("all-stores") {
        selection.toggle_all_stores(&office.store_ids());
    }
    for store in args.get_many::<String>("store").into_iter().flatten() {
        selection.toggle_store(StoreId::from(store.as_str()));
    }

    let outcome = office.deploy(&mut selection).await?;
    if args.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&outcome.record)?);
    } else {
        for line in &outcome.record.logs {
            println!("  {line}");
        }
        println!("{}", outcome.summary);
    }
    Ok(())
}

fn parse_channels(args: &ArgMatches) -> anyhow::Result<Vec<Channel>> {
    match args.get_one::<String>("channel") {
        Some(raw) => Ok(vec![raw.parse()?]),
        None => Ok(Channel::ALL.to_vec()),
    }
}

fn stores(office: &BackOffice, args: &ArgMatches) -> anyhow::Result<()> {
    let channels = office.channels();
    match args.subcommand() {
        Some(("list", sub)) => {
            let records = match sub.get_one::<String>("search") {
                Some(query) => office.stores().search(query),
                None => office.stores().list(),
            };
            for record in records {
                let status = channels.store_status(&record.id);
                println!("{:<20} {:<8} {}", record.id, status, record.name);
            }
        }
        Some((action @ ("close" | "open"), sub)) => {
            let store = StoreId::from(required(sub, "store")?);
            let enabled = action == "open";
            let source = if !enabled && sub.get_flag("temporary") {
                ToggleSource::QuickSelector
            } else {
                ToggleSource::StatusScreen
            };
            for channel in parse_channels(sub)? {
                channels.set_channel(&store, channel, enabled, source)?;
            }
            let state = channels.get(&store);
            for channel in Channel::ALL {
                println!("{:<10} {:?}", channel.display_name(), state.status(channel));
            }
            println!("{}", state.store_status().describe());
        }
        _ => {}
    }
    Ok(())
}

async fn upload(office: &BackOffice, args: &ArgMatches) -> anyhow::Result<()> {
    let uploads = office.uploads();
    let kind = parse_kind(required(args, "kind")?)?;
    let summary = uploads.upload(kind, required(args, "file")?).await?;
    println!("{}", summary.message());

    for item in uploads.preview().unwrap_or_default() {
        let note = item.error_message.as_deref().unwrap_or("");
        println!("  {:<8} {:<28} {:<10} {note}", item.id, item.name, item.price);
    }

    if args.get_flag("export-errors") {
        let export = uploads.export_errors(&office.config().export_dir)?;
        println!("{}", export.message());
    }
    if args.get_flag("accept") {
        let accepted = uploads.accept().await?;
        println!("{}", accepted.message);
    } else {
        uploads.cancel();
    }
    Ok(())
}

fn history(office: &BackOffice, args: &ArgMatches) -> anyhow::Result<()> {
    let history = office.uploads().history();
    let items = match args.get_one::<String>("kind") {
        Some(kind) => history.for_kind(parse_kind(kind)?),
        None => history.items(),
    };
    for item in items {
        println!(
            "{}  {:<8} {:<32} {:>3}/{:<3} {:?}  {}",
            item.upload_date.format("%Y-%m-%d %H:%M"),
            item.upload_type,
            item.file_name,
            item.success_count,
            item.total_items,
            item.status,
            item.uploaded_by,
        );
    }
    Ok(())
}

fn ingredients(office: &BackOffice, args: &ArgMatches) -> anyhow::Result<()> {
    let board = office.ingredients();
    if let Some(id) = args.get_one::<String>("disable") {
        match board.set_availability(id, false)? {
            AvailabilityUpdate::Applied(ingredient) => println!("{} marked unavailable", ingredient.name),
            AvailabilityUpdate::NeedsConfirmation(preview) if args.get_flag("confirm") => {
                let ingredient = board.confirm()?;
                println!(
                    "{} marked unavailable; {} product(s) affected",
                    ingredient.name,
                    preview.products.len()
                );
            }
            AvailabilityUpdate::NeedsConfirmation(preview) => {
                board.cancel();
                println!("Disabling would affect: {}", preview.products.join(", "));
                println!("Re-run with --confirm to apply");
            }
        }
    }

    print_ingredients(office);
    Ok(())
}

fn print_ingredients(office: &BackOffice) {
    for ingredient in office.ingredients().list() {
        println!(
            "{:<12} {:<24} {:<14} delivery={:<5} takeaway={:<5}",
            ingredient.id,
            ingredient.name,
            ingredient.category,
            ingredient.delivery_available,
            ingredient.takeaway_available,
        );
    }
    if office.has_changes() {
        println!("{} pending change(s)", office.pending_changes().len());
    }
}
