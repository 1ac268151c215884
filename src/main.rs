use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction};
use serde_json::json;
use tableau_locator::config::{self, ConnectionSettings};
use tableau_locator::domain::template::{Bindings, Placeholder};
use tableau_locator::{Operation, ResourceLocator};

fn cli() -> clap::Command {
    clap::Command::new("tableau-locator")
        .about("Resolve Tableau Server REST API endpoints")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Path to a YAML file with connection settings")
                .conflicts_with("content_url"),
        )
        .arg(
            Arg::new("content_url")
                .short('u')
                .long("content-url")
                .value_name("URL")
                .help("Browser URL of any page on the server"),
        )
        .arg(
            Arg::new("page_size")
                .short('p')
                .long("page-size")
                .value_name("N")
                .value_parser(clap::value_parser!(u32))
                .help("Page size for paged listings"),
        )
        .arg(
            Arg::new("list")
                .short('l')
                .long("list")
                .action(ArgAction::SetTrue)
                .help("List every operation with its unresolved template"),
        )
        .arg(
            Arg::new("operation")
                .short('o')
                .long("operation")
                .value_name("NAME")
                .help("Operation to resolve, e.g. workbooks-for-user"),
        )
        .arg(
            Arg::new("param")
                .long("param")
                .value_name("NAME=VALUE")
                .action(ArgAction::Append)
                .help("Placeholder value, e.g. siteId=abc (repeatable)"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print output as JSON"),
        )
}

fn parse_param(raw: &str) -> Result<(Placeholder, String)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("Parameter '{}' is not of the form name=value", raw))?;
    let placeholder: Placeholder = name.trim().parse()?;
    Ok((placeholder, value.to_string()))
}

fn load_settings(matches: &clap::ArgMatches) -> Result<ConnectionSettings> {
    let mut settings = match matches.get_one::<String>("content_url") {
        Some(url) => ConnectionSettings::from_content_url(url),
        None => config::load_settings_or_default(
            matches.get_one::<String>("config").map(|c| c.as_str()),
        )?,
    };
    if let Some(page_size) = matches.get_one::<u32>("page_size") {
        settings.page_size = Some(*page_size);
    }
    Ok(settings)
}

fn list(locator: &ResourceLocator, as_json: bool) -> Result<()> {
    if as_json {
        let entries: Vec<_> = locator
            .registry()
            .iter()
            .map(|(op, template)| {
                json!({
                    "operation": op.name(),
                    "template": template.as_str(),
                    "placeholders": template
                        .placeholders()
                        .iter()
                        .map(|p| p.name())
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (op, template) in locator.registry().iter() {
            println!("{:<32} {}", op.name(), template);
        }
    }
    Ok(())
}

fn resolve(
    locator: &ResourceLocator,
    operation: &str,
    params: Vec<&String>,
    as_json: bool,
) -> Result<()> {
    let operation: Operation = operation.parse()?;
    let bindings = params
        .into_iter()
        .map(|raw| parse_param(raw))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .collect::<Bindings>();

    let url = locator
        .resolve_operation(operation, &bindings)
        .with_context(|| format!("Could not resolve {}", operation))?;

    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "operation": operation.name(), "url": url }))?
        );
    } else {
        println!("{}", url);
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();
    let as_json = matches.get_flag("json");

    let settings = load_settings(&matches)?;
    let context = settings
        .to_context()
        .context("Could not build a server connection context")?;
    let locator = ResourceLocator::new(context)?;

    if matches.get_flag("list") {
        return list(&locator, as_json);
    }

    match matches.get_one::<String>("operation") {
        Some(operation) => {
            let params = matches
                .get_many::<String>("param")
                .map(|values| values.collect())
                .unwrap_or_default();
            resolve(&locator, operation, params, as_json)
        }
        None => bail!("Nothing to do: pass --list or --operation"),
    }
}
