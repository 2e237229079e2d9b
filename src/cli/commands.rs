//! CLI command implementations
//!
//! Every command follows the same sequence:
//! 1. Configuration load
//! 2. Schema load and validation
//! 3. (resolve/explain) one request from stdin, one response on stdout

use std::path::Path;

use serde_json::{json, Value};

use crate::observability::{log_event, Event, Logger};
use crate::planner::{ExplainPlan, KeyPlanner};
use crate::predicate::PredicateSet;
use crate::schema::{SchemaLoader, TableSchema};

use super::args::Command;
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request, write_response};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Resolve { config, table } => resolve(&config, table.as_deref()),
        Command::Explain { config, table } => explain(&config, table.as_deref()),
        Command::Check { config } => check(&config),
    }
}

/// Resolve the access path for one request
pub fn resolve(config_path: &Path, table: Option<&str>) -> CliResult<()> {
    let loader = boot(config_path)?;
    let request = read_request()?;
    let data = resolve_request(&loader, table, &request)?;
    write_response(data)
}

/// Explain the query plan for one request
pub fn explain(config_path: &Path, table: Option<&str>) -> CliResult<()> {
    let loader = boot(config_path)?;
    let request = read_request()?;
    let data = explain_request(&loader, table, &request)?;
    write_response(data)
}

/// Load and validate all schemas, report table names
pub fn check(config_path: &Path) -> CliResult<()> {
    let loader = boot(config_path)?;
    let data = check_report(&loader);

    let count = loader.schema_count().to_string();
    log_event(Event::CheckComplete, &[("tables", count.as_str())]);

    write_response(data)
}

/// Returns the `check` response data for a loaded schema directory
pub fn check_report(loader: &SchemaLoader) -> Value {
    json!({
        "schema_dir": loader.schema_dir().display().to_string(),
        "tables": loader.table_names(),
    })
}

/// Loads configuration and schemas
fn boot(config_path: &Path) -> CliResult<SchemaLoader> {
    let config = Config::load(config_path)?;
    Logger::set_level(config.severity());

    let config_display = config_path.display().to_string();
    log_event(Event::ConfigLoaded, &[("path", config_display.as_str())]);

    let mut loader = SchemaLoader::new(&config.schema_path(config_path));
    loader.load_all()?;
    Ok(loader)
}

/// Plans a request and returns the `resolve` response data.
///
/// Request shape: `{"table": "users", "conditions": {"user_id": 5, "created_at.gt": 0}}`.
/// The `table` argument, when given, takes precedence over the request.
pub fn resolve_request(
    loader: &SchemaLoader,
    table: Option<&str>,
    request: &Value,
) -> CliResult<Value> {
    let (schema, predicates) = prepare(loader, table, request)?;

    match KeyPlanner::new(schema).resolve(&predicates) {
        Some(path) => {
            let strategy = path.strategy().as_str();
            let index = path.index_name().unwrap_or("-");
            log_event(
                Event::PlanResolved,
                &[
                    ("index", index),
                    ("strategy", strategy),
                    ("table", schema.name.as_str()),
                ],
            );
            Ok(json!({ "table": schema.name, "access": "key", "path": path }))
        }
        None => {
            log_event(Event::PlanScanFallback, &[("table", schema.name.as_str())]);
            Ok(json!({ "table": schema.name, "access": "scan" }))
        }
    }
}

/// Plans a request and returns the `explain` response data
pub fn explain_request(
    loader: &SchemaLoader,
    table: Option<&str>,
    request: &Value,
) -> CliResult<Value> {
    let (schema, predicates) = prepare(loader, table, request)?;

    let plan = KeyPlanner::new(schema).plan(&predicates);
    let explain = ExplainPlan::from_plan(&plan);

    let event = if plan.is_scan() {
        Event::PlanScanFallback
    } else {
        Event::PlanResolved
    };
    log_event(event, &[("table", schema.name.as_str())]);

    Ok(json!({ "table": schema.name, "explain": explain }))
}

/// Picks the table and parses the request's conditions
fn prepare<'a>(
    loader: &'a SchemaLoader,
    table: Option<&str>,
    request: &Value,
) -> CliResult<(&'a TableSchema, PredicateSet)> {
    let result = target_table(table, request).and_then(|name| {
        let schema = loader.require(name)?;
        let conditions = request
            .get("conditions")
            .ok_or_else(|| CliError::invalid_request("Request must contain 'conditions'"))?;
        let predicates = PredicateSet::from_json_object(conditions)?;
        Ok((schema, predicates))
    });

    match result {
        Ok((schema, predicates)) => {
            let count = predicates.len().to_string();
            Logger::trace(
                Event::RequestReceived.as_str(),
                &[("conditions", count.as_str()), ("table", schema.name.as_str())],
            );
            Ok((schema, predicates))
        }
        Err(e) => {
            log_event(Event::RequestRejected, &[("code", e.code_str())]);
            Err(e)
        }
    }
}

fn target_table<'r>(table: Option<&'r str>, request: &'r Value) -> CliResult<&'r str> {
    if let Some(name) = table {
        return Ok(name);
    }
    request
        .get("table")
        .and_then(Value::as_str)
        .ok_or_else(|| CliError::invalid_request("No table given: pass --table or set 'table'"))
}
