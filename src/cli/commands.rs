//! CLI command implementations
//!
//! Each command builds its JSON payload; [`run_command`] writes it as a
//! success response, or writes the error response and returns the error.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_input, write_error, write_response};
use crate::demo::{Address, AuditEntry, Category, DemoType, Order, Person};
use crate::predicate::FilterComposer;
use crate::query::{FilterRequest, MemoryQuery, QueryApplicator};
use crate::reflect::{Record, Reflect, TypeInfo};
use crate::schema::{SchemaRegistry, TypeSchema};

/// Run one command against `registry` and print its response
pub fn run_command(registry: &SchemaRegistry, cmd: Command) -> CliResult<()> {
    let result = match cmd {
        Command::Schema {
            r#type,
            depth,
            override_ignores,
        } => schema(registry, r#type, depth, override_ignores)
            .and_then(|schema| serde_json::to_value(&*schema).map_err(CliError::from)),
        Command::Types => Ok(types(registry)),
        Command::Query {
            r#type,
            data,
            request,
        } => query(registry, r#type, &data, request.as_deref()),
        Command::Explain { r#type, request } => explain(registry, r#type, request.as_deref()),
    };

    match result {
        Ok(data) => write_response(&data),
        Err(e) => {
            write_error(e.code(), &e.to_string())?;
            Err(e)
        }
    }
}

/// Compile the schema of a demo type
pub fn schema(
    registry: &SchemaRegistry,
    ty: DemoType,
    depth: Option<usize>,
    override_ignores: bool,
) -> CliResult<Arc<TypeSchema>> {
    let info = ty.type_info();
    let depth = depth.unwrap_or(registry.config().default_max_depth);
    let override_ignores = override_ignores || registry.config().override_ignores;

    registry
        .compile_info(&info, depth, override_ignores)
        .ok_or_else(|| CliError::SchemaUnavailable(info.name.to_string()))
}

/// Describe the types marked on `registry`
pub fn types(registry: &SchemaRegistry) -> Value {
    let types: Vec<Value> = registry
        .scan()
        .iter()
        .map(|info| {
            json!({
                "name": info.name,
                "shape": info.shape().tag().as_str(),
                "ignored": info.ignored,
            })
        })
        .collect();
    Value::Array(types)
}

/// Apply a filter request to the items stored in `data`
pub fn query(
    registry: &SchemaRegistry,
    ty: DemoType,
    data: &Path,
    request: Option<&Path>,
) -> CliResult<Value> {
    match ty {
        DemoType::Person => run_query::<Person>(registry, data, request),
        DemoType::Address => run_query::<Address>(registry, data, request),
        DemoType::Order => run_query::<Order>(registry, data, request),
        DemoType::Category => run_query::<Category>(registry, data, request),
        DemoType::Audit => run_query::<AuditEntry>(registry, data, request),
    }
}

/// Render the predicate a filter request composes to
pub fn explain(registry: &SchemaRegistry, ty: DemoType, request: Option<&Path>) -> CliResult<Value> {
    let info = ty.type_info();
    ensure_filterable(registry, &info)?;

    let request: FilterRequest = read_input(request)?;
    let composer = FilterComposer::with_config(registry.config());
    let predicate = request
        .filter
        .as_ref()
        .map(|filter| composer.compose_expr(&info, filter))
        .transpose()?;

    Ok(json!({
        "type": info.name,
        "predicate": predicate.map(|expr| expr.to_string()),
    }))
}

fn run_query<T>(registry: &SchemaRegistry, data: &Path, request: Option<&Path>) -> CliResult<Value>
where
    T: Record + Reflect + DeserializeOwned + Serialize,
{
    let info = T::type_info();
    ensure_filterable(registry, &info)?;

    let items: Vec<T> = read_input(Some(data))?;
    let request: FilterRequest = read_input(request)?;
    debug!(type_name = info.name, items = items.len(), "running query");

    let page = QueryApplicator::with_config(registry.config())
        .execute::<T, _>(MemoryQuery::new(&items), &request)?;
    Ok(serde_json::to_value(&page)?)
}

fn ensure_filterable(registry: &SchemaRegistry, info: &TypeInfo) -> CliResult<()> {
    let config = registry.config();
    match registry.compile_info(info, config.default_max_depth, config.override_ignores) {
        Some(_) => Ok(()),
        None => Err(CliError::SchemaUnavailable(info.name.to_string())),
    }
}
