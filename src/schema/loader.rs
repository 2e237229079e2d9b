//! Schema loader for reading table schemas from disk at startup
//!
//! - One JSON file per table in the schema directory (`<table>.json`)
//! - Files are read in file-name order
//! - A malformed or invalid file stops the load

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::observability::{Event, Logger};

use super::errors::{SchemaError, SchemaResult};
use super::types::TableSchema;

/// Reads table schema files and keeps an in-memory registry by table name.
pub struct SchemaLoader {
    /// Directory containing schema files
    schema_dir: PathBuf,
    /// Loaded schemas by table name
    schemas: BTreeMap<String, TableSchema>,
}

impl SchemaLoader {
    /// Creates a loader for the given schema directory.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: BTreeMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads every `*.json` file from the schema directory.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        let dir_display = self.schema_dir.display().to_string();

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed(&dir_display, format!("Failed to read schema directory: {}", e))
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed(&dir_display, format!("Failed to read directory entry: {}", e))
            })?;
            let path = entry.path();

            // Skip non-JSON files
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }

        let count = self.schemas.len().to_string();
        Logger::info(
            Event::SchemasLoaded.as_str(),
            &[("dir", dir_display.as_str()), ("tables", count.as_str())],
        );

        Ok(())
    }

    /// Loads a single schema file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let path_display = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed(&path_display, format!("Failed to read file: {}", e))
        })?;

        let schema: TableSchema = serde_json::from_str(&content)
            .map_err(|e| SchemaError::malformed(&path_display, format!("Invalid JSON: {}", e)))?;

        Logger::trace(
            Event::SchemaFileLoaded.as_str(),
            &[("path", path_display.as_str()), ("table", schema.name.as_str())],
        );

        self.register(schema)
    }

    /// Registers a schema directly (for tests or programmatic setup).
    pub fn register(&mut self, schema: TableSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|reason| SchemaError::invalid(&schema.name, reason))?;

        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::Duplicate(schema.name));
        }

        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Gets a schema by table name.
    pub fn get(&self, table: &str) -> Option<&TableSchema> {
        self.schemas.get(table)
    }

    /// Gets a schema by table name or fails with `UnknownTable`.
    pub fn require(&self, table: &str) -> SchemaResult<&TableSchema> {
        self.get(table)
            .ok_or_else(|| SchemaError::UnknownTable(table.to_string()))
    }

    /// Checks if a table is registered.
    pub fn exists(&self, table: &str) -> bool {
        self.schemas.contains_key(table)
    }

    /// Returns registered table names in sorted order.
    pub fn table_names(&self) -> Vec<&str> {
        self.schemas.keys().map(String::as_str).collect()
    }

    /// Returns the number of loaded schemas.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Writes a schema to `<schema_dir>/<table>.json`.
    ///
    /// Existing files are never overwritten.
    pub fn save_schema(&self, schema: &TableSchema) -> SchemaResult<PathBuf> {
        schema
            .validate_structure()
            .map_err(|reason| SchemaError::invalid(&schema.name, reason))?;

        let path = self.schema_dir.join(format!("{}.json", schema.name));
        if path.exists() {
            return Err(SchemaError::Duplicate(schema.name.clone()));
        }

        if !self.schema_dir.exists() {
            fs::create_dir_all(&self.schema_dir).map_err(|e| {
                SchemaError::malformed(
                    self.schema_dir.display().to_string(),
                    format!("Failed to create schema directory: {}", e),
                )
            })?;
        }

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::{GlobalIndex, LocalIndex, Projection};
    use tempfile::TempDir;

    fn sample_schema() -> TableSchema {
        TableSchema::new("users", "user_id")
            .with_range_key("created_at")
            .with_local_index(LocalIndex::new("by_email", "email"))
            .with_global_index(GlobalIndex::new("by_status", "status").with_projection(Projection::All))
    }

    #[test]
    fn test_register_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.register(sample_schema()).unwrap();

        let schema = loader.get("users");
        assert!(schema.is_some());
        assert_eq!(schema.unwrap().hash_key, "user_id");
        assert!(loader.exists("users"));
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.register(sample_schema()).unwrap();

        let result = loader.register(sample_schema());
        assert_eq!(result.unwrap_err().code(), "KEYPLAN_SCHEMA_DUPLICATE");
    }

    #[test]
    fn test_invalid_schema_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        let result = loader.register(TableSchema::new("users", ""));
        assert_eq!(result.unwrap_err().code(), "KEYPLAN_SCHEMA_INVALID");
        assert_eq!(loader.schema_count(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());

        let schema = sample_schema();
        loader.save_schema(&schema).unwrap();

        let mut loader2 = SchemaLoader::new(temp_dir.path());
        loader2.load_all().unwrap();

        assert_eq!(loader2.get("users"), Some(&schema));
    }

    #[test]
    fn test_save_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());

        loader.save_schema(&sample_schema()).unwrap();
        assert!(loader.save_schema(&sample_schema()).is_err());
    }

    #[test]
    fn test_unknown_table() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());

        assert!(loader.get("nonexistent").is_none());
        assert_eq!(
            loader.require("nonexistent").unwrap_err(),
            SchemaError::UnknownTable("nonexistent".into())
        );
    }

    #[test]
    fn test_load_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        assert!(loader.load_all().is_ok());
        assert_eq!(loader.schema_count(), 0);
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(&temp_dir.path().join("absent"));

        let err = loader.load_all().unwrap_err();
        assert_eq!(err.code(), "KEYPLAN_SCHEMA_MALFORMED");
    }

    #[test]
    fn test_load_skips_non_json_and_rejects_bad_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("README.txt"), "not a schema").unwrap();

        let mut loader = SchemaLoader::new(temp_dir.path());
        loader.load_all().unwrap();
        assert_eq!(loader.schema_count(), 0);

        fs::write(temp_dir.path().join("broken.json"), "{ \"name\": ").unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());
        let err = loader.load_all().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_table_names_sorted() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.register(TableSchema::new("orders", "order_id")).unwrap();
        loader.register(TableSchema::new("accounts", "account_id")).unwrap();

        assert_eq!(loader.table_names(), vec!["accounts", "orders"]);
    }
}
