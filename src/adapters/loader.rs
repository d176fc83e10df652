use crate::domain::model::LoadOptions;
use crate::domain::ports::VarsLoader;
use crate::utils::error::{LocalVarsError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

/// Suffixes probed after a variable file's base name, in merge order.
pub const VARS_EXTENSIONS: [&str; 4] = ["", ".yml", ".yaml", ".json"];

#[derive(Debug, Clone)]
struct CachedDocument {
    modified: Option<SystemTime>,
    unsafe_tags: bool,
    data: Option<Value>,
}

/// Filesystem backed [`VarsLoader`].
///
/// Parsed documents are memoized per path and modification time when the
/// caller allows caching, so a loader shared across resolution passes only
/// re-reads files that changed.
#[derive(Debug, Default)]
pub struct DataLoader {
    cache: Mutex<HashMap<PathBuf, CachedDocument>>,
}

impl DataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in the cache.
    pub fn cached_documents(&self) -> usize {
        self.cache.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    fn cached(
        &self,
        path: &Path,
        modified: Option<SystemTime>,
        unsafe_tags: bool,
    ) -> Option<Option<Value>> {
        let cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache
            .get(path)
            .filter(|doc| {
                modified.is_some() && doc.modified == modified && doc.unsafe_tags == unsafe_tags
            })
            .map(|doc| doc.data.clone())
    }

    fn store(&self, path: &Path, document: CachedDocument) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        cache.insert(path.to_path_buf(), document);
    }

    /// 遞迴收集目錄下的變數檔案 (依檔名排序)
    fn dir_vars_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();

        let walker = WalkDir::new(dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || is_candidate_entry(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if is_dangling_link(&err) => {
                    if let Some(path) = err.path() {
                        tracing::debug!("skipping unresolvable entry {}", path.display());
                    }
                    continue;
                }
                Err(err) => return Err(err.into()),
            };
            if entry.depth() == 0 || !entry.file_type().is_file() {
                continue;
            }
            tracing::trace!("found vars file {}", entry.path().display());
            found.push(entry.into_path());
        }

        Ok(found)
    }
}

impl VarsLoader for DataLoader {
    fn find_vars_files(&self, dir: &Path, name: &str) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        if is_hidden_or_backup(name) {
            return Ok(found);
        }

        for ext in VARS_EXTENSIONS {
            let candidate = dir.join(format!("{}{}", name, ext));
            if candidate.is_dir() {
                found.extend(self.dir_vars_files(&candidate)?);
            } else if candidate.is_file() {
                tracing::trace!("found vars file {}", candidate.display());
                found.push(candidate);
            }
        }

        Ok(found)
    }

    fn load_from_file(&self, path: &Path, options: LoadOptions) -> Result<Option<Value>> {
        let modified = std::fs::metadata(path)?.modified().ok();

        if options.cache {
            if let Some(data) = self.cached(path, modified, options.unsafe_tags) {
                tracing::trace!("using cached content of {}", path.display());
                return Ok(data);
            }
        }

        let content = std::fs::read_to_string(path)?;
        let data = parse_document(&content, path, options.unsafe_tags)?;

        if options.cache {
            self.store(
                path,
                CachedDocument {
                    modified,
                    unsafe_tags: options.unsafe_tags,
                    data: data.clone(),
                },
            );
        }

        Ok(data)
    }
}

/// Parse a variables document. JSON is tried first, then YAML.
pub fn parse_document(content: &str, path: &Path, unsafe_tags: bool) -> Result<Option<Value>> {
    if content.trim().is_empty() {
        return Ok(None);
    }

    let value = match serde_json::from_str::<Value>(content) {
        Ok(value) => value,
        Err(_) => {
            let mut yaml: serde_yaml::Value =
                serde_yaml::from_str(content).map_err(|e| load_error(path, e.to_string()))?;
            // `<<: *anchor` 合併鍵
            yaml.apply_merge().map_err(|e| load_error(path, e.to_string()))?;
            yaml_to_json(yaml, path, unsafe_tags)?
        }
    };

    Ok(match value {
        Value::Null => None,
        value => Some(value),
    })
}

fn yaml_to_json(value: serde_yaml::Value, path: &Path, unsafe_tags: bool) -> Result<Value> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                n.as_f64()
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| load_error(path, format!("unsupported number {}", n)))?
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(|item| yaml_to_json(item, path, unsafe_tags))
                .collect::<Result<_>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut map = serde_json::Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(mapping_key(key, path)?, yaml_to_json(value, path, unsafe_tags)?);
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => {
            if !unsafe_tags {
                return Err(load_error(
                    path,
                    format!("custom tag {} is not allowed here", tagged.tag),
                ));
            }
            yaml_to_json(tagged.value, path, unsafe_tags)?
        }
    })
}

fn mapping_key(key: serde_yaml::Value, path: &Path) -> Result<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Ok(s),
        Yaml::Number(n) => Ok(n.to_string()),
        Yaml::Bool(b) => Ok(b.to_string()),
        Yaml::Null => Ok("null".to_string()),
        Yaml::Tagged(tagged) => mapping_key(tagged.value, path),
        _ => Err(load_error(path, "mapping keys must be scalars".to_string())),
    }
}

fn load_error(path: &Path, message: String) -> LocalVarsError {
    LocalVarsError::LoadError {
        path: path.display().to_string(),
        message,
    }
}

/// Hidden (`.` prefix) and backup (`~` suffix) names are never loaded.
pub fn is_hidden_or_backup(name: &str) -> bool {
    name.starts_with('.') || name.ends_with('~')
}

/// Extension including the dot, ignoring leading dots of the name.
fn extension(name: &str) -> &str {
    let trimmed = name.trim_start_matches('.');
    match trimmed.rfind('.') {
        Some(idx) => &trimmed[idx..],
        None => "",
    }
}

/// A symlink whose target is gone is neither a file nor a directory.
fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.io_error().map(|e| e.kind()) == Some(ErrorKind::NotFound)
        && err
            .path()
            .is_some_and(|path| path.symlink_metadata().is_ok() && !path.exists())
}

fn is_candidate_entry(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    if is_hidden_or_backup(&name) {
        return false;
    }

    let ext = extension(&name);
    if entry.file_type().is_dir() {
        // 只遞迴沒有副檔名的子目錄
        ext.is_empty()
    } else {
        VARS_EXTENSIONS.contains(&ext)
    }
}
