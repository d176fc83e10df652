use anyhow::Result;
use local_vars::adapters::hostname::FixedHostname;
use local_vars::domain::model::HashBehaviour;
use local_vars::domain::ports::HostnameSource;
use local_vars::{
    DataLoader, Entity, LocalVarsPlugin, PluginSettings, SystemHostname, VarsPlugin,
    LOCAL_HOSTNAME_VAR, LOCAL_VARS_DIR,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_vars(basedir: &Path, name: &str, content: &str) -> Result<PathBuf> {
    let path = basedir.join(LOCAL_VARS_DIR).join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, content)?;
    Ok(path)
}

fn web01() -> LocalVarsPlugin<FixedHostname> {
    LocalVarsPlugin::with_hostname_source(
        FixedHostname("web01".to_string()),
        PluginSettings::default(),
    )
}

/// 使用真實主機名稱：只有 local_hostname
#[test]
fn test_system_hostname_without_local_vars() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let hostname = SystemHostname::new().hostname()?;

    let plugin = LocalVarsPlugin::new(PluginSettings::default());
    let vars = plugin.get_vars(&DataLoader::new(), temp_dir.path(), &[])?;

    assert_eq!(Value::Object(vars), json!({ "local_hostname": hostname }));
    Ok(())
}

/// 使用真實主機名稱的變數檔
#[test]
fn test_system_hostname_file_is_merged() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let hostname = SystemHostname::new().hostname()?;
    write_vars(temp_dir.path(), &format!("{}.yml", hostname), "controller: true\n")?;
    write_vars(temp_dir.path(), "some-other-machine.yml", "controller: false\n")?;

    let plugin = LocalVarsPlugin::new(PluginSettings::default());
    let vars = plugin.get_vars(&DataLoader::new(), temp_dir.path(), &[])?;

    assert_eq!(vars[LOCAL_HOSTNAME_VAR], json!(hostname));
    assert_eq!(vars["controller"], json!(true));
    Ok(())
}

#[test]
fn test_single_yaml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(temp_dir.path(), "web01.yaml", "db_host: \"10.0.0.5\"\n")?;

    let vars = web01().get_vars(&DataLoader::new(), temp_dir.path(), &[Entity::host("app")])?;

    assert_eq!(
        Value::Object(vars),
        json!({"local_hostname": "web01", "db_host": "10.0.0.5"})
    );
    Ok(())
}

#[test]
fn test_json_file_wins_over_yaml_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(temp_dir.path(), "web01.yaml", "a: 1\nb: 2\n")?;
    write_vars(temp_dir.path(), "web01.json", "{\"b\": 3}\n")?;

    let vars = web01().get_vars(&DataLoader::new(), temp_dir.path(), &[])?;

    assert_eq!(
        Value::Object(vars),
        json!({"local_hostname": "web01", "a": 1, "b": 3})
    );
    Ok(())
}

#[test]
fn test_hidden_backup_and_foreign_files_are_ignored() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(temp_dir.path(), ".web01.yaml", "hidden: true\n")?;
    write_vars(temp_dir.path(), "web01.yaml~", "backup: true\n")?;
    write_vars(temp_dir.path(), "web01.txt", "text: true\n")?;
    write_vars(temp_dir.path(), "web011.yaml", "prefix: true\n")?;
    write_vars(temp_dir.path(), "web02.yaml", "other: true\n")?;

    let vars = web01().get_vars(&DataLoader::new(), temp_dir.path(), &[])?;

    assert_eq!(Value::Object(vars), json!({"local_hostname": "web01"}));
    Ok(())
}

#[test]
fn test_host_directory_is_walked_in_name_order() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(temp_dir.path(), "web01/10-base.yml", "role: base\nport: 80\n")?;
    write_vars(temp_dir.path(), "web01/20-override.yml", "port: 8080\n")?;
    write_vars(temp_dir.path(), "web01/.secret.yml", "secret: leaked\n")?;
    write_vars(temp_dir.path(), "web01/20-override.yml~", "port: 1\n")?;
    write_vars(temp_dir.path(), "web01/.cache/extra.yml", "cached: true\n")?;

    let vars = web01().get_vars(&DataLoader::new(), temp_dir.path(), &[])?;

    assert_eq!(
        Value::Object(vars),
        json!({"local_hostname": "web01", "role": "base", "port": 8080})
    );
    Ok(())
}

#[test]
fn test_empty_files_do_not_change_result() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(temp_dir.path(), "web01", "")?;
    write_vars(temp_dir.path(), "web01.yml", "a: 1\n")?;
    write_vars(temp_dir.path(), "web01.yaml", "---\n# nothing yet\n")?;
    write_vars(temp_dir.path(), "web01.json", "{}")?;

    let vars = web01().get_vars(&DataLoader::new(), temp_dir.path(), &[])?;

    assert_eq!(Value::Object(vars), json!({"local_hostname": "web01", "a": 1}));
    Ok(())
}

#[test]
fn test_inventory_file_path_uses_its_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let inventory = temp_dir.path().join("hosts.yml");
    std::fs::write(&inventory, "all:\n  hosts:\n    app: {}\n")?;
    write_vars(temp_dir.path(), "web01.yml", "site: ams\n")?;

    let vars = web01().get_vars(&DataLoader::new(), &inventory, &[Entity::group("all")])?;

    assert_eq!(vars["site"], json!("ams"));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinked_local_vars_directory() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let shared = temp_dir.path().join("shared");
    std::fs::create_dir_all(&shared)?;
    std::fs::write(shared.join("web01.yaml"), "shared: true\n")?;

    let basedir = temp_dir.path().join("inventory");
    std::fs::create_dir_all(&basedir)?;
    std::os::unix::fs::symlink(&shared, basedir.join(LOCAL_VARS_DIR))?;

    let vars = web01().get_vars(&DataLoader::new(), &basedir, &[])?;

    assert_eq!(vars["shared"], json!(true));
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_in_host_directory_is_skipped() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let a = write_vars(temp_dir.path(), "web01/a.yml", "a: 1\n")?;
    let dangling = a.with_file_name("b.yml");
    std::os::unix::fs::symlink(temp_dir.path().join("gone.yml"), &dangling)?;

    let vars = web01().get_vars(&DataLoader::new(), temp_dir.path(), &[])?;

    assert_eq!(Value::Object(vars), json!({"local_hostname": "web01", "a": 1}));
    Ok(())
}

#[test]
fn test_yaml_merge_keys_are_resolved() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(
        temp_dir.path(),
        "web01.yml",
        "defaults: &defaults\n  port: 5432\n  host: localhost\ndb:\n  <<: *defaults\n  host: 10.0.0.5\n",
    )?;

    let vars = web01().get_vars(&DataLoader::new(), temp_dir.path(), &[])?;

    assert_eq!(vars["db"], json!({"port": 5432, "host": "10.0.0.5"}));
    Ok(())
}

#[test]
fn test_merge_hash_behaviour() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(temp_dir.path(), "web01.yml", "db:\n  host: a\n  port: 5432\n")?;
    write_vars(temp_dir.path(), "web01.json", "{\"db\": {\"host\": \"b\"}}")?;

    let settings = PluginSettings {
        hash_behaviour: HashBehaviour::Merge,
        ..PluginSettings::default()
    };
    let plugin = LocalVarsPlugin::with_hostname_source(FixedHostname("web01".into()), settings);
    let vars = plugin.get_vars(&DataLoader::new(), temp_dir.path(), &[])?;

    assert_eq!(vars["db"], json!({"host": "b", "port": 5432}));
    Ok(())
}

#[test]
fn test_syntax_error_is_single_parser_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(temp_dir.path(), "web01.yml", "good: 1\n")?;
    let broken = write_vars(temp_dir.path(), "web01.yaml", "bad: [1, 2\n")?;

    let err = web01()
        .get_vars(&DataLoader::new(), temp_dir.path(), &[])
        .unwrap_err();

    let canonical = std::fs::canonicalize(&broken)?;
    assert!(err
        .message
        .starts_with(&format!("Syntax error in '{}'", canonical.display())));
    Ok(())
}

#[test]
fn test_non_mapping_file_is_parser_error() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(temp_dir.path(), "web01.yaml", "- just\n- a\n- list\n")?;

    let err = web01()
        .get_vars(&DataLoader::new(), temp_dir.path(), &[])
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "failed to combine variables, expected dicts but got a 'dict' and a 'list'"
    );
    Ok(())
}

#[test]
fn test_edited_file_is_reloaded_by_shared_loader() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = write_vars(temp_dir.path(), "web01.yaml", "version: 1\n")?;
    let loader = DataLoader::new();
    let plugin = web01();

    let first = plugin.get_vars(&loader, temp_dir.path(), &[])?;
    assert_eq!(first["version"], json!(1));
    assert_eq!(loader.cached_documents(), 1);

    let second = plugin.get_vars(&loader, temp_dir.path(), &[])?;
    assert_eq!(second, first);

    // 確保修改時間不同
    std::fs::write(&path, "version: 2\n")?;
    let file = std::fs::File::options().write(true).open(&path)?;
    file.set_modified(std::time::SystemTime::now() + std::time::Duration::from_secs(5))?;

    let third = plugin.get_vars(&loader, temp_dir.path(), &[])?;
    assert_eq!(third["version"], json!(2));
    Ok(())
}

#[test]
fn test_concurrent_resolution() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_vars(temp_dir.path(), "web01.yaml", "a: 1\n")?;
    let loader = DataLoader::new();
    let plugin = web01();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| plugin.get_vars(&loader, temp_dir.path(), &[])))
            .collect();

        for handle in handles {
            let vars = handle.join().expect("resolver thread panicked").unwrap();
            assert_eq!(
                Value::Object(vars),
                json!({"local_hostname": "web01", "a": 1})
            );
        }
    });
    Ok(())
}
