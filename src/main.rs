use clap::Parser;
use local_vars::config::OutputFormat;
use local_vars::utils::{logger, validation::Validate};
use local_vars::{CliConfig, DataLoader, LocalVarsPlugin, VariableRecord, VarsPlugin};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 驗證命令列參數
    if let Err(e) = config.validate() {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let settings = match config.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Failed to load settings: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if settings.json_logs() {
        logger::init_json_logger(&settings.logging.level, config.verbose);
    } else {
        logger::init_cli_logger(&settings.logging.level, config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);
    tracing::debug!("Plugin settings: {:?}", settings.plugin);

    let plugin = LocalVarsPlugin::new(settings.plugin);
    let vars = if plugin.runs_at(config.stage) {
        let loader = DataLoader::new();
        match plugin.get_vars(&loader, &config.basedir, &config.entities()) {
            Ok(vars) => vars,
            Err(e) => {
                tracing::error!("❌ {} failed: {}", plugin.name(), e);
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
    } else {
        tracing::info!(
            "Skipping {}: configured for stage '{}', requested '{}'",
            plugin.name(),
            plugin.settings().stage,
            config.stage
        );
        VariableRecord::new()
    };

    print!("{}", render(&vars, config.format)?);
    Ok(())
}

fn render(vars: &VariableRecord, format: OutputFormat) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(vars)?),
        OutputFormat::Yaml => serde_yaml::to_string(vars)?,
    })
}
