use crate::settings::Settings;
use std::path::PathBuf;

/// Command-line overrides applied on top of the loaded settings.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SettingsOverrides {
    /// Address to bind the HTTP server to.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind the HTTP server to.
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to the SQLite trade ledger.
    #[arg(long = "database")]
    pub database: Option<PathBuf>,

    /// Currency label for reported figures.
    #[arg(long)]
    pub currency: Option<String>,
}

impl SettingsOverrides {
    pub fn apply(self, settings: &mut Settings) {
        if let Some(host) = self.host {
            settings.server.host = host;
        }
        if let Some(port) = self.port {
            settings.server.port = port;
        }
        if let Some(path) = self.database {
            settings.database.path = path;
        }
        if let Some(currency) = self.currency {
            settings.api.base_currency = currency;
        }
    }
}
