pub mod config;
pub mod directory;
pub mod disposer;
pub mod helpdesk;
pub mod sweep;
pub mod testing;
pub mod triage;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DisposalConfig,
    HelpdeskConfig, MissingFieldPolicy, SanitizedConfig, TriageConfig,
};
pub use directory::fetch_directory;
pub use disposer::{dispose, DisposalOutcome, DisposalReport, DisposeError};
pub use helpdesk::{FreshserviceClient, HelpdeskClient, HelpdeskError};
pub use sweep::{run_sweep, SweepError, SweepReport};
pub use triage::{classify, collect_buckets, normalize, Buckets, Disposition, TriageError};
