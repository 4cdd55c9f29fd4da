mod insights;
mod records;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use insights::{render_report, CategoriesArgs, InsightsArgs};
pub use records::{AppointmentsCommand, ServiceFields, ServicesCommand, StaffCommand};

use crate::config::Config;
use crate::logging;
use crate::services::RecordStore;

/// Salon records and service category insights
#[derive(Parser, Debug)]
#[command(name = "salontrack")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the salon data file [default: ~/.salontrack/salonData.json]
    #[arg(long, global = true, env = "SALONTRACK_DATA")]
    data: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui,

    /// Show service category insights
    Insights(InsightsArgs),

    /// List service categories
    Categories(CategoriesArgs),

    /// Manage staff members
    Staff {
        #[command(subcommand)]
        command: StaffCommand,
    },

    /// Manage the service catalog
    Services {
        #[command(subcommand)]
        command: ServicesCommand,
    },

    /// Manage appointments
    Appointments {
        #[command(subcommand)]
        command: AppointmentsCommand,
    },

    /// Run the REST API server
    Serve {
        #[arg(long, env = "SALONTRACK_HOST")]
        host: Option<String>,

        #[arg(long, env = "SALONTRACK_PORT")]
        port: Option<u16>,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        let (host, port) = match &self.command {
            Some(Commands::Serve { host, port }) => (host.clone(), *port),
            _ => (None, None),
        };
        let launches_tui = self.launches_tui();
        let config = Config::resolve(self.data, host, port)?;
        let store = RecordStore::new(config.data_file.clone());

        if launches_tui {
            // stderr belongs to the alternate screen while the TUI runs
            logging::init_file_logger(self.verbose, &config.log_file())?;
        } else {
            logging::init_cli_logger(self.verbose)?;
        }
        tracing::debug!(data_file = %config.data_file.display(), "using data file");

        match self.command {
            None | Some(Commands::Tui) => crate::tui::run(store),
            Some(Commands::Insights(args)) => args.run(&store),
            Some(Commands::Categories(args)) => args.run(&store),
            Some(Commands::Staff { command }) => command.run(&store),
            Some(Commands::Services { command }) => command.run(&store),
            Some(Commands::Appointments { command }) => command.run(&store),
            Some(Commands::Serve { .. }) => {
                let runtime = tokio::runtime::Builder::new_multi_thread()
                    .enable_all()
                    .build()?;
                runtime.block_on(crate::server::serve(store, &config.bind_addr()))?;
                Ok(())
            }
        }
    }

    fn launches_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }
}
