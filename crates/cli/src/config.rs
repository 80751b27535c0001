//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use itemtrack_inventory::Followup;
use itemtrack_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "itemtrack", version, about = "Track inventory items, loans and asset followups")]
pub struct Cli {
    /// JSON file holding the item list.
    #[arg(long, env = "ITEMTRACK_DATA_FILE", default_value = "itemtrack.json")]
    pub data_file: PathBuf,

    /// Directory reports are written to.
    #[arg(long, env = "ITEMTRACK_REPORT_DIR", default_value = ".")]
    pub report_dir: PathBuf,

    /// Log output format: json or compact.
    #[arg(long, env = "ITEMTRACK_LOG_FORMAT", default_value = "json")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all items.
    List,
    /// Show one item in full.
    Show { id: String },
    /// Create a new item.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Replace an item's name and description.
    Update {
        id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an item that is not out on loan.
    Delete { id: String },
    /// Lend an item to a borrower.
    Lend {
        id: String,
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        username: String,
    },
    /// Mark an item as returned.
    Return { id: String },
    /// Merge followup fields into an item. Empty values leave fields unchanged.
    Followup {
        id: String,
        #[command(flatten)]
        fields: FollowupArgs,
    },
    /// Print an item's borrow history.
    History { id: String },
    /// Export an item as a CSV report.
    Report {
        id: String,
        /// Print to stdout instead of writing into the report directory.
        #[arg(long)]
        stdout: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FollowupArgs {
    #[arg(long)]
    pub asset_no: Option<String>,
    #[arg(long)]
    pub tag_number: Option<String>,
    #[arg(long)]
    pub serial_number: Option<String>,
    #[arg(long)]
    pub model_nur: Option<String>,
    #[arg(long)]
    pub taggable: bool,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub sub_category: Option<String>,
    #[arg(long)]
    pub asset_adm: Option<String>,
    #[arg(long)]
    pub maint_bh: Option<String>,
    #[arg(long)]
    pub date_place_in_service: Option<String>,
    #[arg(long)]
    pub asset_cost: Option<f64>,
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub campus: Option<String>,
    #[arg(long)]
    pub block: Option<String>,
    #[arg(long)]
    pub floor: Option<String>,
    #[arg(long)]
    pub room: Option<String>,
    #[arg(long = "po-no")]
    pub po_no: Option<String>,
    #[arg(long)]
    pub invoice_no: Option<String>,
    #[arg(long)]
    pub project_code: Option<String>,
    #[arg(long)]
    pub remarks: Option<String>,
}

impl From<FollowupArgs> for Followup {
    fn from(args: FollowupArgs) -> Self {
        Followup {
            asset_no: args.asset_no,
            tag_number: args.tag_number,
            serial_number: args.serial_number,
            model_nur: args.model_nur,
            taggable: Some(args.taggable),
            category: args.category,
            sub_category: args.sub_category,
            asset_adm: args.asset_adm,
            maint_bh: args.maint_bh,
            date_place_in_service: args.date_place_in_service,
            asset_cost: args.asset_cost,
            department: args.department,
            campus: args.campus,
            block: args.block,
            floor: args.floor,
            room: args.room,
            po_no: args.po_no,
            invoice_no: args.invoice_no,
            project_code: args.project_code,
            remarks: args.remarks,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("data file path could not be empty")]
    EmptyDataFile,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_file: PathBuf,
    pub report_dir: PathBuf,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.data_file.as_os_str().is_empty() {
            return Err(ConfigError::EmptyDataFile);
        }
        Ok(Self {
            data_file: cli.data_file.clone(),
            report_dir: cli.report_dir.clone(),
            log_format: cli.log_format,
        })
    }
}
