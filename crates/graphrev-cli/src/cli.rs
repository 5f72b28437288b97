use clap::{Parser, Subcommand};
use graphrev_revision::CONFIG_FILE_NAME;

#[derive(Parser)]
#[command(
    name = "graphrev",
    about = "graphrev: revision history, lifecycle, and changesets for linked-data records",
    version
)]
pub struct Cli {
    /// Path to the config file (defaults apply when it does not exist)
    #[arg(long, global = true, default_value = CONFIG_FILE_NAME)]
    pub config: String,

    /// Path to the quad-store JSONL (overrides `store_path`)
    #[arg(long, global = true)]
    pub store: Option<String>,

    /// Acting user URI (overrides `actor` and GRAPHREV_ACTOR)
    #[arg(long, global = true)]
    pub actor: Option<String>,

    /// More log output on stderr (-v info, -vv debug); GRAPHREV_LOG wins
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Read one revision
    Read {
        /// Revision URI
        revision: String,

        /// Dataset URI
        #[arg(long)]
        dataset: String,

        /// Projection: revision or record
        #[arg(long, default_value = "record")]
        mode: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the revisions of a record, most recent first
    List {
        /// Record URI
        record: String,

        /// Dataset URI
        #[arg(long)]
        dataset: String,

        /// Detail: short or long
        #[arg(long, default_value = "short")]
        detail: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare two revisions of the same record
    Diff {
        /// Left ("from") revision URI
        left: String,

        /// Right ("to") revision URI
        right: String,

        /// Dataset URI
        #[arg(long)]
        dataset: String,

        /// Print the changeset as triples instead of a summary
        #[arg(long, conflicts_with = "json")]
        triples: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change the lifecycle status of a revision
    Status {
        /// Revision URI
        revision: String,

        /// Target status (published, archive, experimental, pre_release,
        /// staging, harvesting, unspecified)
        status: String,

        /// Dataset URI
        #[arg(long)]
        dataset: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a revision (soft) or a record's whole history (hard)
    Delete {
        /// Revision URI
        revision: String,

        /// Dataset URI
        #[arg(long)]
        dataset: String,

        /// Mode: soft or hard
        #[arg(long, default_value = "soft")]
        mode: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Merge quads from a JSONL file into the store
    Import {
        /// Quad JSONL file to import
        file: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the store (or one graph) as quad JSONL
    Export {
        /// Only export this graph
        #[arg(long)]
        graph: Option<String>,

        /// Write to this file instead of stdout
        #[arg(long)]
        output: Option<String>,
    },
}
