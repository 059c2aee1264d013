use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(version, about = "Store a single file on the memdrv block device")]
pub struct Cli {
    /// Image file backing the memdrv device
    #[arg(
        long,
        short,
        global = true,
        env = "MEMDRV_IMAGE",
        default_value = "memdrv.img"
    )]
    pub image: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Zero every block of the device, inode included
    Clear,

    /// Store a file on the device, replacing the current one
    Store {
        /// Allocate blocks in random order
        #[arg(short, long)]
        random: bool,

        /// Source file
        path: PathBuf,
    },

    /// Retrieve the stored file, to standard output if no path is given
    Retrieve {
        /// Destination file
        path: Option<PathBuf>,
    },

    /// Suspend the process for the given number of seconds
    Sleep { seconds: u64 },
}
