mod cli;

use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use block_dev::{BlockDevice, Session};
use clap::Parser;
use memfs::{Destination, Retrieved, Strategy};
use memfs_cli::{BlockFile, Prompt};

use self::cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Clear => {
            with_device(&cli.image, |session| {
                memfs::clear(session).context("failed to clear memdrv")
            })?;
            println!("memdrv cleared: all blocks zeroed.");
        }
        Command::Store { random, path } => {
            let strategy = if random {
                Strategy::Random
            } else {
                Strategy::Sequential
            };
            let report = with_device(&cli.image, |session| {
                memfs::store_file(session, &path, strategy)
                    .with_context(|| format!("failed to store {}", path.display()))
            })?;
            log::info!(
                "stored {} bytes in {} blocks, indirect block {:?}",
                report.size,
                report.data_blocks.len(),
                report.indirect
            );
        }
        Command::Retrieve { path } => {
            let destination = match path {
                Some(path) => Destination::Path(path),
                None => Destination::Stdout,
            };
            let retrieved = with_device(&cli.image, |session| {
                memfs::retrieve_to(session, &destination, &mut Prompt::stdio())
                    .context("failed to retrieve the stored file")
            })?;
            if let (Retrieved::Skipped, Destination::Path(path)) = (retrieved, &destination) {
                println!("Skipped {}", path.display());
            }
        }
        Command::Sleep { seconds } => {
            println!("Sleeping for {seconds} seconds");
            thread::sleep(Duration::from_secs(seconds));
        }
    }

    Ok(())
}

/// 操作失败时也先关闭设备再返回错误
fn with_device<T>(
    image: &Path,
    f: impl FnOnce(&mut Session) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    let block_file: Arc<dyn BlockDevice> = Arc::new(BlockFile::new(image));
    Session::run(block_file, f)
        .with_context(|| format!("memdrv at {}", image.display()))
}
