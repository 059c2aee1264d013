//! # 还原流程
//!
//! 从 0 号块读出 inode，按直接索引、间接索引的顺序读出每个数据块，
//! 把整块内容追加到目标中。存储时补的零不会被去掉，所以输出长度总是块大小的整数倍。

use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use block_dev::{BLOCK_SIZE, Session};

use crate::layout::Inode;
use crate::{Error, Result};

/// 目标文件已存在时，决定是否覆盖
pub trait Confirm {
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&Path) -> io::Result<bool>,
{
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        self(path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Path(PathBuf),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retrieved {
    Written { blocks: usize, bytes: u64 },
    /// 没有得到覆盖的确认，目标保持原样
    Skipped,
}

/// 把设备上的文件写到 `dest`
pub fn retrieve<W: Write>(session: &Session, mut dest: W) -> Result<Retrieved> {
    let inode = Inode::load(session)?;
    let blocks = inode.data_blocks(session)?;

    let mut buf = [0; BLOCK_SIZE];
    for &block_id in &blocks {
        session.read_block(block_id, &mut buf)?;
        dest.write_all(&buf).map_err(Error::Write)?;
    }
    dest.flush().map_err(Error::Write)?;

    let bytes = (blocks.len() * BLOCK_SIZE) as u64;
    log::info!(
        "retrieved {} blocks ({bytes} bytes, logical size {})",
        blocks.len(),
        inode.size()
    );
    Ok(Retrieved::Written {
        blocks: blocks.len(),
        bytes,
    })
}

/// 把设备上的文件写到标准输出或指定路径。
///
/// 路径已存在时先询问 `confirm`，只有明确同意才会截断并覆盖；
/// 否则返回 [`Retrieved::Skipped`]，文件内容不变。写标准输出不需要确认。
pub fn retrieve_to(
    session: &Session,
    destination: &Destination,
    confirm: &mut dyn Confirm,
) -> Result<Retrieved> {
    let path = match destination {
        Destination::Stdout => return retrieve(session, io::stdout().lock()),
        Destination::Path(path) => path,
    };

    if path.exists() {
        let accepted = confirm.confirm_overwrite(path).unwrap_or_else(|err| {
            log::warn!("no confirmation for {path:?}: {err}");
            false
        });
        if !accepted {
            log::info!("skipped {path:?}");
            return Ok(Retrieved::Skipped);
        }
    }

    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|source| Error::Destination {
            path: path.clone(),
            source,
        })?;
    retrieve(session, BufWriter::new(file))
}
