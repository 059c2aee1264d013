//! # 存储流程
//!
//! 把源文件按块切开，逐块分配、写入，最后写 inode。
//!
//! 写入顺序：所有数据块 → 间接索引块 → 0 号块的 inode。
//! inode 是“当前文件”的唯一依据，在它被覆盖之前任何一步失败，
//! 设备上都仍然是旧的 inode。

use std::fs::File;
use std::io::Read;
use std::path::Path;

use block_dev::{BLOCK_SIZE, BlockId, Session};

use crate::layout::{IndirectBlock, Inode};
use crate::{Allocator, Error, NDIRECT, Result, Strategy, capacity, rio};

/// 一次存储的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreReport {
    /// 写入 inode 的逻辑长度
    pub size: u32,
    /// 源文件的原始长度
    pub source_len: u64,
    pub truncated: bool,
    /// 按逻辑顺序排列的数据块
    pub data_blocks: Vec<BlockId>,
    pub indirect: Option<BlockId>,
}

/// 打开 `path` 并以 `strategy` 存入设备，替换设备上原有的文件。
///
/// 源文件打不开时直接返回，设备不会被写入任何内容。
pub fn store_file(session: &mut Session, path: &Path, strategy: Strategy) -> Result<StoreReport> {
    let source_err = |source| Error::Source {
        path: path.to_owned(),
        source,
    };
    let file = File::open(path).map_err(source_err)?;
    let source_len = file.metadata().map_err(source_err)?.len();

    let allocator = Allocator::new(strategy, session.total_blocks());
    store(session, file, source_len, allocator)
}

/// 把 `source` 的前 `source_len` 字节存入设备，替换设备上原有的文件。
///
/// 超出容量的部分被截断，只记一条警告。
/// `allocator` 的范围超出设备时直接返回，设备不会被写入任何内容。
pub fn store<R: Read>(
    session: &mut Session,
    mut source: R,
    source_len: u64,
    mut allocator: Allocator,
) -> Result<StoreReport> {
    if allocator.total_blocks() > session.total_blocks() {
        return Err(Error::Geometry {
            allocator: allocator.total_blocks(),
            device: session.total_blocks(),
        });
    }

    let limit = capacity(session.total_blocks());
    let truncated = source_len > limit;
    if truncated {
        log::warn!("file truncated: {source_len} bytes exceed the capacity of {limit} bytes");
    }
    let len = source_len.min(limit);
    log::info!(
        "storing {len} bytes with {:?} allocation",
        allocator.strategy()
    );

    let mut inode = Inode::default();
    let mut table = IndirectBlock::new();
    let mut data_blocks = Vec::new();
    let mut buf = [0; BLOCK_SIZE];
    let mut stored = 0u64;

    while stored < len {
        let want = (len - stored).min(BLOCK_SIZE as u64) as usize;
        let n = rio::read_full(&mut source, &mut buf[..want]).map_err(Error::Read)?;
        if n == 0 {
            log::warn!("source ended after {stored} of {len} bytes");
            break;
        }
        // 最后一块补零
        buf[n..].fill(0);

        let block_index = data_blocks.len();
        let block_id = allocator.alloc()?;
        if block_index < NDIRECT {
            inode.set_direct(block_index, block_id)?;
        } else {
            if inode.indirect().is_none() {
                let indirect = allocator.alloc()?;
                log::debug!("indirect block -> {indirect}");
                inode.set_indirect(indirect);
            }
            table.push(block_id)?;
        }

        session.write_block(block_id, &buf)?;
        log::debug!("chunk {block_index} -> block {block_id}");
        data_blocks.push(block_id);
        stored += n as u64;
    }

    let indirect = inode.indirect();
    if let Some(indirect) = indirect {
        session.write_block(indirect, table.as_block())?;
    }

    // stored 不超过 capacity，一定能放进 u32
    let size = u32::try_from(stored).map_err(|_| Error::NoSpace)?;
    inode.set_size(size);
    // inode 必须最后写
    inode.store(session)?;

    Ok(StoreReport {
        size,
        source_len,
        truncated,
        data_blocks,
        indirect,
    })
}
