//! # 块设备接口层
//!
//! memdrv 是一个定长的块设备：共 [`NUM_BLOCKS`] 块，每块 [`BLOCK_SIZE`] 字节，
//! 块号范围为 `0..NUM_BLOCKS`，其中 0 号块永久保留给 inode。
//!
//! [`BlockDevice`] 是对读写块设备的抽象，实现了此特质的类型称为**块设备驱动**；
//! 设备必须先打开 ([`BlockDevice::open`]) 才能读写，用完后关闭。
//! 上层通过 [`Session`] 持有一次打开的设备，而不是依赖全局句柄。

mod error;
mod mem;
mod session;

use derive_more::{Display, From, Into};

pub use self::{
    error::{Error, Result},
    mem::MemDrv,
    session::Session,
};

/// 块大小（字节）
pub const BLOCK_SIZE: usize = 512;
/// 设备的总块数
pub const NUM_BLOCKS: usize = 80;

/// 一整块数据
pub type Block = [u8; BLOCK_SIZE];

/// 块号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
#[repr(transparent)]
pub struct BlockId(usize);

impl BlockId {
    /// inode 所在的块，永远不会被分配为数据块
    pub const INODE: Self = Self(0);

    pub const fn new(raw: usize) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> usize {
        self.0
    }

    /// 块在设备上的字节偏移
    pub const fn offset(self) -> u64 {
        (self.0 * BLOCK_SIZE) as u64
    }
}

/// 块设备驱动特质
///
/// 读写都以整块为单位；在 [`open`](Self::open) 之前或 [`close`](Self::close)
/// 之后调用读写会得到 [`Error::NotOpen`]，越界块号会得到 [`Error::OutOfRange`]。
pub trait BlockDevice: Send + Sync {
    fn total_blocks(&self) -> usize {
        NUM_BLOCKS
    }

    fn open(&self) -> Result<()>;
    fn close(&self) -> Result<()>;
    fn read_block(&self, block_id: BlockId, buf: &mut Block) -> Result<()>;
    fn write_block(&self, block_id: BlockId, buf: &Block) -> Result<()>;
}

/// 校验块号是否落在 `0..total`
#[inline]
pub fn check_range(block_id: BlockId, total: usize) -> Result<()> {
    if block_id.raw() < total {
        Ok(())
    } else {
        Err(Error::OutOfRange {
            block: block_id,
            total,
        })
    }
}
