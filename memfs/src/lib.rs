//! # memfs
//!
//! 建立在 memdrv 块设备上的单文件存储层，自上而下：
//!
//! 1. 存取流程：[`store`] 把一个文件切块写入设备，[`retrieve`] 按 inode 还原，
//!    [`clear`] 清零整个设备
//! 2. 块分配器：顺序分配或随机分配
//! 3. 磁盘数据结构层：0 号块上的 inode 以及一级间接索引块
//! 4. 块设备接口层：见 `block-dev`

// 块分配器
mod allocator;

// 清零设备
mod clear;

mod error;

// 磁盘数据结构层
mod layout;

// 存取流程
mod retrieve;
mod store;

pub mod rio;

pub use block_dev::{BLOCK_SIZE, Block, BlockDevice, BlockId, MemDrv, NUM_BLOCKS, Session};

pub use self::{
    allocator::{Allocator, Strategy},
    clear::clear,
    error::{Error, ErrorKind, Result},
    layout::{IndirectBlock, Inode},
    retrieve::{Confirm, Destination, Retrieved, retrieve, retrieve_to},
    store::{StoreReport, store, store_file},
};

/// inode 中直接索引的个数
pub const NDIRECT: usize = 12;

/// 间接索引块的编号容量。
///
/// 每个表项只有一个字节，最多只能指向 255 个不同的块（0 表示空），
/// 所以不论块多大，容量都不超过 255。
pub const INDIRECT_COUNT: usize = if BLOCK_SIZE < u8::MAX as usize {
    BLOCK_SIZE
} else {
    u8::MAX as usize
};

/// 一个文件最多占用的数据块数
pub const MAX_FILE_BLOCKS: usize = NDIRECT + INDIRECT_COUNT;

/// 单字节表项能表示的块号个数（含 0）
const ADDRESSABLE_BLOCKS: usize = u8::MAX as usize + 1;

const _: () = assert!(NUM_BLOCKS <= ADDRESSABLE_BLOCKS);
const _: () = assert!(NUM_BLOCKS - 2 <= MAX_FILE_BLOCKS);

/// 块数为 `total_blocks` 的设备上能存下的最大文件长度。
///
/// 留出 0 号块给 inode，再留一块余量给间接索引块。
pub const fn capacity(total_blocks: usize) -> u64 {
    let blocks = total_blocks.saturating_sub(2);
    let blocks = if blocks < MAX_FILE_BLOCKS {
        blocks
    } else {
        MAX_FILE_BLOCKS
    };
    (blocks * BLOCK_SIZE) as u64
}
