//! 块分配器
//!
//! 只在一次存储过程中存在，两种策略：
//! - 顺序：计数器从 1 开始，逐个递增
//! - 随机：`[0, N)` 的排列，对 `[1, N)` 做 Fisher–Yates 洗牌后从前往后取
//!
//! 两种策略都保证：同一次存储内块号互不相同、不会分配 0 号块、
//! 总分配次数不超过 `N - 1`。

use block_dev::BlockId;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{ADDRESSABLE_BLOCKS, Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    #[default]
    Sequential,
    Random,
}

#[derive(Debug)]
pub enum Allocator {
    Sequential { next: usize, total: usize },
    Random { order: Vec<BlockId>, cursor: usize },
}

impl Allocator {
    /// 随机策略的种子取自系统熵源
    pub fn new(strategy: Strategy, total_blocks: usize) -> Self {
        match strategy {
            Strategy::Sequential => Self::sequential(total_blocks),
            Strategy::Random => Self::random(total_blocks, &mut rand::thread_rng()),
        }
    }

    pub fn sequential(total_blocks: usize) -> Self {
        Self::Sequential {
            next: 1,
            total: total_blocks.min(ADDRESSABLE_BLOCKS),
        }
    }

    pub fn random<R: Rng + ?Sized>(total_blocks: usize, rng: &mut R) -> Self {
        let total = total_blocks.min(ADDRESSABLE_BLOCKS);
        let mut order: Vec<BlockId> = (0..total).map(BlockId::new).collect();
        // 0 号块留给 inode，不参与洗牌
        if let Some(free) = order.get_mut(1..) {
            free.shuffle(rng);
        }
        Self::Random { order, cursor: 1 }
    }

    pub fn strategy(&self) -> Strategy {
        match self {
            Self::Sequential { .. } => Strategy::Sequential,
            Self::Random { .. } => Strategy::Random,
        }
    }

    /// 分配器可能给出的块号上界（不含）
    pub fn total_blocks(&self) -> usize {
        match self {
            Self::Sequential { total, .. } => *total,
            Self::Random { order, .. } => order.len(),
        }
    }

    /// 剩余可分配的块数
    pub fn remaining(&self) -> usize {
        match self {
            Self::Sequential { next, total } => total.saturating_sub(*next),
            Self::Random { order, cursor } => order.len().saturating_sub(*cursor),
        }
    }

    pub fn alloc(&mut self) -> Result<BlockId> {
        self.next().ok_or(Error::NoSpace)
    }
}

impl Iterator for Allocator {
    type Item = BlockId;

    fn next(&mut self) -> Option<BlockId> {
        match self {
            Self::Sequential { next, total } => {
                if *next >= *total {
                    return None;
                }
                let block_id = BlockId::new(*next);
                *next += 1;
                Some(block_id)
            }
            Self::Random { order, cursor } => {
                let block_id = *order.get(*cursor)?;
                *cursor += 1;
                Some(block_id)
            }
        }
    }
}
