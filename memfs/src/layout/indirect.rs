//! 一级间接索引块
//!
//! 整个块连续存储**块编号**，每个编号占一个字节，指向一个数据块；
//! 值为 0 的表项表示空。因为 0 号块永远是 inode，所以 0 可以安全地作为结束标记。

use block_dev::{BLOCK_SIZE, Block, BlockId, Session};

use crate::{Error, INDIRECT_COUNT, Result};

#[derive(Debug, Clone)]
pub struct IndirectBlock {
    entries: Block,
    len: usize,
}

impl IndirectBlock {
    pub fn new() -> Self {
        Self {
            entries: [0; BLOCK_SIZE],
            len: 0,
        }
    }

    pub fn load(block_id: BlockId, session: &Session) -> Result<Self> {
        let mut entries = [0; BLOCK_SIZE];
        session.read_block(block_id, &mut entries)?;
        let len = entries[..INDIRECT_COUNT]
            .iter()
            .position(|&entry| entry == 0)
            .unwrap_or(INDIRECT_COUNT);
        Ok(Self { entries, len })
    }

    /// 在下一个空表项中记录块号
    pub fn push(&mut self, block_id: BlockId) -> Result<()> {
        if self.len == INDIRECT_COUNT {
            return Err(Error::NoSpace);
        }
        let entry = u8::try_from(block_id.raw())
            .ok()
            .filter(|&entry| entry != 0)
            .ok_or(Error::Unaddressable(block_id))?;
        self.entries[self.len] = entry;
        self.len += 1;
        Ok(())
    }

    /// 第 `index` 个表项指向的块，空表项返回 `None`
    pub fn get(&self, index: usize) -> Option<BlockId> {
        match self.entries[..INDIRECT_COUNT].get(index) {
            Some(&entry) if entry != 0 => Some(BlockId::new(entry as usize)),
            _ => None,
        }
    }

    /// 按存储顺序遍历所有非空表项
    pub fn iter(&self) -> impl Iterator<Item = BlockId> + '_ {
        self.entries[..INDIRECT_COUNT]
            .iter()
            .filter(|&&entry| entry != 0)
            .map(|&entry| BlockId::new(entry as usize))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_block(&self) -> &Block {
        &self.entries
    }
}

impl Default for IndirectBlock {
    fn default() -> Self {
        Self::new()
    }
}
