//! inode：0 号块上定长的元数据
//!
//! - `size`：文件的逻辑长度（截断后的长度，不含末块的补零）
//! - `addrs`：`NDIRECT` 个直接索引，按逻辑顺序指向数据块；
//!   最后一个槽若非零，指向一个一级间接索引块
//!
//! 任何槽为 0 都表示“未使用”。
//!
//! ## 块索引编码
//!
//! 逻辑块号 `k < NDIRECT` 时物理块号为 `addrs[k]`，
//! 否则为间接索引块的第 `k - NDIRECT` 个表项。

use std::io::Cursor;

use binrw::{BinRead, BinWrite, binrw};
use block_dev::{BLOCK_SIZE, Block, BlockId, Session};

use crate::layout::IndirectBlock;
use crate::{Error, NDIRECT, Result};

#[binrw]
#[brw(little)]
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Inode {
    // 不用usize是为了严控布局
    size: u32,
    /// 前 NDIRECT 个为直接索引，最后一个指向间接索引块
    addrs: [u32; NDIRECT + 1],
}

impl Inode {
    /// 从 0 号块读出 inode，全零的块得到空 inode
    pub fn load(session: &Session) -> Result<Self> {
        let mut block = [0; BLOCK_SIZE];
        session.read_block(BlockId::INODE, &mut block)?;
        Self::decode(&block)
    }

    /// 覆盖 0 号块。这一步让新文件生效、旧文件失效。
    pub fn store(&self, session: &mut Session) -> Result<()> {
        let block = self.encode()?;
        session.write_block(BlockId::INODE, &block)?;
        Ok(())
    }

    pub fn decode(block: &Block) -> Result<Self> {
        Ok(Self::read(&mut Cursor::new(&block[..]))?)
    }

    pub fn encode(&self) -> Result<Block> {
        let mut block = [0; BLOCK_SIZE];
        self.write(&mut Cursor::new(&mut block[..]))?;
        Ok(block)
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.size
    }

    #[inline]
    pub fn set_size(&mut self, size: u32) {
        self.size = size;
    }

    /// 第 `index` 个直接索引，0 表示未使用
    pub fn direct(&self, index: usize) -> Option<BlockId> {
        self.addrs[..NDIRECT]
            .get(index)
            .copied()
            .filter(|&addr| addr != 0)
            .map(|addr| BlockId::new(addr as usize))
    }

    pub fn set_direct(&mut self, index: usize, block_id: BlockId) -> Result<()> {
        let slot = self.addrs[..NDIRECT]
            .get_mut(index)
            .ok_or(Error::DirectSlot(index))?;
        *slot = block_id.raw() as u32;
        Ok(())
    }

    pub fn indirect(&self) -> Option<BlockId> {
        match self.addrs[NDIRECT] {
            0 => None,
            addr => Some(BlockId::new(addr as usize)),
        }
    }

    pub fn set_indirect(&mut self, block_id: BlockId) {
        self.addrs[NDIRECT] = block_id.raw() as u32;
    }

    /// 没有任何块的 inode，例如刚清零的设备
    pub fn is_empty(&self) -> bool {
        self.addrs.iter().all(|&addr| addr == 0)
    }

    /// 逻辑上 inode 指向一系列数据块，此处传入的是这些数据块的索引（逻辑索引），
    /// 返回对应的物理块号；未映射时返回 `None`
    pub fn block_id(&self, block_index: usize, session: &Session) -> Result<Option<BlockId>> {
        if block_index < NDIRECT {
            return Ok(self.direct(block_index));
        }
        match self.indirect() {
            Some(indirect) => {
                // 剔去直接索引的部分
                Ok(IndirectBlock::load(indirect, session)?.get(block_index - NDIRECT))
            }
            None => Ok(None),
        }
    }

    /// 文件的全部数据块，按逻辑顺序：先是非零的直接索引，再是间接索引块中的非零表项。
    /// 间接索引块只读一次。
    pub fn data_blocks(&self, session: &Session) -> Result<Vec<BlockId>> {
        let mut blocks: Vec<BlockId> = (0..NDIRECT).filter_map(|i| self.direct(i)).collect();
        if let Some(indirect) = self.indirect() {
            blocks.extend(IndirectBlock::load(indirect, session)?.iter());
        }
        Ok(blocks)
    }
}
