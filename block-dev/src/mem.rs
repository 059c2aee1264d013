//! 内存中的 memdrv

use spin::Mutex;

use crate::{BLOCK_SIZE, Block, BlockDevice, BlockId, Error, NUM_BLOCKS, Result, check_range};

/// 全部数据放在内存里的块设备，初始全零
#[derive(Debug)]
pub struct MemDrv {
    inner: Mutex<Inner>,
}

#[derive(Debug)]
struct Inner {
    opened: bool,
    blocks: Vec<Block>,
}

impl MemDrv {
    pub fn new() -> Self {
        Self::with_blocks(NUM_BLOCKS)
    }

    /// 指定块数的设备，测试用
    pub fn with_blocks(total_blocks: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                opened: false,
                blocks: vec![[0; BLOCK_SIZE]; total_blocks],
            }),
        }
    }

    /// 绕过打开状态直接查看某块的内容
    pub fn peek(&self, block_id: BlockId) -> Option<Block> {
        self.inner.lock().blocks.get(block_id.raw()).copied()
    }

    pub fn is_open(&self) -> bool {
        self.inner.lock().opened
    }
}

impl Default for MemDrv {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDevice for MemDrv {
    fn total_blocks(&self) -> usize {
        self.inner.lock().blocks.len()
    }

    fn open(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.opened {
            return Err(Error::AlreadyOpen);
        }
        inner.opened = true;
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if !inner.opened {
            return Err(Error::NotOpen);
        }
        inner.opened = false;
        Ok(())
    }

    fn read_block(&self, block_id: BlockId, buf: &mut Block) -> Result<()> {
        let inner = self.inner.lock();
        if !inner.opened {
            return Err(Error::NotOpen);
        }
        check_range(block_id, inner.blocks.len())?;
        buf.copy_from_slice(&inner.blocks[block_id.raw()]);
        Ok(())
    }

    fn write_block(&self, block_id: BlockId, buf: &Block) -> Result<()> {
        let mut inner = self.inner.lock();
        if !inner.opened {
            return Err(Error::NotOpen);
        }
        check_range(block_id, inner.blocks.len())?;
        inner.blocks[block_id.raw()].copy_from_slice(buf);
        Ok(())
    }
}
