//! 一次打开的设备
//!
//! [`Session`] 在创建时打开设备、在 [`Session::close`] 时关闭设备，
//! 每次块操作都通过它进行。

use std::sync::Arc;

use crate::{Block, BlockDevice, BlockId, Error, Result};

pub struct Session {
    dev: Arc<dyn BlockDevice>,
    opened: bool,
}

impl Session {
    pub fn open(dev: Arc<dyn BlockDevice>) -> Result<Self> {
        dev.open()?;
        log::trace!("memdrv opened, {} blocks", dev.total_blocks());
        Ok(Self { dev, opened: true })
    }

    /// 打开设备，执行 `f`，再关闭设备。`f` 失败时也会关闭，返回 `f` 的错误。
    pub fn run<T, E, F>(dev: Arc<dyn BlockDevice>, f: F) -> core::result::Result<T, E>
    where
        E: From<Error>,
        F: FnOnce(&mut Self) -> core::result::Result<T, E>,
    {
        let mut session = Self::open(dev)?;
        match f(&mut session) {
            Ok(value) => {
                session.close()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(close_err) = session.close() {
                    log::error!("failed to close memdrv: {close_err}");
                }
                Err(err)
            }
        }
    }

    #[inline]
    pub fn total_blocks(&self) -> usize {
        self.dev.total_blocks()
    }

    #[inline]
    pub fn read_block(&self, block_id: BlockId, buf: &mut Block) -> Result<()> {
        self.dev.read_block(block_id, buf)
    }

    #[inline]
    pub fn write_block(&mut self, block_id: BlockId, buf: &Block) -> Result<()> {
        self.dev.write_block(block_id, buf)
    }

    pub fn close(mut self) -> Result<()> {
        self.opened = false;
        self.dev.close()?;
        log::trace!("memdrv closed");
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if self.opened {
            log::warn!("memdrv session dropped without close");
            if let Err(err) = self.dev.close() {
                log::error!("failed to close memdrv: {err}");
            }
        }
    }
}
