#[cfg(test)]
mod tests;

mod prompt;

use std::cell::RefCell;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use block_dev::{BLOCK_SIZE, Block, BlockDevice, BlockId, Error, NUM_BLOCKS, Result, check_range};
use send_wrapper::SendWrapper;

pub use self::prompt::Prompt;

/// 宿主机上的镜像文件，充当 memdrv，使设备内容在进程之间保留下来。
///
/// 镜像文件恰好 `NUM_BLOCKS * BLOCK_SIZE` 字节，打开时若不存在会被创建并补足长度。
#[derive(Debug)]
pub struct BlockFile {
    path: PathBuf,
    inner: SendWrapper<RefCell<Option<File>>>,
}

impl BlockFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            inner: SendWrapper::new(RefCell::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_file<T>(&self, block_id: BlockId, f: impl FnOnce(&mut File) -> Result<T>) -> Result<T> {
        let mut fd = self.inner.borrow_mut();
        let file = fd.as_mut().ok_or(Error::NotOpen)?;
        check_range(block_id, NUM_BLOCKS)?;
        file.seek(SeekFrom::Start(block_id.offset()))?;
        f(file)
    }
}

impl BlockDevice for BlockFile {
    fn open(&self) -> Result<()> {
        let mut fd = self.inner.borrow_mut();
        if fd.is_some() {
            return Err(Error::AlreadyOpen);
        }

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&self.path)?;
        let disk_size = (NUM_BLOCKS * BLOCK_SIZE) as u64;
        if file.metadata()?.len() < disk_size {
            file.set_len(disk_size)?;
        }
        log::trace!("image {:?} opened", self.path);

        *fd = Some(file);
        Ok(())
    }

    fn close(&self) -> Result<()> {
        let file = self.inner.borrow_mut().take().ok_or(Error::NotOpen)?;
        file.sync_all()?;
        Ok(())
    }

    // read_exact / write_all 会重试被信号打断的读写
    fn read_block(&self, block_id: BlockId, buf: &mut Block) -> Result<()> {
        self.with_file(block_id, |file| Ok(file.read_exact(buf)?))
    }

    fn write_block(&self, block_id: BlockId, buf: &Block) -> Result<()> {
        self.with_file(block_id, |file| Ok(file.write_all(buf)?))
    }
}
