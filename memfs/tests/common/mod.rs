#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use memfs::{Allocator, Block, BlockDevice, BlockId, MemDrv, Retrieved, Session, StoreReport};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

pub fn session(dev: &Arc<MemDrv>) -> Session {
    Session::open(dev.clone()).unwrap()
}

/// 确定性的伪随机内容
pub fn content(len: usize, seed: u64) -> Vec<u8> {
    let mut data = vec![0; len];
    StdRng::seed_from_u64(seed).fill_bytes(&mut data);
    data
}

pub fn store_bytes(session: &mut Session, data: &[u8], allocator: Allocator) -> StoreReport {
    memfs::store(session, data, data.len() as u64, allocator).unwrap()
}

pub fn retrieve_bytes(session: &Session) -> Vec<u8> {
    let mut out = Vec::new();
    let retrieved = memfs::retrieve(session, &mut out).unwrap();
    assert_eq!(
        retrieved,
        Retrieved::Written {
            blocks: out.len() / memfs::BLOCK_SIZE,
            bytes: out.len() as u64
        }
    );
    out
}

/// 在写 0 号块时失败的设备，模拟在写 inode 之前进程终止
pub struct CrashBeforeInode {
    pub inner: MemDrv,
    pub armed: AtomicBool,
}

impl CrashBeforeInode {
    pub fn new() -> Self {
        Self {
            inner: MemDrv::new(),
            armed: AtomicBool::new(false),
        }
    }

    pub fn arm(&self, armed: bool) {
        self.armed.store(armed, Ordering::SeqCst);
    }
}

impl BlockDevice for CrashBeforeInode {
    fn total_blocks(&self) -> usize {
        self.inner.total_blocks()
    }

    fn open(&self) -> block_dev::Result<()> {
        self.inner.open()
    }

    fn close(&self) -> block_dev::Result<()> {
        self.inner.close()
    }

    fn read_block(&self, block_id: BlockId, buf: &mut Block) -> block_dev::Result<()> {
        self.inner.read_block(block_id, buf)
    }

    fn write_block(&self, block_id: BlockId, buf: &Block) -> block_dev::Result<()> {
        if block_id == BlockId::INODE && self.armed.load(Ordering::SeqCst) {
            return Err(std::io::Error::other("terminated before inode write").into());
        }
        self.inner.write_block(block_id, buf)
    }
}
