use std::io;

use crate::BlockId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("memdrv is not open")]
    NotOpen,
    #[error("memdrv is already open")]
    AlreadyOpen,
    #[error("block {block} is out of range, memdrv has {total} blocks")]
    OutOfRange { block: BlockId, total: usize },
    #[error("memdrv I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
