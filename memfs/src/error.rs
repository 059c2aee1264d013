use std::io;
use std::path::PathBuf;

use block_dev::BlockId;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Device(#[from] block_dev::Error),
    #[error("cannot open source {path:?}: {source}")]
    Source { path: PathBuf, source: io::Error },
    #[error("cannot open destination {path:?}: {source}")]
    Destination { path: PathBuf, source: io::Error },
    #[error("failed to read source")]
    Read(#[source] io::Error),
    #[error("failed to write destination")]
    Write(#[source] io::Error),
    #[error("malformed inode")]
    Layout(#[from] binrw::Error),
    #[error("no free block left on memdrv")]
    NoSpace,
    #[error("block {0} cannot be recorded in an indirect entry")]
    Unaddressable(BlockId),
    #[error("inode has no direct slot {0}")]
    DirectSlot(usize),
    #[error("allocator spans {allocator} blocks but memdrv has {device}")]
    Geometry { allocator: usize, device: usize },
}

/// 错误的大类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// 设备未打开、越界，或源/目标无法打开
    Resource,
    /// 读写失败
    Io,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Device(block_dev::Error::Io(_)) => ErrorKind::Io,
            Self::Device(_) => ErrorKind::Resource,
            Self::Source { .. } | Self::Destination { .. } => ErrorKind::Resource,
            Self::NoSpace | Self::Unaddressable(_) | Self::DirectSlot(_) => ErrorKind::Resource,
            Self::Geometry { .. } => ErrorKind::Resource,
            Self::Read(_) | Self::Write(_) | Self::Layout(_) => ErrorKind::Io,
        }
    }
}

pub type Result<T> = core::result::Result<T, Error>;
