//! # 磁盘数据结构层
//!
//! 0 号块存放 inode，见 [`Inode`]；
//! inode 的最后一个地址槽可以指向一个一级间接索引块，见 [`IndirectBlock`]。

mod indirect;
mod inode;

pub use self::{indirect::IndirectBlock, inode::Inode};
