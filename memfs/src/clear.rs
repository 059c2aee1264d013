use block_dev::{BLOCK_SIZE, BlockId, Session};

use crate::Result;

/// 把设备的每一块（包括 0 号块的 inode）都写成全零，返回写过的块数。
///
/// **破坏性操作**：之后设备上不再有有效的文件，不需要任何确认。
pub fn clear(session: &mut Session) -> Result<usize> {
    let zero = [0; BLOCK_SIZE];
    let total = session.total_blocks();
    for i in 0..total {
        session.write_block(BlockId::new(i), &zero)?;
    }
    log::info!("memdrv cleared, {total} blocks zeroed");
    Ok(total)
}
