//! 健壮的整块读取
//!
//! 底层 `read` 可能只读到一部分，也可能被信号打断；
//! 这里反复读取直到填满缓冲区或遇到输入结束。

use std::io::{self, Read};

/// 尽量填满 `buf`，返回读到的字节数。
///
/// 只有在输入结束时返回值才会小于 `buf.len()`；`Interrupted` 会被透明地重试。
pub fn read_full<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// 每次最多给出 3 字节，并在中间插入被打断的读取
    struct Flaky {
        data: VecDeque<u8>,
        calls: usize,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls % 2 == 0 {
                return Err(io::ErrorKind::Interrupted.into());
            }
            let n = buf.len().min(3).min(self.data.len());
            for (dst, src) in buf.iter_mut().zip(self.data.drain(..n)) {
                *dst = src;
            }
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::ErrorKind::PermissionDenied.into())
        }
    }

    #[test]
    fn short_and_interrupted_reads() {
        let mut reader = Flaky {
            data: (0..10).collect(),
            calls: 0,
        };
        let mut buf = [0xff; 8];
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 8);
        assert_eq!(buf, [0, 1, 2, 3, 4, 5, 6, 7]);

        // 输入结束时才会少于请求的长度
        let mut buf = [0xff; 8];
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], &[8, 9]);
        assert_eq!(read_full(&mut reader, &mut buf).unwrap(), 0);
    }

    #[test]
    fn other_errors_surface() {
        let err = read_full(&mut Broken, &mut [0; 4]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }
}
