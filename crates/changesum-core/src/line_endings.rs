//! Streaming line-ending normalization.
//!
//! [`LineEndingReader`] rewrites `\r\n` and lone `\r` to `\n` while bytes
//! are pulled from the wrapped source. Its whole state is one flag: whether
//! the previous byte was `\r`. Nothing else is buffered, so memory use does
//! not depend on stream length.
//!
//! Only line endings are touched. Text-level normalization (U+FFFD removal,
//! NFC) is applied to string content only, never to streams, and checksums
//! already stored depend on that difference.

use std::io::{self, Read};

/// Single-consumer reader that collapses CRLF / CR into LF.
#[derive(Debug)]
pub struct LineEndingReader<R> {
    inner: R,
    prev_cr: bool,
}

impl<R: Read> LineEndingReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            prev_cr: false,
        }
    }

    /// Pull the next output byte, or `None` at end of the source.
    pub fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    if let Some(out) = self.step(byte[0]) {
                        return Ok(Some(out));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Transition for one input byte; `None` means the byte is swallowed.
    fn step(&mut self, byte: u8) -> Option<u8> {
        match byte {
            b'\r' => {
                self.prev_cr = true;
                Some(b'\n')
            }
            // The LF of a CRLF; its newline went out with the CR.
            b'\n' if self.prev_cr => {
                self.prev_cr = false;
                None
            }
            other => {
                self.prev_cr = false;
                Some(other)
            }
        }
    }
}

impl<R: Read> Read for LineEndingReader<R> {
    /// Reads a chunk from the source and rewrites it in place. Output never
    /// grows, so the rewrite fits in `buf`.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        loop {
            let n = self.inner.read(buf)?;
            if n == 0 {
                return Ok(0);
            }
            // `written` never passes `pos`, so each byte is read before its slot is reused.
            let mut written = 0;
            let mut pos = 0;
            while pos < n {
                let byte = buf[pos];
                pos += 1;
                if let Some(out) = self.step(byte) {
                    buf[written] = out;
                    written += 1;
                }
            }
            // A chunk holding only a swallowed LF must not look like EOF.
            if written > 0 {
                return Ok(written);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Serves `data` in the given chunk sizes, then EOF.
    struct Chunked {
        data: Vec<u8>,
        pos: usize,
        sizes: Vec<usize>,
    }

    impl Read for Chunked {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos >= self.data.len() {
                return Ok(0);
            }
            let want = if self.sizes.is_empty() {
                self.data.len() - self.pos
            } else {
                self.sizes.remove(0)
            };
            let n = want.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    fn pull_all(input: &[u8]) -> Vec<u8> {
        let mut r = LineEndingReader::new(input);
        let mut out = Vec::new();
        while let Some(b) = r.next_byte().unwrap() {
            out.push(b);
        }
        out
    }

    fn read_all<R: Read>(r: R) -> Vec<u8> {
        let mut out = Vec::new();
        LineEndingReader::new(r).read_to_end(&mut out).unwrap();
        out
    }

    #[test]
    fn crlf_collapses_to_lf() {
        assert_eq!(pull_all(b"X\r\nY"), b"X\nY");
        assert_eq!(read_all(&b"X\r\nY"[..]), b"X\nY");
    }

    #[test]
    fn lone_cr_becomes_lf() {
        assert_eq!(pull_all(b"X\rY"), b"X\nY");
        assert_eq!(read_all(&b"X\rY"[..]), b"X\nY");
    }

    #[test]
    fn each_cr_is_independent() {
        assert_eq!(pull_all(b"X\r\r\nY"), b"X\n\nY");
        assert_eq!(read_all(&b"X\r\r\nY"[..]), b"X\n\nY");
    }

    #[test]
    fn plain_lf_and_trailing_cr() {
        assert_eq!(pull_all(b"\n\r\n\n\r"), b"\n\n\n\n");
    }

    #[test]
    fn empty_source() {
        assert_eq!(pull_all(b""), b"");
        assert_eq!(read_all(&b""[..]), b"");
    }

    #[test]
    fn several_crlf_in_one_chunk_compact_in_place() {
        let mut r = LineEndingReader::new(&b"a\r\n\r\nb\r\n"[..]);
        let mut buf = [0u8; 16];
        let n = r.read(&mut buf).unwrap();
        assert_eq!(&buf[..n], b"a\n\nb\n");
        assert_eq!(r.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn crlf_split_across_chunks() {
        let src = Chunked {
            data: b"ab\r\ncd".to_vec(),
            pos: 0,
            sizes: vec![3, 1, 2],
        };
        assert_eq!(read_all(src), b"ab\ncd");
    }

    #[test]
    fn swallowed_lf_alone_in_chunk_is_not_eof() {
        let mut r = LineEndingReader::new(Chunked {
            data: b"\r\nz".to_vec(),
            pos: 0,
            sizes: vec![1, 1, 1],
        });
        let mut buf = [0u8; 8];
        assert_eq!(r.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], b'\n');
        // Second inner chunk is just the swallowed LF.
        assert_eq!(r.read(&mut buf).unwrap(), 1);
        assert_eq!(buf[0], b'z');
        assert_eq!(r.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn into_inner_returns_source_position() {
        let mut r = LineEndingReader::new(&b"a\rb"[..]);
        assert_eq!(r.next_byte().unwrap(), Some(b'a'));
        let rest = r.into_inner();
        assert_eq!(rest, b"\rb");
    }
}
