//! Minimal seekable-byte-stream capability used as table storage.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, Write};

/// Storage a [`Table`](super::Table) can create and append to.
///
/// The writer needs positioned reads and writes plus the ability to drop
/// bytes from the tail (the append protocol removes the file terminator
/// before extending the data area). Implemented for [`File`] for on-disk
/// tables and for [`Cursor<Vec<u8>>`] so the engine can be exercised against
/// in-memory buffers.
pub trait TableStream: Read + Write + Seek {
	/// Truncates the stream to its current position.
	fn truncate(&mut self) -> io::Result<()>;
}

impl TableStream for File {
	fn truncate(&mut self) -> io::Result<()> {
		let position = self.stream_position()?;
		self.set_len(position)
	}
}

impl TableStream for Cursor<Vec<u8>> {
	fn truncate(&mut self) -> io::Result<()> {
		let position = self.position() as usize;
		self.get_mut().truncate(position);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use std::io::SeekFrom;

	use super::*;

	#[test]
	fn test_cursor_truncate_drops_tail() {
		let mut cursor = Cursor::new(vec![1u8, 2, 3, 4, 5]);
		cursor.seek(SeekFrom::End(-2)).unwrap();
		cursor.truncate().unwrap();
		assert_eq!(cursor.get_ref(), &[1, 2, 3]);

		// writes continue from the truncation point
		cursor.write_all(&[9]).unwrap();
		assert_eq!(cursor.get_ref(), &[1, 2, 3, 9]);
	}

	#[test]
	fn test_file_truncate_drops_tail() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("tail.bin");

		let mut file = File::options()
			.read(true)
			.write(true)
			.create(true)
			.truncate(true)
			.open(&path)
			.unwrap();
		file.write_all(b"abcdef").unwrap();
		file.seek(SeekFrom::End(-1)).unwrap();
		file.truncate().unwrap();

		drop(file);
		assert_eq!(std::fs::read(&path).unwrap(), b"abcde");
	}
}
