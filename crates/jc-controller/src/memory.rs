//! SPI flash dumps of real controllers
//!
//! A dump of a paired controller's SPI flash carries the factory calibration
//! and color data the console expects to read back. Only the color bytes are
//! surfaced here; the rest of the dump is kept verbatim.

use crate::error::{ControllerError, ControllerResult};
use std::fs;
use std::path::Path;

/// Size of a full SPI flash dump in bytes
pub const SPI_FLASH_SIZE: usize = 0x80000;

const BODY_COLOR_OFFSET: usize = 0x6050;
const BUTTON_COLOR_OFFSET: usize = 0x6053;

/// In-memory SPI flash dump
#[derive(Debug, Clone)]
pub struct FlashMemory {
    data: Vec<u8>,
}

impl FlashMemory {
    /// Wrap a raw dump, validating its size
    pub fn new(data: Vec<u8>) -> ControllerResult<Self> {
        if data.len() != SPI_FLASH_SIZE {
            return Err(ControllerError::FlashSize {
                expected: SPI_FLASH_SIZE,
                actual: data.len(),
            });
        }
        Ok(Self { data })
    }

    /// Load a dump file
    pub fn from_file(path: impl AsRef<Path>) -> ControllerResult<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| ControllerError::ReadFlash {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(data)
    }

    /// Body color as factory-set RGB bytes
    pub fn body_color(&self) -> [u8; 3] {
        self.color_at(BODY_COLOR_OFFSET)
    }

    /// Button color as factory-set RGB bytes
    pub fn button_color(&self) -> [u8; 3] {
        self.color_at(BUTTON_COLOR_OFFSET)
    }

    /// Raw dump contents
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn color_at(&self, offset: usize) -> [u8; 3] {
        [self.data[offset], self.data[offset + 1], self.data[offset + 2]]
    }
}

impl Default for FlashMemory {
    /// A blank dump, as an unflashed chip reads
    fn default() -> Self {
        Self {
            data: vec![0xff; SPI_FLASH_SIZE],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_wrong_size() {
        let err = FlashMemory::new(vec![0; 16]).unwrap_err();
        assert!(matches!(
            err,
            ControllerError::FlashSize {
                expected: SPI_FLASH_SIZE,
                actual: 16
            }
        ));
    }

    #[test]
    fn test_color_bytes() {
        let mut data = vec![0u8; SPI_FLASH_SIZE];
        data[0x6050..0x6053].copy_from_slice(&[0x32, 0x33, 0x34]);
        data[0x6053..0x6056].copy_from_slice(&[0xaa, 0xbb, 0xcc]);

        let flash = FlashMemory::new(data).unwrap();
        assert_eq!(flash.body_color(), [0x32, 0x33, 0x34]);
        assert_eq!(flash.button_color(), [0xaa, 0xbb, 0xcc]);
    }

    #[test]
    fn test_default_is_blank() {
        let flash = FlashMemory::default();
        assert_eq!(flash.data().len(), SPI_FLASH_SIZE);
        assert_eq!(flash.body_color(), [0xff, 0xff, 0xff]);
    }
}
