pub mod serial;

/// A duplex byte stream to the controller.
///
/// Both calls report how many bytes actually moved; deciding whether a
/// partial transfer is acceptable is left to the caller.
pub trait Transport {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize>;
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;
}
