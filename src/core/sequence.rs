// Index-fill helper for caller-owned buffers.
use crate::core::error::{Error, ErrorKind};

/// Writes `buffer[i] = i` for `i` in `0..count`, leaving the rest of the
/// buffer untouched. The capacity check happens before any write, so a
/// `Bounds` failure never leaves a partial fill.
pub fn fill_indices(buffer: &mut [i64], count: usize) -> Result<(), Error> {
    if count > buffer.len() {
        return Err(Error::new(ErrorKind::Bounds)
            .with_message("count exceeds buffer capacity")
            .with_requested(count)
            .with_capacity(buffer.len()));
    }
    for (index, slot) in buffer[..count].iter_mut().enumerate() {
        *slot = index as i64;
    }
    Ok(())
}
