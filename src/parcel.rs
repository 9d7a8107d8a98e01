//! Parcel: the serialized buffer for one IPC request or reply.
//!
//! This module owns the concrete byte layout shared by the proxy and the
//! subscriber stub:
//! - integers little-endian, no alignment padding
//! - `bool` encoded as `i32` (0/1)
//! - strings as a `u32` byte length followed by UTF-8 bytes
//! - optional objects as an `i32` presence flag followed by the value
//! - object vectors as an `i32` count followed by the elements
//!
//! Reads never run past the end of the buffer; a short read surfaces
//! [`AnsError::ParcelableFailed`]. Writes fail the same way once the
//! capacity limit is exceeded.

use bytes::BytesMut;

use crate::error::{AnsError, Result};

/// Maximum payload size a parcel accepts, matching the transport's cap.
pub const DEFAULT_CAPACITY: usize = 200 * 1024;

/// A value that can be serialized into and out of a [`Parcel`].
pub trait Parcelable: Sized {
    /// Append this value to the parcel.
    fn write_to(&self, parcel: &mut Parcel) -> Result<()>;

    /// Read a value of this type from the parcel's current position.
    fn read_from(parcel: &mut Parcel) -> Result<Self>;
}

/// A serialized buffer used for one IPC request or reply.
#[derive(Debug, Clone, Default)]
pub struct Parcel {
    buf: BytesMut,
    read: usize,
    capacity: usize,
}

impl Parcel {
    /// Create an empty parcel with the default capacity limit.
    pub fn new() -> Self {
        Self {
            buf: BytesMut::new(),
            read: 0,
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Create an empty parcel that rejects writes beyond `capacity` bytes.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            buf: BytesMut::new(),
            read: 0,
            capacity,
        }
    }

    /// Total number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of unread bytes remaining.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.read
    }

    /// Returns true if unread bytes remain.
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Reset the read position to the start of the buffer.
    pub fn rewind(&mut self) {
        self.read = 0;
    }

    /// The raw written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    fn put(&mut self, bytes: &[u8]) -> Result<()> {
        if self.buf.len() + bytes.len() > self.capacity {
            return Err(AnsError::ParcelableFailed);
        }
        self.buf.extend_from_slice(bytes);
        Ok(())
    }

    fn take(&mut self, n: usize) -> Result<&[u8]> {
        if self.remaining() < n {
            return Err(AnsError::ParcelableFailed);
        }
        let start = self.read;
        self.read += n;
        Ok(&self.buf[start..start + n])
    }

    // ========================================================================
    // Primitives
    // ========================================================================

    pub fn write_i32(&mut self, value: i32) -> Result<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let bytes = self.take(4)?;
        let arr: [u8; 4] = bytes.try_into().map_err(|_| AnsError::ParcelableFailed)?;
        Ok(i32::from_le_bytes(arr))
    }

    pub fn write_u32(&mut self, value: u32) -> Result<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        let arr: [u8; 4] = bytes.try_into().map_err(|_| AnsError::ParcelableFailed)?;
        Ok(u32::from_le_bytes(arr))
    }

    pub fn write_i64(&mut self, value: i64) -> Result<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let bytes = self.take(8)?;
        let arr: [u8; 8] = bytes.try_into().map_err(|_| AnsError::ParcelableFailed)?;
        Ok(i64::from_le_bytes(arr))
    }

    pub fn write_u64(&mut self, value: u64) -> Result<()> {
        self.put(&value.to_le_bytes())
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes = self.take(8)?;
        let arr: [u8; 8] = bytes.try_into().map_err(|_| AnsError::ParcelableFailed)?;
        Ok(u64::from_le_bytes(arr))
    }

    /// Booleans travel as `i32`, matching the wire format.
    pub fn write_bool(&mut self, value: bool) -> Result<()> {
        self.write_i32(i32::from(value))
    }

    pub fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read_i32()? != 0)
    }

    // ========================================================================
    // Strings
    // ========================================================================

    pub fn write_string(&mut self, value: &str) -> Result<()> {
        let len = u32::try_from(value.len()).map_err(|_| AnsError::ParcelableFailed)?;
        self.write_u32(len)?;
        self.put(value.as_bytes())
    }

    pub fn read_string(&mut self) -> Result<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?.to_vec();
        String::from_utf8(bytes).map_err(|_| AnsError::ParcelableFailed)
    }

    pub fn write_string_vec(&mut self, values: &[String]) -> Result<()> {
        let count = i32::try_from(values.len()).map_err(|_| AnsError::ParcelableFailed)?;
        self.write_i32(count)?;
        for value in values {
            self.write_string(value)?;
        }
        Ok(())
    }

    pub fn read_string_vec(&mut self) -> Result<Vec<String>> {
        let count = self.read_i32()?;
        let count = usize::try_from(count).map_err(|_| AnsError::ParcelableFailed)?;
        let mut values = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            if !self.has_remaining() {
                break;
            }
            values.push(self.read_string()?);
        }
        Ok(values)
    }

    // ========================================================================
    // Interface token
    // ========================================================================

    /// Write the interface-descriptor token. Every request starts with one.
    pub fn write_interface_token(&mut self, token: &str) -> Result<()> {
        self.write_string(token)
    }

    /// Read the interface-descriptor token and verify it matches `expected`.
    pub fn read_interface_token(&mut self, expected: &str) -> Result<()> {
        let token = self.read_string()?;
        if token == expected {
            Ok(())
        } else {
            Err(AnsError::ParcelableFailed)
        }
    }

    // ========================================================================
    // Objects
    // ========================================================================

    /// Write a required object, no presence flag.
    pub fn write_parcelable<T: Parcelable>(&mut self, value: &T) -> Result<()> {
        value.write_to(self)
    }

    /// Read a required object.
    pub fn read_parcelable<T: Parcelable>(&mut self) -> Result<T> {
        T::read_from(self)
    }

    /// Write an object preceded by an `i32` presence flag.
    pub fn write_optional_parcelable<T: Parcelable>(&mut self, value: Option<&T>) -> Result<()> {
        match value {
            Some(value) => {
                self.write_i32(1)?;
                value.write_to(self)
            }
            None => self.write_i32(0),
        }
    }

    /// Read an object preceded by an `i32` presence flag.
    pub fn read_optional_parcelable<T: Parcelable>(&mut self) -> Result<Option<T>> {
        if self.read_i32()? != 0 {
            Ok(Some(T::read_from(self)?))
        } else {
            Ok(None)
        }
    }

    /// Write a count-prefixed sequence of objects.
    pub fn write_parcelable_vec<T: Parcelable>(&mut self, values: &[T]) -> Result<()> {
        let count = i32::try_from(values.len()).map_err(|_| AnsError::ParcelableFailed)?;
        self.write_i32(count)?;
        for value in values {
            value.write_to(self)?;
        }
        Ok(())
    }

    /// Read a count-prefixed sequence of objects.
    ///
    /// A count larger than the remaining payload is not an error: the read
    /// stops at the end of the buffer and returns what was decoded. The
    /// count's consistency is the transport's responsibility.
    pub fn read_parcelable_vec<T: Parcelable>(&mut self) -> Result<Vec<T>> {
        let count = self.read_i32()?;
        let count = usize::try_from(count).map_err(|_| AnsError::ParcelableFailed)?;
        let mut values = Vec::with_capacity(count.min(64));
        for _ in 0..count {
            if !self.has_remaining() {
                break;
            }
            values.push(T::read_from(self)?);
        }
        Ok(values)
    }

    // ========================================================================
    // Remote object handles
    // ========================================================================

    /// Write an opaque remote-object handle.
    pub fn write_remote_handle(&mut self, handle: crate::transport::RemoteHandle) -> Result<()> {
        self.write_u64(handle.0)
    }

    /// Read an opaque remote-object handle.
    pub fn read_remote_handle(&mut self) -> Result<crate::transport::RemoteHandle> {
        Ok(crate::transport::RemoteHandle(self.read_u64()?))
    }
}
