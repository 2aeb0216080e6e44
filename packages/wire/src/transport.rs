//! The seam between the codec and whatever carries bytes to a peer.

use std::collections::VecDeque;

use bytes::Bytes;
use xmessage_core::Message;

use crate::{decode, encode, WireError};

/// Carries encoded messages between processes.
///
/// The codec only produces and consumes buffers. Moving them (a socket, a
/// pipe, a shared-memory ring, a binder-style IPC) is the transport's job.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Box<dyn Transport>`.
pub trait Transport: Send {
    /// Hand one encoded message to the transport.
    fn send(&mut self, bytes: Bytes) -> Result<(), WireError>;

    /// Take the next encoded message.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - Nothing is waiting (not an error condition).
    /// * `Ok(Some(bytes))` - One complete encoded message.
    /// * `Err(WireError)` - The transport failed.
    fn recv(&mut self) -> Result<Option<Bytes>, WireError>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, bytes: Bytes) -> Result<(), WireError> {
        (*self).send(bytes)
    }

    fn recv(&mut self) -> Result<Option<Bytes>, WireError> {
        (*self).recv()
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&mut self, bytes: Bytes) -> Result<(), WireError> {
        self.as_mut().send(bytes)
    }

    fn recv(&mut self) -> Result<Option<Bytes>, WireError> {
        self.as_mut().recv()
    }
}

/// An in-process transport: buffers are received in the order they were sent.
#[derive(Debug, Default)]
pub struct LoopbackTransport {
    queue: VecDeque<Bytes>,
}

impl LoopbackTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of buffers waiting to be received.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl Transport for LoopbackTransport {
    fn send(&mut self, bytes: Bytes) -> Result<(), WireError> {
        self.queue.push_back(bytes);
        Ok(())
    }

    fn recv(&mut self) -> Result<Option<Bytes>, WireError> {
        Ok(self.queue.pop_front())
    }
}

/// Encode `msg` and hand it to `transport`.
///
/// Nothing is sent if encoding fails.
pub fn send_message<T: Transport + ?Sized>(
    transport: &mut T,
    msg: &Message,
) -> Result<(), WireError> {
    let bytes = encode(msg)?;
    transport.send(bytes)
}

/// Receive the next buffer from `transport` and decode it.
pub fn recv_message<T: Transport + ?Sized>(transport: &mut T) -> Result<Option<Message>, WireError> {
    match transport.recv()? {
        Some(bytes) => decode(&bytes).map(Some),
        None => Ok(None),
    }
}
