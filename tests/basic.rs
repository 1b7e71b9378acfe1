use std::io::{self, Read, Write};

use bytering::{RingBuffer, RingBufferError, State};

#[test]
fn basic_single_thread_roundtrip() {
    let mut rb = RingBuffer::new(1024).expect("create");

    assert_eq!(rb.write(b"hello").expect("write"), 5);
    assert_eq!(rb.available_data(), 5);

    let mut out = [0u8; 5];
    assert_eq!(rb.read(&mut out).expect("read"), 5);
    assert_eq!(&out, b"hello");
    assert!(rb.is_empty());
}

#[test]
fn full_buffer_rejects_further_writes() {
    let mut rb = RingBuffer::new(4).unwrap();

    assert_eq!(rb.available_space(), 3);
    rb.write(b"XYZ").unwrap();
    assert!(rb.is_full());

    let err = rb.write(b"Q").unwrap_err();
    assert_eq!(
        err,
        RingBufferError::InsufficientSpace {
            requested: 1,
            available: 0
        }
    );
    assert_eq!(rb.read_to_vec(3).unwrap(), b"XYZ");
}

#[test]
fn wrapped_data_reads_back_in_order() {
    let mut rb = RingBuffer::new(8).unwrap();

    // Leave the cursors near the end of storage, then write across it.
    rb.write(b"012345").unwrap();
    rb.read(&mut [0u8; 5]).unwrap();
    rb.write(b"abcde").unwrap();

    let (head, tail) = rb.as_slices();
    assert_eq!(head, b"5ab");
    assert_eq!(tail, b"cde");
    assert_eq!(rb.read_to_vec(6).unwrap(), b"5abcde");
    assert_eq!(rb.available_space(), 7);
}

#[test]
fn zero_copy_chunks() {
    let mut rb = RingBuffer::new(16).unwrap();

    let chunk = rb.writable_chunk();
    chunk[..6].copy_from_slice(b"packet");
    rb.commit_write(6).unwrap();

    assert_eq!(rb.readable_chunk(), b"packet");
    rb.commit_read(6).unwrap();
    assert_eq!(rb.state(), State::Empty);
}

#[test]
fn io_adapters_transfer_partially() {
    let mut rb = RingBuffer::new(6).unwrap();

    assert_eq!(Write::write(&mut rb, b"abcdefgh").unwrap(), 5);
    assert_eq!(Write::write(&mut rb, b"x").unwrap(), 0);

    let err = rb.write_all(b"y").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::WriteZero);

    let mut out = [0u8; 3];
    assert_eq!(Read::read(&mut rb, &mut out).unwrap(), 3);
    assert_eq!(&out, b"abc");

    let mut rest = Vec::new();
    rb.read_to_end(&mut rest).unwrap();
    assert_eq!(rest, b"de");
    assert!(rb.is_empty());
}

#[test]
fn io_copy_through_buffer() {
    let mut rb = RingBuffer::new(64).unwrap();
    let mut source: &[u8] = b"staged between producer and consumer";

    io::copy(&mut source, &mut rb).unwrap();
    let mut sink = Vec::new();
    io::copy(&mut rb, &mut sink).unwrap();

    assert_eq!(sink, b"staged between producer and consumer");
}

#[test]
fn errors_render_for_callers() {
    let err = RingBuffer::new(0).unwrap_err();
    assert_eq!(err.to_string(), "ring buffer capacity must be greater than zero");

    let mut rb = RingBuffer::new(4).unwrap();
    let err = rb.read_to_vec(1).unwrap_err();
    assert_eq!(
        err.to_string(),
        "insufficient data: requested 1 bytes, 0 available"
    );
}
