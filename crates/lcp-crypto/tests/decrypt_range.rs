//! Range decryption checked against whole-message decryption.

use std::io::Cursor;

use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use lcp_crypto::{
    ContentKey, CryptoError, CryptoResult, DecryptionRange, EncryptedStream, GcmDecryptor,
    ReadSeekStream, NONCE_LEN,
};
use rstest::rstest;

const KEY: [u8; 32] = [0x42; 32];
const NONCE: [u8; NONCE_LEN] = [0u8; NONCE_LEN];

fn plaintext(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31)).collect()
}

fn encrypt_resource(plaintext: &[u8]) -> Vec<u8> {
    let cipher = Aes256Gcm::new_from_slice(&KEY).expect("key length");
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&NONCE), plaintext)
        .expect("encrypt failed");
    let mut message = NONCE.to_vec();
    message.extend_from_slice(&ciphertext);
    message
}

fn engine() -> GcmDecryptor {
    GcmDecryptor::new(ContentKey::aes256(KEY.to_vec()).unwrap())
}

/// Stream wrapper recording every positioned read the engine issues.
struct RecordingStream {
    inner: ReadSeekStream<Cursor<Vec<u8>>>,
    reads: Vec<(u64, usize)>,
}

impl RecordingStream {
    fn new(message: Vec<u8>) -> Self {
        Self {
            inner: ReadSeekStream::new(Cursor::new(message)),
            reads: Vec::new(),
        }
    }
}

impl EncryptedStream for RecordingStream {
    fn stream_len(&mut self) -> CryptoResult<u64> {
        self.inner.stream_len()
    }

    fn read_exact_at(&mut self, pos: u64, buf: &mut [u8]) -> CryptoResult<()> {
        self.reads.push((pos, buf.len()));
        self.inner.read_exact_at(pos, buf)
    }
}

#[rstest]
#[case::aligned_start(0, 16)]
#[case::aligned_middle(16, 32)]
#[case::unaligned_start(4, 8)]
#[case::cross_block(10, 20)]
#[case::unaligned_both_ends(7, 55)]
#[case::tail(84, 16)]
#[case::last_byte(99, 1)]
#[case::empty(40, 0)]
#[case::empty_at_end(100, 0)]
#[test]
fn test_range_matches_whole_decrypt(#[case] position: u64, #[case] length: usize) {
    let plain = plaintext(100);
    let message = encrypt_resource(&plain);
    let expected = &plain[position as usize..position as usize + length];

    let mut stream = ReadSeekStream::new(Cursor::new(message));
    let mut out = vec![0u8; length];
    let written = engine()
        .decrypt_range(DecryptionRange::new(position, length), &mut stream, &mut out)
        .unwrap();

    assert_eq!(written, length);
    assert_eq!(out, expected);
}

#[test]
fn test_full_request_equals_plaintext() {
    let plain = plaintext(100);
    let message = encrypt_resource(&plain);

    let mut stream = ReadSeekStream::new(Cursor::new(message));
    let mut out = vec![0u8; 100];
    let written = engine()
        .decrypt_range(DecryptionRange::new(0, 100), &mut stream, &mut out)
        .unwrap();

    assert_eq!(written, 100);
    assert_eq!(out, plain);
}

#[test]
fn test_full_request_verifies_tag() {
    // The full path authenticates: a flipped tag bit must surface, and no
    // plaintext may be written out.
    let mut message = encrypt_resource(&plaintext(100));
    let last = message.len() - 1;
    message[last] ^= 0x01;

    let mut stream = ReadSeekStream::new(Cursor::new(message));
    let mut out = vec![0u8; 100];
    let err = engine()
        .decrypt_range(DecryptionRange::new(0, 100), &mut stream, &mut out)
        .unwrap_err();

    assert!(matches!(err, CryptoError::IntegrityFailure));
    assert_eq!(out, vec![0u8; 100]);
}

#[test]
fn test_windowed_path_ignores_tag() {
    // A windowed read never touches the tag, so tampering with it goes
    // unnoticed by design; the decrypted bytes are still the right ones.
    let plain = plaintext(100);
    let mut message = encrypt_resource(&plain);
    let last = message.len() - 1;
    message[last] ^= 0x01;

    let mut stream = ReadSeekStream::new(Cursor::new(message));
    let mut out = vec![0u8; 8];
    engine()
        .decrypt_windowed_unauthenticated(DecryptionRange::new(4, 8), &mut stream, &mut out)
        .unwrap();

    assert_eq!(out, &plain[4..12]);
}

#[test]
fn test_single_block_window_read() {
    // One 16-byte block of plaintext; the middle range must be served from
    // exactly one block read right after the nonce.
    let plain = plaintext(16);
    let message = encrypt_resource(&plain);
    let mut stream = RecordingStream::new(message);

    let mut out = vec![0u8; 8];
    let written = engine()
        .decrypt_range(DecryptionRange::new(4, 8), &mut stream, &mut out)
        .unwrap();

    assert_eq!(written, 8);
    assert_eq!(out, &plain[4..12]);
    // Nonce read plus the single-block window at stream offset 12.
    assert_eq!(stream.reads, vec![(0, NONCE_LEN), (12, 16)]);
}

#[test]
fn test_aligned_tail_stays_in_bounds() {
    // A block-aligned read of the last plaintext block must not reach past
    // the ciphertext into the tag.
    let plain = plaintext(24);
    let message = encrypt_resource(&plain);
    let mut stream = RecordingStream::new(message);

    let mut out = vec![0u8; 8];
    let written = engine()
        .decrypt_range(DecryptionRange::new(16, 8), &mut stream, &mut out)
        .unwrap();

    assert_eq!(written, 8);
    assert_eq!(out, &plain[16..24]);
    assert_eq!(stream.reads, vec![(0, NONCE_LEN), (28, 16)]);
}

#[test]
fn test_zero_length_reads_nothing() {
    let message = encrypt_resource(&plaintext(32));
    let mut stream = RecordingStream::new(message);

    let mut out = [0u8; 0];
    let written = engine()
        .decrypt_range(DecryptionRange::new(8, 0), &mut stream, &mut out)
        .unwrap();

    assert_eq!(written, 0);
    assert!(stream.reads.is_empty());
}

#[rstest]
#[case::past_end(96, 8)]
#[case::start_past_end(101, 0)]
#[case::way_out(1_000, 1)]
#[case::overflow(u64::MAX, 2)]
#[test]
fn test_out_of_range_rejected(#[case] position: u64, #[case] length: usize) {
    let message = encrypt_resource(&plaintext(100));
    let mut stream = ReadSeekStream::new(Cursor::new(message));

    let mut out = vec![0u8; length];
    let err = engine()
        .decrypt_range(DecryptionRange::new(position, length), &mut stream, &mut out)
        .unwrap_err();

    assert!(matches!(err, CryptoError::OutOfRange { .. }));
}

#[test]
fn test_buffer_too_small_rejected() {
    let message = encrypt_resource(&plaintext(100));
    let mut stream = ReadSeekStream::new(Cursor::new(message));

    let mut out = vec![0u8; 4];
    let err = engine()
        .decrypt_range(DecryptionRange::new(0, 8), &mut stream, &mut out)
        .unwrap_err();

    assert!(matches!(
        err,
        CryptoError::BufferTooSmall { need: 8, have: 4 }
    ));
}

#[test]
fn test_oversized_buffer_takes_windowed_path() {
    // Same bytes as the full request, but the slack buffer forces the
    // windowed path; output still matches the front of the plaintext.
    let plain = plaintext(100);
    let message = encrypt_resource(&plain);
    let mut stream = RecordingStream::new(message);

    let mut out = vec![0u8; 128];
    let written = engine()
        .decrypt_range(DecryptionRange::new(0, 100), &mut stream, &mut out)
        .unwrap();

    assert_eq!(written, 100);
    assert_eq!(&out[..100], &plain[..]);
    // First read is the nonce, not the whole stream: the windowed path.
    assert_eq!(stream.reads.first(), Some(&(0, NONCE_LEN)));
    assert_eq!(stream.reads.last(), Some(&(12, 112)));
}
